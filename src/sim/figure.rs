//! Figures ("peeps")
//!
//! One figure per atlas cell, created once and recycled through the pools.

use glam::Vec2;

use super::atlas::Rect;
use super::walk::Traversal;
use crate::renderer::Surface;

/// Stable figure identifier (its atlas cell index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FigureId(pub usize);

/// Walking direction across the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

impl Direction {
    /// Horizontal scale that makes the sprite face its direction of travel
    #[inline]
    pub fn facing(self) -> f32 {
        match self {
            Direction::LeftToRight => 1.0,
            Direction::RightToLeft => -1.0,
        }
    }
}

/// A figure's mutable state
#[derive(Debug, Clone)]
pub struct Figure {
    pub id: FigureId,
    /// Cell in the sprite sheet
    pub source: Rect,
    /// Drawn size (pixels)
    pub size: Vec2,
    /// Top-left on stage (top-right when mirrored)
    pub pos: Vec2,
    /// Baseline used for depth sorting
    pub anchor_y: f32,
    /// +1 or -1
    pub scale_x: f32,
    /// Current walk, if active
    pub walk: Option<Traversal>,
}

impl Figure {
    pub fn new(id: FigureId, source: Rect) -> Self {
        Self {
            id,
            source,
            size: source.size(),
            pos: Vec2::ZERO,
            anchor_y: 0.0,
            scale_x: 1.0,
            walk: None,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Place the figure at the start of a walk
    pub fn place(&mut self, pos: Vec2, direction: Direction) {
        self.pos = pos;
        self.anchor_y = pos.y;
        self.scale_x = direction.facing();
    }

    /// Stop and drop the current walk
    pub fn stop(&mut self) -> Option<Traversal> {
        self.walk.take()
    }

    /// Draw the figure's cell at its position, mirrored when walking left
    pub fn render<S: Surface>(&self, surface: &mut S, image: &S::Image) {
        surface.save();
        surface.translate(self.pos.x, self.pos.y);
        surface.scale(self.scale_x, 1.0);
        surface.draw_image(
            image,
            self.source,
            Rect::new(0.0, 0.0, self.size.x, self.size.y),
        );
        surface.restore();
    }
}
