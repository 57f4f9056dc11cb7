//! Headless surface that records draw calls
//!
//! Tracks the transform stack the way a canvas does, so each recorded blit
//! carries the transform it would have been drawn with.

use glam::{Affine2, Vec2};

use super::Surface;
use crate::sim::Rect;

/// A recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    Save,
    Restore,
    Translate(Vec2),
    Scale(Vec2),
    DrawImage {
        source: Rect,
        dest: Rect,
        transform: Affine2,
    },
}

/// Records every call made against it
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    transform: Affine2,
    stack: Vec<Affine2>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            transform: Affine2::IDENTITY,
            stack: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Blits as (source, dest, transform)
    pub fn draws(&self) -> impl Iterator<Item = (Rect, Rect, Affine2)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::DrawImage {
                source,
                dest,
                transform,
            } => Some((source, dest, transform)),
            _ => None,
        })
    }

    /// Unbalanced saves outstanding
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Current transform
    pub fn transform(&self) -> Affine2 {
        self.transform
    }

    /// Forget recorded commands (the transform state is kept)
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for RecordingSurface {
    type Image = ();

    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        // Canvas ignores an unbalanced restore
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        let v = Vec2::new(x, y);
        self.transform = self.transform * Affine2::from_translation(v);
        self.commands.push(DrawCommand::Translate(v));
    }

    fn scale(&mut self, x: f32, y: f32) {
        let v = Vec2::new(x, y);
        self.transform = self.transform * Affine2::from_scale(v);
        self.commands.push(DrawCommand::Scale(v));
    }

    fn draw_image(&mut self, _image: &(), source: Rect, dest: Rect) {
        self.commands.push(DrawCommand::DrawImage {
            source,
            dest,
            transform: self.transform,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transforms_compose_and_restore() {
        let mut s = RecordingSurface::new();
        s.save();
        s.scale(2.0, 2.0);
        s.translate(10.0, 5.0);
        assert_eq!(s.transform().transform_point2(Vec2::ZERO), Vec2::new(20.0, 10.0));
        s.restore();
        assert_eq!(s.transform(), Affine2::IDENTITY);
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn test_unbalanced_restore_is_ignored() {
        let mut s = RecordingSurface::new();
        s.translate(3.0, 4.0);
        s.restore();
        assert_eq!(s.transform().transform_point2(Vec2::ZERO), Vec2::new(3.0, 4.0));
    }
}
