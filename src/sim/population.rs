//! Figure pools and population control
//!
//! Every figure is in exactly one of two pools: `available` (idle) or
//! `active` (walking). Figures only move `available -> active -> available`.
//! The active pool keeps activation order, oldest first.

use rand::Rng;

use super::atlas::Rect;
use super::figure::{Figure, FigureId};
use super::stage::Stage;
use super::walk::{WalkScheduler, WalkStatus};

/// How many figures the stage should hold at `scroll_y`
///
/// One figure per `scroll_per_figure` pixels scrolled, clamped to the pool.
pub fn target_population(scroll_y: f32, scroll_per_figure: f32, total: usize) -> usize {
    let target = (scroll_y / scroll_per_figure).floor();
    if !(target > 0.0) {
        return 0;
    }
    (target as usize).min(total)
}

/// What `regulate` did this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulationChange {
    Unchanged,
    Added(FigureId),
    Removed(FigureId),
}

/// The figure pools
#[derive(Debug, Clone)]
pub struct Population {
    figures: Vec<Figure>,
    available: Vec<FigureId>,
    active: Vec<FigureId>,
}

impl Population {
    /// One figure per atlas cell, all available
    pub fn new(cells: &[Rect]) -> Self {
        let figures: Vec<Figure> = cells
            .iter()
            .enumerate()
            .map(|(i, &rect)| Figure::new(FigureId(i), rect))
            .collect();
        let available = figures.iter().map(|f| f.id).collect();
        Self {
            figures,
            available,
            active: Vec::new(),
        }
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.figures.len()
    }

    #[inline]
    pub fn available(&self) -> &[FigureId] {
        &self.available
    }

    /// Active figures, oldest first
    #[inline]
    pub fn active(&self) -> &[FigureId] {
        &self.active
    }

    #[inline]
    pub fn figure(&self, id: FigureId) -> &Figure {
        &self.figures[id.0]
    }

    #[inline]
    pub fn figure_mut(&mut self, id: FigureId) -> &mut Figure {
        &mut self.figures[id.0]
    }

    pub fn is_active(&self, id: FigureId) -> bool {
        self.active.contains(&id)
    }

    /// Active figures in draw order (ascending baseline, nearest last)
    pub fn draw_order(&self) -> Vec<&Figure> {
        let mut order: Vec<&Figure> = self.active.iter().map(|&id| &self.figures[id.0]).collect();
        order.sort_by(|a, b| a.anchor_y.total_cmp(&b.anchor_y));
        order
    }

    /// Move a random available figure on stage with a fresh walk
    pub fn activate_random<R: Rng>(
        &mut self,
        walks: &WalkScheduler,
        stage: &Stage,
        rng: &mut R,
    ) -> Option<FigureId> {
        if self.available.is_empty() {
            return None;
        }
        let id = self.available.swap_remove(rng.random_range(0..self.available.len()));
        walks.begin(&mut self.figures[id.0], stage, rng);
        self.active.push(id);
        Some(id)
    }

    /// Stop a figure's walk and return it to the available pool
    ///
    /// Returns false if the figure wasn't active.
    pub fn deactivate(&mut self, id: FigureId) -> bool {
        let Some(index) = self.active.iter().position(|&a| a == id) else {
            return false;
        };
        self.active.remove(index);
        self.figures[id.0].stop();
        self.available.push(id);
        true
    }

    /// Deactivate the figure that has been walking longest
    pub fn deactivate_oldest(&mut self) -> Option<FigureId> {
        let id = *self.active.first()?;
        self.deactivate(id);
        Some(id)
    }

    /// Nudge the active count toward `target` by at most one figure.
    ///
    /// Additions are a coin flip (`spawn_chance`) so figures trickle in
    /// instead of arriving in lockstep; removals are immediate.
    pub fn regulate<R: Rng>(
        &mut self,
        target: usize,
        spawn_chance: f64,
        walks: &WalkScheduler,
        stage: &Stage,
        rng: &mut R,
    ) -> PopulationChange {
        use std::cmp::Ordering;

        match self.active.len().cmp(&target) {
            Ordering::Less => {
                if rng.random_bool(spawn_chance) {
                    if let Some(id) = self.activate_random(walks, stage, rng) {
                        return PopulationChange::Added(id);
                    }
                }
                PopulationChange::Unchanged
            }
            Ordering::Greater => match self.deactivate_oldest() {
                Some(id) => PopulationChange::Removed(id),
                None => PopulationChange::Unchanged,
            },
            Ordering::Equal => PopulationChange::Unchanged,
        }
    }

    /// Set every active walk's rate from `smoothed_velocity` and play `dt`.
    ///
    /// Returns the figures whose walk finished; they are still active.
    pub fn advance_walks(
        &mut self,
        walks: &WalkScheduler,
        smoothed_velocity: f32,
        dt: f32,
    ) -> Vec<FigureId> {
        let mut completed = Vec::new();
        for &id in &self.active {
            let figure = &mut self.figures[id.0];
            walks.apply_rate(figure, smoothed_velocity);
            if walks.step(figure, dt) == WalkStatus::Complete {
                completed.push(id);
            }
        }
        completed
    }

    /// Stop every walk and make every figure available again
    pub fn reset(&mut self) {
        for &id in &self.active {
            self.figures[id.0].stop();
        }
        self.active.clear();
        self.available.clear();
        self.available.extend(self.figures.iter().map(|f| f.id));
    }

    /// Check the pool partition (debug/tests)
    pub fn is_partitioned(&self) -> bool {
        let mut seen = vec![0u8; self.figures.len()];
        for id in self.available.iter().chain(&self.active) {
            match seen.get_mut(id.0) {
                Some(count) => *count += 1,
                None => return false,
            }
        }
        seen.iter().all(|&c| c == 1)
            && self.active.iter().all(|id| self.figures[id.0].walk.is_some())
            && self.available.iter().all(|id| self.figures[id.0].walk.is_none())
    }
}
