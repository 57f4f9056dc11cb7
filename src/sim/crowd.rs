//! The crowd controller
//!
//! Owns the atlas, the figure pools, scroll tracking and the RNG. The host
//! constructs one per mounted canvas, calls [`Crowd::tick`] once per animation
//! frame and [`Crowd::resize`] on layout changes, then drops it (after
//! [`Crowd::teardown`]) on unmount. There is no global state.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::atlas::SpriteAtlas;
use super::figure::{Figure, FigureId};
use super::population::{Population, PopulationChange, target_population};
use super::scroll::ScrollVelocity;
use super::stage::Stage;
use super::walk::WalkScheduler;
use crate::error::CrowdError;
use crate::settings::Settings;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub frame: u64,
    pub scroll_y: f32,
    pub smoothed_velocity: f32,
    pub target: usize,
    pub active: usize,
    pub available: usize,
    pub added: Option<FigureId>,
    pub removed: Option<FigureId>,
    /// Figures that finished crossing this tick
    pub completed: Vec<FigureId>,
}

/// A mounted crowd
pub struct Crowd<I> {
    atlas: SpriteAtlas<I>,
    stage: Stage,
    population: Population,
    scroll: ScrollVelocity,
    walks: WalkScheduler,
    rng: Pcg32,
    scroll_per_figure: f32,
    spawn_chance: f64,
    frame: u64,
}

impl<I> Crowd<I> {
    /// Build the pools from `atlas`, starting at rest at `scroll_y`
    ///
    /// Fails if `settings` doesn't validate.
    pub fn new(
        atlas: SpriteAtlas<I>,
        settings: &Settings,
        stage: Stage,
        scroll_y: f32,
        seed: u64,
    ) -> Result<Self, CrowdError> {
        settings.validate()?;
        let population = Population::new(atlas.cells());
        log::debug!(
            "Crowd created: {} figures, stage {}x{} @{}x, seed {}",
            population.total(),
            stage.width,
            stage.height,
            stage.pixel_ratio,
            seed
        );
        Ok(Self {
            atlas,
            stage,
            population,
            scroll: ScrollVelocity::with_tuning(
                scroll_y,
                settings.velocity_smoothing,
                settings.velocity_rest,
            ),
            walks: WalkScheduler::new(settings),
            rng: Pcg32::seed_from_u64(seed),
            scroll_per_figure: settings.scroll_per_figure,
            spawn_chance: settings.spawn_chance,
            frame: 0,
        })
    }

    #[inline]
    pub fn atlas(&self) -> &SpriteAtlas<I> {
        &self.atlas
    }

    #[inline]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    #[inline]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[inline]
    pub fn scroll(&self) -> &ScrollVelocity {
        &self.scroll
    }

    /// Active figures in draw order
    pub fn draw_order(&self) -> Vec<&Figure> {
        self.population.draw_order()
    }

    /// New layout size: drop every walk and rebuild from the scroll position
    pub fn resize(&mut self, stage: Stage) {
        let was_active = self.population.active().len();
        self.stage = stage;
        self.population.reset();
        log::debug!(
            "Crowd resized to {}x{} @{}x ({} walks dropped)",
            stage.width,
            stage.height,
            stage.pixel_ratio,
            was_active
        );
    }

    /// Stop every walk and empty the stage (unmount)
    pub fn teardown(&mut self) {
        self.population.reset();
        log::debug!("Crowd torn down after {} frames", self.frame);
    }

    /// Advance one animation frame of `dt` seconds with the page at `scroll_y`
    pub fn tick(&mut self, scroll_y: f32, dt: f32) -> FrameStats {
        self.frame += 1;

        // 1. Scroll physics
        let velocity = self.scroll.update(scroll_y);

        // 2. Population
        let target = target_population(scroll_y, self.scroll_per_figure, self.population.total());
        let change = self.population.regulate(
            target,
            self.spawn_chance,
            &self.walks,
            &self.stage,
            &mut self.rng,
        );
        match change {
            PopulationChange::Added(id) => log::trace!("figure {} joined", id.0),
            PopulationChange::Removed(id) => log::trace!("figure {} left", id.0),
            PopulationChange::Unchanged => {}
        }

        // 3. Walk speeds, 4. walks
        let completed = self.population.advance_walks(&self.walks, velocity, dt);
        for &id in &completed {
            self.population.deactivate(id);
        }

        FrameStats {
            frame: self.frame,
            scroll_y,
            smoothed_velocity: velocity,
            target,
            active: self.population.active().len(),
            available: self.population.available().len(),
            added: match change {
                PopulationChange::Added(id) => Some(id),
                _ => None,
            },
            removed: match change {
                PopulationChange::Removed(id) => Some(id),
                _ => None,
            },
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn crowd(rows: u32, cols: u32, settings: Settings, scroll_y: f32, seed: u64) -> Crowd<()> {
        let atlas = SpriteAtlas::new((), Vec2::new(rows as f32 * 40.0, cols as f32 * 90.0), rows, cols)
            .unwrap();
        Crowd::new(atlas, &settings, Stage::new(800.0, 600.0, 2.0), scroll_y, seed).unwrap()
    }

    fn settings_k8() -> Settings {
        Settings {
            scroll_per_figure: 8.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_scroll_jump_fills_small_crowd() {
        let mut c = crowd(2, 2, settings_k8(), 0.0, 42);
        let first = c.tick(400.0, DT);
        assert_eq!(first.target, 4);

        let mut all_in = false;
        for _ in 0..200 {
            let stats = c.tick(400.0, DT);
            assert_eq!(stats.active + stats.available, 4);
            if stats.active == 4 {
                all_in = true;
                break;
            }
        }
        assert!(all_in, "crowd never filled");
        assert!(c.population().available().is_empty());
    }

    #[test]
    fn test_frozen_scroll_freezes_walkers() {
        // Scroll far enough to fill the crowd, then hold still
        let mut c = crowd(3, 3, settings_k8(), 0.0, 7);
        let mut y = 0.0;
        for _ in 0..30 {
            y += 4.0;
            c.tick(y, DT);
        }
        let active: Vec<_> = c.population().active().to_vec();
        assert!(!active.is_empty());
        let mut xs: Vec<f32> = active.iter().map(|&id| c.population().figure(id).pos.x).collect();

        let mut drift = Vec::new();
        for _ in 0..60 {
            let stats = c.tick(y, DT);
            assert!(stats.completed.is_empty());
            let step = active
                .iter()
                .zip(xs.iter_mut())
                .map(|(&id, x)| {
                    let now = c.population().figure(id).pos.x;
                    let dx = (now - *x).abs();
                    *x = now;
                    dx
                })
                .fold(0.0f32, f32::max);
            drift.push(step);
        }

        for &id in &active {
            assert!(c.population().is_active(id));
        }
        // Coasting dies out, then nobody moves
        assert!(drift[50..].iter().all(|&dx| dx < 0.05), "drift: {:?}", &drift[50..]);
        assert_eq!(*drift.last().unwrap_or(&1.0), 0.0);
        assert_eq!(c.scroll().smoothed(), 0.0);
    }

    #[test]
    fn test_already_scrolled_page_shows_still_figures() {
        // Page loaded already scrolled: figures appear but nobody walks
        let mut c = crowd(3, 3, settings_k8(), 40.0, 7);
        for _ in 0..20 {
            c.tick(40.0, DT);
        }
        let active: Vec<_> = c.population().active().to_vec();
        assert!(!active.is_empty());
        let xs: Vec<f32> = active.iter().map(|&id| c.population().figure(id).pos.x).collect();

        for _ in 0..60 {
            let stats = c.tick(40.0, DT);
            assert_eq!(stats.smoothed_velocity, 0.0);
            assert!(stats.completed.is_empty());
        }
        for (&id, &x) in active.iter().zip(&xs) {
            assert!(c.population().is_active(id));
            assert!((c.population().figure(id).pos.x - x).abs() < 1e-3);
        }
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let atlas = SpriteAtlas::new((), Vec2::new(80.0, 180.0), 2, 2).unwrap();
        let settings = Settings {
            spawn_chance: 1.5,
            ..Default::default()
        };
        let err = Crowd::new(atlas, &settings, Stage::new(800.0, 600.0, 1.0), 0.0, 1).err();
        assert!(matches!(
            err,
            Some(CrowdError::InvalidSetting {
                name: "spawn_chance",
                ..
            })
        ));
    }

    #[test]
    fn test_walkers_coast_to_stop_after_scrolling() {
        let mut c = crowd(3, 3, settings_k8(), 0.0, 9);
        let mut y = 0.0;
        for _ in 0..40 {
            y += 4.0;
            c.tick(y, DT);
        }
        // Hold until the velocity settles, then nothing moves
        for _ in 0..300 {
            c.tick(y, DT);
        }
        assert_eq!(c.scroll().smoothed(), 0.0);
        let before: Vec<_> = c.draw_order().iter().map(|f| f.pos).collect();
        for _ in 0..60 {
            c.tick(y, DT);
        }
        let after: Vec<_> = c.draw_order().iter().map(|f| f.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_resize_resets_pools() {
        let mut c = crowd(3, 3, settings_k8(), 0.0, 11);
        c.tick(24.0, DT);
        for _ in 0..200 {
            if c.population().active().len() == 3 {
                break;
            }
            c.tick(24.0, DT);
        }
        assert_eq!(c.population().active().len(), 3);

        c.resize(Stage::new(400.0, 300.0, 1.0));
        assert!(c.population().active().is_empty());
        assert_eq!(c.population().available().len(), 9);
        assert!(c.population().is_partitioned());
        assert_eq!(c.stage().width, 400.0);

        // Rebuilds from the current scroll position
        for _ in 0..200 {
            c.tick(24.0, DT);
        }
        assert_eq!(c.population().active().len(), 3);
    }

    #[test]
    fn test_completed_figures_return_to_available() {
        let settings = Settings {
            walk_duration: 0.5,
            ..settings_k8()
        };
        let mut c = crowd(4, 4, settings, 0.0, 13);
        let mut y = 0.0;
        let mut seen_completion = false;
        for _ in 0..600 {
            y += 3.0;
            let stats = c.tick(y, DT);
            for id in &stats.completed {
                seen_completion = true;
                assert!(!c.population().is_active(*id));
                assert!(c.population().available().contains(id));
                assert!(c.population().figure(*id).walk.is_none());
            }
            assert!(c.population().is_partitioned());
        }
        assert!(seen_completion);
    }

    #[test]
    fn test_scrolling_back_up_shrinks_crowd() {
        let mut c = crowd(3, 3, settings_k8(), 0.0, 15);
        for _ in 0..200 {
            c.tick(72.0, DT);
        }
        assert_eq!(c.population().active().len(), 9);
        let oldest = c.population().active()[0];

        let stats = c.tick(0.0, DT);
        assert_eq!(stats.target, 0);
        assert_eq!(stats.removed, Some(oldest));
    }

    #[test]
    fn test_same_seed_same_crowd() {
        let run = |seed| {
            let mut c = crowd(4, 2, settings_k8(), 0.0, seed);
            let mut y = 0.0;
            for _ in 0..120 {
                y += 2.0;
                c.tick(y, DT);
            }
            c.draw_order().iter().map(|f| (f.id, f.pos)).collect::<Vec<_>>()
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn test_teardown_stops_everything() {
        let mut c = crowd(2, 2, settings_k8(), 0.0, 17);
        for _ in 0..100 {
            c.tick(400.0, DT);
        }
        c.teardown();
        assert!(c.draw_order().is_empty());
        assert!(c.population().is_partitioned());
    }
}
