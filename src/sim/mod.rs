//! Deterministic crowd simulation
//!
//! All crowd logic lives here. This module must stay platform-free:
//! - Time only via the `dt` passed to each tick
//! - Seeded RNG only
//! - Stable iteration order (activation order, then baseline for drawing)

pub mod atlas;
pub mod crowd;
pub mod ease;
pub mod figure;
pub mod population;
pub mod scroll;
pub mod stage;
pub mod walk;

pub use atlas::{Rect, SpriteAtlas};
pub use crowd::{Crowd, FrameStats};
pub use ease::Ease;
pub use figure::{Direction, Figure, FigureId};
pub use population::{Population, PopulationChange, target_population};
pub use scroll::{ScrollState, ScrollVelocity};
pub use stage::Stage;
pub use walk::{Traversal, WalkScheduler, WalkStatus};
