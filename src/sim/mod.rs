//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per rendered frame, run to completion
//! - Wall-clock time only through `GameSession::advance_clock`
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod announce;
pub mod body;
pub mod collision;
pub mod progression;
pub mod scene;
pub mod stamina;
pub mod state;
pub mod tick;

pub use announce::Announcement;
pub use collision::{BoundaryCheck, boundary_clamp, collect_fruits};
pub use progression::{LevelUp, Progression};
pub use scene::{BoxInstance, BoxKind, boxes};
pub use stamina::{RepeatingTimer, Stamina};
pub use state::{Fruit, GameEvent, GameSession};
pub use tick::{FrameOutcome, tick, velocity};
