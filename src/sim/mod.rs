//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time is passed in, never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod presence;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{CatchResult, catch_test};
pub use presence::{Presence, PresenceEdge};
pub use spawner::{SpawnRequest, SpawnTimer, Spawner};
pub use state::{Ball, Catcher, GameEvent, GameState, Particle};
pub use tick::{TickInput, tick};
