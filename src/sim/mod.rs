//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (newest object first)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod falling;
pub mod paddle;
pub mod progression;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::Rect;
pub use falling::{FallingField, FallingObject};
pub use paddle::Paddle;
pub use progression::Progression;
pub use state::{GameEvent, GameSession, SessionClock};
pub use tick::{TickInput, tick};
