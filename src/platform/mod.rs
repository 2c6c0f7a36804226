//! Platform abstraction layer
//!
//! The game core only emits `Effect`s; platforms execute them:
//! - `input`: key/control mapping shared by every platform
//! - `headless`: simulated clock and timers for native runs and tests

pub mod headless;
pub mod input;

pub use headless::{HeadlessRunner, RunReport};
pub use input::{Control, InputSource, InputState, key_action};
