#![forbid(unsafe_code)]

pub mod evaluation;
pub mod mentor;
pub mod model;
pub mod progression;
pub mod selector;
pub mod time;

pub use progression::{Phase, ProgressionError, SessionState};
pub use time::Clock;
