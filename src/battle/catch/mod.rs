//! Capture and escape rolls. Both only apply to wild battles.

pub mod calculation;
pub mod escape;

pub use calculation::*;
pub use escape::*;
