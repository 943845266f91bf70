//! Platform abstraction layer
//!
//! Keyboard-to-intent mapping lives here so the browser shell and the
//! native harness drive the sim through the same code.

pub mod input;

pub use input::InputState;
