//! Toastline demo - library half of the `toastline-demo` binary.
//!
//! - `args` - command-line parsing and option assembly
//! - `logging` - optional file logging
//! - `app` - key bindings, mouse handling and rendering

pub mod app;
pub mod args;
pub mod logging;

pub use app::{Control, DemoApp};
pub use args::{Cli, LogLevel, PositionArg};
