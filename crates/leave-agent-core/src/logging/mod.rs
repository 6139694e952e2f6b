//! Runtime-agnostic logging
//!
//! Components log through an injected [`SharedLogger`] rather than a global
//! subscriber, so tests can capture output with [`MemoryLogger`] and the CLI
//! decides the level once at startup.

mod console;
mod memory;
mod noop;
mod traits;

pub use console::ConsoleLogger;
pub use memory::MemoryLogger;
pub use noop::NoOpLogger;
pub use traits::{LogLevel, Logger, SharedLogger};
