//! Process-level helpers for the console binary

pub mod signals;
pub mod stdin;

pub use signals::shutdown_signal;
pub use stdin::spawn_stdin_reader;
