//! Operation handling: command generation and process invocation

pub mod formatter;
pub mod runner;

pub use formatter::{format_command, Operation, RuntimeCommand, RUNTIME};
pub use runner::execute;
