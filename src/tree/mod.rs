//! The two recursive trees that reduce against each other: programs built from
//! commands and interpreters built from handler layers.

mod chain;
pub mod interpreter;
pub mod program;

pub use chain::Suspension;
pub use interpreter::Interpreter;
pub use program::Program;
