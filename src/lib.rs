//! Dual pairing of programs against interpreters
//!
//! A program is a chain of commands, each with a continuation that produces
//! the rest of the program. An interpreter is a chain of layers, each holding
//! a state annotation and a handler record with one entry per command. The two
//! are structurally dual: pairing a command against its handler record
//! answers the command and advances both chains by one layer.
//!
//! [`evaluate`] repeats that single step until the program reaches its value,
//! then combines the value with the final interpreter annotation. The
//! primitive pairings it is built from live in [`pairing`]; command sets plug
//! in through [`CommandSet`].

pub mod ask_tell;
pub mod config;
pub mod error;
pub mod pairing;
pub mod reducer;
pub mod runner;
pub mod signature;
pub mod tree;

// Re-export main APIs
pub use config::RunnerConfig;
pub use error::{ReductionError, Result};
pub use pairing::{flip, Flip, Pairing};
pub use reducer::{evaluate, Reduction, TreeReducer};
pub use runner::{Outcome, ReductionStats, Runner};
pub use signature::CommandSet;
pub use tree::{Interpreter, Program};
