//! Tree reduction
//!
//! Reduction pairs a [`Program`] against an [`Interpreter`] by repeatedly
//! applying the signature's single-step rule until the program reaches its
//! value. It is a plain loop over the current (program, interpreter layer)
//! pair, so stack usage does not grow with program length.
//!
//! ```text
//!        Running --annihilate--> Running
//!           |                       |
//!           +-------> Terminal <----+
//!                        |
//!                   combine(value, annotation)
//! ```

use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::pairing::Pairing;
use crate::signature::CommandSet;
use crate::tree::{Interpreter, Program};

/// The reduction state machine.
pub enum Reduction<S: CommandSet, A, B> {
    /// A command is pending against the current interpreter layer.
    Running {
        /// The pending command.
        command: Box<S::Command<Program<S, A>>>,
        /// The layer that will handle it.
        interpreter: Interpreter<S, B>,
    },
    /// The program has reached its value.
    Terminal {
        /// The program's value.
        value: A,
        /// The annotation of the last interpreter layer reached.
        state: B,
    },
}

impl<S: CommandSet, A, B> Reduction<S, A, B> {
    /// Start reducing `program` against `interpreter`. Queued binds are
    /// flattened first, so a running state always holds a command.
    pub fn new(program: Program<S, A>, interpreter: Interpreter<S, B>) -> Self {
        let mut program = program;
        loop {
            match program {
                Program::Done(value) => {
                    return Reduction::Terminal {
                        value,
                        state: interpreter.into_annotation(),
                    }
                }
                Program::Step(command) => return Reduction::Running { command, interpreter },
                Program::Bind(suspension) => program = suspension.resolve(),
            }
        }
    }

    /// Advance by exactly one single-step reduction. Terminal states are left unchanged.
    pub fn step(self) -> Self {
        match self {
            Reduction::Running { command, interpreter } => {
                let (_, handlers) = interpreter.into_parts();
                let (program, next) = S::annihilate::<Program<S, A>, Interpreter<S, B>, _, _>(
                    |program, layer| (program, layer),
                    *command,
                    handlers,
                );
                Reduction::new(program, next)
            }
            terminal @ Reduction::Terminal { .. } => terminal,
        }
    }

    /// Whether the program has reached its value.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Reduction::Terminal { .. })
    }

    /// Combine the value and final state, or hand the running state back.
    pub fn finish<C, F>(self, combine: F) -> Result<C, Self>
    where
        F: FnOnce(A, B) -> C,
    {
        match self {
            Reduction::Terminal { value, state } => Ok(combine(value, state)),
            running @ Reduction::Running { .. } => Err(running),
        }
    }
}

impl<S: CommandSet, A: fmt::Debug, B: fmt::Debug> fmt::Debug for Reduction<S, A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reduction::Running { interpreter, .. } => f
                .debug_struct("Running")
                .field("state", interpreter.annotation())
                .finish_non_exhaustive(),
            Reduction::Terminal { value, state } => f
                .debug_struct("Terminal")
                .field("value", value)
                .field("state", state)
                .finish(),
        }
    }
}

/// Pairs a whole [`Program`] against a whole [`Interpreter`].
pub struct TreeReducer<S>(PhantomData<S>);

impl<S: CommandSet, A, B> Pairing<Program<S, A>, Interpreter<S, B>, A, B> for TreeReducer<S> {
    fn pair<C, F>(combine: F, left: Program<S, A>, right: Interpreter<S, B>) -> C
    where
        F: FnOnce(A, B) -> C,
    {
        let mut reduction = Reduction::new(left, right);
        let mut steps: u64 = 0;
        loop {
            match reduction {
                Reduction::Terminal { value, state } => {
                    trace!(steps, "reduction reached a value");
                    return combine(value, state);
                }
                running => {
                    steps += 1;
                    trace!(steps, "annihilate");
                    reduction = running.step();
                }
            }
        }
    }
}

/// Reduce `program` against `interpreter` to completion and combine the
/// program's value with the interpreter's final annotation.
///
/// Diverges if the program never finishes.
pub fn evaluate<S, A, B, C, F>(program: Program<S, A>, interpreter: Interpreter<S, B>, combine: F) -> C
where
    S: CommandSet,
    F: FnOnce(A, B) -> C,
{
    <TreeReducer<S> as Pairing<Program<S, A>, Interpreter<S, B>, A, B>>::pair(combine, program, interpreter)
}
