//! Program trees
//!
//! A [`Program`] is either a finished value or one pending command whose
//! continuation yields the rest of the program. The rest is only built when
//! the continuation runs, so arbitrarily long (even unbounded) programs cost
//! nothing until they are reduced.
//!
//! Sequencing with [`Program::and_then`] or [`Program::then`] produces a
//! [`Program::Bind`]: the continuation is queued rather than composed into the
//! pending command, so binds nest to any depth in either direction without
//! deepening the stack when the program is reduced or dropped.

use std::fmt;

use crate::signature::CommandSet;

use super::chain::{downcast, Chain, Continuation, Erased, Suspension};

/// A program over the command signature `S` that finishes with an `A`.
pub enum Program<S: CommandSet, A> {
    /// The program has finished with this value.
    Done(A),
    /// One command is pending; its continuation produces the next node.
    Step(Box<S::Command<Program<S, A>>>),
    /// A program followed by queued continuations, flattened during reduction.
    Bind(Suspension<S, A>),
}

impl<S: CommandSet, A> Program<S, A> {
    /// A program that performs no commands.
    pub fn done(value: A) -> Self {
        Program::Done(value)
    }

    /// A program whose first command is `command`.
    pub fn step(command: S::Command<Program<S, A>>) -> Self {
        Program::Step(Box::new(command))
    }

    /// Whether the program has already reached its value. Queued binds are
    /// not run, so a [`Program::Bind`] is never done.
    pub fn is_done(&self) -> bool {
        matches!(self, Program::Done(_))
    }

    /// The finished value, if there is one.
    pub fn value(&self) -> Option<&A> {
        match self {
            Program::Done(value) => Some(value),
            Program::Step(_) | Program::Bind(_) => None,
        }
    }

    /// Run queued binds until the program is [`Program::Done`] or
    /// [`Program::Step`]. No command is performed.
    pub fn resolve(self) -> Self {
        let mut program = self;
        loop {
            match program {
                Program::Bind(suspension) => program = suspension.resolve(),
                exposed => return exposed,
            }
        }
    }
}

impl<S, A> Program<S, A>
where
    S: CommandSet + 'static,
    A: 'static,
{
    /// A one-command program whose value is the command's own result.
    pub fn lift(command: S::Command<A>) -> Self {
        Program::Step(Box::new(S::map::<A, Program<S, A>, _>(command, Program::Done)))
    }

    /// Run `f` on the value of this program and continue with the program it
    /// returns.
    pub fn and_then<B, F>(self, f: F) -> Program<S, B>
    where
        B: 'static,
        F: FnOnce(A) -> Program<S, B> + 'static,
    {
        match self {
            Program::Done(value) => f(value),
            pending => {
                let resume = move |value: Erased| f(downcast::<A>(value)).erase();
                pending.push(Continuation::Bind(Box::new(resume)))
            }
        }
    }

    /// Transform the final value of this program.
    pub fn map<B, F>(self, f: F) -> Program<S, B>
    where
        B: 'static,
        F: FnOnce(A) -> B + 'static,
    {
        self.and_then(move |value| Program::Done(f(value)))
    }

    /// Run `next` after this program, discarding this program's value.
    pub fn then<B: 'static>(self, next: Program<S, B>) -> Program<S, B> {
        match self {
            Program::Done(_) => next,
            pending => pending.push(Continuation::Then(next.erase())),
        }
    }

    fn push<B: 'static>(self, continuation: Continuation<S>) -> Program<S, B> {
        let mut chain = match self {
            Program::Bind(suspension) => suspension.into_chain(),
            head => Chain::new(head.erase()),
        };
        chain.push(continuation);
        Program::Bind(Suspension::typed(chain))
    }

    /// The same program with its value boxed, for use inside a bind chain.
    fn erase(self) -> Program<S, Erased> {
        match self {
            Program::Done(value) => Program::Done(Box::new(value)),
            Program::Step(command) => {
                let command = S::map::<Program<S, A>, Program<S, Erased>, _>(*command, Program::<S, A>::erase);
                Program::Step(Box::new(command))
            }
            Program::Bind(suspension) => Program::Bind(Suspension::raw(suspension.into_chain())),
        }
    }
}

impl<S: CommandSet, A: fmt::Debug> fmt::Debug for Program<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Program::Done(value) => f.debug_tuple("Done").field(value).finish(),
            Program::Step(_) => f.write_str("Step(..)"),
            Program::Bind(_) => f.write_str("Bind(..)"),
        }
    }
}
