//! A two-command signature: ask a question and get a number back, or tell a
//! message and carry on.
//!
//! This is the smallest signature that has both kinds of command, one whose
//! continuation depends on the handler's response and one whose next program
//! is fixed up front. It serves as the reference collaborator for tests,
//! benches and demos.
//!
//! ```
//! use copair::ask_tell::{ask, AskTell, Responder};
//! use copair::{evaluate, Interpreter};
//!
//! let program = ask("a?").and_then(|a| ask("b?").map(move |b| a + b));
//! let interpreter: Interpreter<AskTell, u32> =
//!     Interpreter::unfold(0, |n| (n, Responder::new(move |_| (1, n + 1), move |_| n + 1)));
//!
//! assert_eq!(evaluate(program, interpreter, |v, s| (v, s)), (2, 2));
//! ```

use crate::pairing::{FunctionProduct, Identity, Pairing};
use crate::signature::CommandSet;
use crate::tree::Program;

/// Marker for the ask/tell signature.
pub struct AskTell;

/// The ask/tell command-sum.
pub enum Request<P> {
    /// Ask a question; the answer decides how the program continues.
    Ask {
        /// The question put to the handler.
        question: String,
        /// Continuation fed with the handler's answer.
        k: Box<dyn FnOnce(i64) -> P>,
    },
    /// Tell a message; the program continues with `next` whatever happens.
    Tell {
        /// The message handed to the handler.
        message: String,
        /// The rest of the program.
        next: P,
    },
}

/// The handler record dual to [`Request`].
pub struct Responder<I> {
    /// Answers a question and yields the next layer.
    pub ask: Box<dyn FnOnce(String) -> (i64, I)>,
    /// Receives a message and yields the next layer.
    pub tell: Box<dyn FnOnce(String) -> I>,
}

impl<I> Responder<I> {
    /// Box both handler entries.
    pub fn new(
        ask: impl FnOnce(String) -> (i64, I) + 'static,
        tell: impl FnOnce(String) -> I + 'static,
    ) -> Self {
        Self {
            ask: Box::new(ask),
            tell: Box::new(tell),
        }
    }
}

impl CommandSet for AskTell {
    type Command<P> = Request<P>;
    type Handlers<I> = Responder<I>;

    fn annihilate<P, I, C, F>(combine: F, command: Request<P>, handlers: Responder<I>) -> C
    where
        F: FnOnce(P, I) -> C,
    {
        match command {
            Request::Ask { question, k } => {
                let answered = (handlers.ask)(question);
                <FunctionProduct as Pairing<_, _, P, I>>::pair(combine, k, answered)
            }
            Request::Tell { message, next } => {
                let layer = (handlers.tell)(message);
                Identity::pair(combine, next, layer)
            }
        }
    }

    fn map<P, Q, F>(command: Request<P>, f: F) -> Request<Q>
    where
        P: 'static,
        Q: 'static,
        F: FnOnce(P) -> Q + 'static,
    {
        match command {
            Request::Ask { question, k } => Request::Ask {
                question,
                k: Box::new(move |answer| f(k(answer))),
            },
            Request::Tell { message, next } => Request::Tell {
                message,
                next: f(next),
            },
        }
    }

    fn into_next<P>(command: Request<P>) -> Option<P> {
        match command {
            Request::Ask { .. } => None,
            Request::Tell { next, .. } => Some(next),
        }
    }

    fn map_handlers<I, J, F>(handlers: Responder<I>, f: F) -> Responder<J>
    where
        I: 'static,
        J: 'static,
        F: FnOnce(I) -> J + Clone + 'static,
    {
        let Responder { ask, tell } = handlers;
        let g = f.clone();
        Responder::new(
            move |question| {
                let (answer, next) = ask(question);
                (answer, f(next))
            },
            move |message| g(tell(message)),
        )
    }
}

/// Ask `question` and finish with the answer.
pub fn ask(question: impl Into<String>) -> Program<AskTell, i64> {
    Program::lift(Request::Ask {
        question: question.into(),
        k: Box::new(|answer: i64| answer),
    })
}

/// Tell `message` and finish with `()`.
pub fn tell(message: impl Into<String>) -> Program<AskTell, ()> {
    Program::lift(Request::Tell {
        message: message.into(),
        next: (),
    })
}
