// Command/handler signatures
//
// A signature ties a closed command-sum to the handler record dual to it and
// supplies the single-step rule that annihilates one against the other.

use crate::pairing::flip;

/// A closed set of commands and the total handler record dual to it.
///
/// `Command<P>` is the command-sum whose continuations produce a `P` (the rest
/// of the program). `Handlers<I>` holds exactly one entry per command variant;
/// each entry answers its command and yields an `I` (the next interpreter
/// layer). Adding a variant means adding one handler slot and one arm to
/// [`CommandSet::annihilate`], and nothing else.
pub trait CommandSet {
    /// The command-sum, parameterised over the rest of the program.
    type Command<P>;

    /// The handler record, parameterised over the next interpreter layer.
    type Handlers<I>;

    /// Single-step reduction: dispatch `command` to its handler, feed the
    /// response to the command's continuation if it has one, and combine the
    /// resulting program value with the next interpreter layer.
    ///
    /// Only the handler selected by the command may be invoked.
    fn annihilate<P, I, C, F>(combine: F, command: Self::Command<P>, handlers: Self::Handlers<I>) -> C
    where
        F: FnOnce(P, I) -> C;

    /// Post-compose `f` onto the command's continuation.
    fn map<P, Q, F>(command: Self::Command<P>, f: F) -> Self::Command<Q>
    where
        P: 'static,
        Q: 'static,
        F: FnOnce(P) -> Q + 'static;

    /// Post-compose `f` onto every handler's next-layer output.
    fn map_handlers<I, J, F>(handlers: Self::Handlers<I>, f: F) -> Self::Handlers<J>
    where
        I: 'static,
        J: 'static,
        F: FnOnce(I) -> J + Clone + 'static;

    /// Move the fixed next program out of a command that carries one.
    ///
    /// Long programs are torn down through this hook one node at a time.
    /// Commands whose continuation waits on a response have nothing to hand
    /// over and return `None`, which is also the default.
    fn into_next<P>(command: Self::Command<P>) -> Option<P> {
        drop(command);
        None
    }

    /// Handler-first single-step reduction, derived from [`CommandSet::annihilate`].
    fn coannihilate<P, I, C, F>(combine: F, handlers: Self::Handlers<I>, command: Self::Command<P>) -> C
    where
        F: FnOnce(I, P) -> C,
    {
        Self::annihilate::<P, I, C, _>(flip(combine), command, handlers)
    }
}
