// Bind chains
//
// `and_then` and `then` never nest a program inside another continuation.
// They push onto a flat queue of continuations hanging off one head program,
// so a left-nested fold of binds is a single queue rather than a tower of
// wrapped closures. Values cross the queue type-erased; every continuation
// is pushed by a typed bind that knows what it will receive, so the
// downcasts below always succeed.
//
// Resolution walks the queue in a loop and re-associates nested chains as it
// meets them. Teardown walks it the same way, so neither grows the stack
// with the length of the program.

use std::any::Any;
use std::collections::VecDeque;
use std::mem;

use crate::signature::CommandSet;

use super::program::Program;

/// A type-erased program value.
pub(crate) type Erased = Box<dyn Any>;

pub(crate) enum Continuation<S: CommandSet> {
    /// Discard the incoming value and carry on with a fixed program.
    Then(Program<S, Erased>),
    /// Feed the incoming value to a function.
    Bind(Box<dyn FnOnce(Erased) -> Program<S, Erased>>),
}

impl<S: CommandSet> Continuation<S> {
    fn resume(self, value: Erased) -> Program<S, Erased> {
        match self {
            Continuation::Then(next) => next,
            Continuation::Bind(f) => f(value),
        }
    }
}

/// A head program followed by the continuations waiting on its value.
pub(crate) struct Chain<S: CommandSet> {
    head: Program<S, Erased>,
    queue: VecDeque<Continuation<S>>,
}

impl<S: CommandSet> Chain<S> {
    pub(crate) fn new(head: Program<S, Erased>) -> Self {
        Self {
            head,
            queue: VecDeque::new(),
        }
    }

    pub(crate) fn push(&mut self, continuation: Continuation<S>) {
        self.queue.push_back(continuation);
    }

    fn into_parts(mut self) -> (Program<S, Erased>, VecDeque<Continuation<S>>) {
        let head = mem::replace(&mut self.head, vacant());
        let queue = mem::take(&mut self.queue);
        (head, queue)
    }
}

impl<S: CommandSet> Drop for Chain<S> {
    fn drop(&mut self) {
        let mut pending = vec![mem::replace(&mut self.head, vacant())];
        let mut queue = mem::take(&mut self.queue);
        loop {
            if let Some(program) = pending.pop() {
                match program {
                    Program::Done(_) => {}
                    Program::Step(command) => pending.extend(S::into_next(*command)),
                    Program::Bind(suspension) => {
                        let (head, inner) = suspension.into_chain().into_parts();
                        pending.push(head);
                        queue.extend(inner);
                    }
                }
            } else if let Some(continuation) = queue.pop_front() {
                if let Continuation::Then(next) = continuation {
                    pending.push(next);
                }
            } else {
                break;
            }
        }
    }
}

fn vacant<S: CommandSet>() -> Program<S, Erased> {
    Program::Done(Box::new(()))
}

/// Recover a value boxed by a typed bind.
pub(crate) fn downcast<A: 'static>(value: Erased) -> A {
    match value.downcast::<A>() {
        Ok(value) => *value,
        Err(_) => unreachable!("bind chain value does not have the type its continuation was built for"),
    }
}

fn keep(value: Erased) -> Erased {
    value
}

trait Suspended<S: CommandSet, A> {
    fn into_chain(self: Box<Self>) -> Chain<S>;
    fn resolve(self: Box<Self>) -> Program<S, A>;
}

struct Bound<S: CommandSet, A> {
    chain: Chain<S>,
    finish: fn(Erased) -> A,
}

impl<S, A> Suspended<S, A> for Bound<S, A>
where
    S: CommandSet + 'static,
    A: 'static,
{
    fn into_chain(self: Box<Self>) -> Chain<S> {
        self.chain
    }

    fn resolve(self: Box<Self>) -> Program<S, A> {
        let Bound { chain, finish } = *self;
        let (mut head, mut queue) = chain.into_parts();
        loop {
            match head {
                Program::Bind(suspension) => {
                    let (inner_head, inner) = suspension.into_chain().into_parts();
                    for continuation in inner.into_iter().rev() {
                        queue.push_front(continuation);
                    }
                    head = inner_head;
                }
                Program::Done(value) => match queue.pop_front() {
                    Some(continuation) => head = continuation.resume(value),
                    None => return Program::Done(finish(value)),
                },
                Program::Step(command) => {
                    let command = S::map::<Program<S, Erased>, Program<S, A>, _>(*command, move |next| {
                        Program::Bind(Suspension::new(Chain { head: next, queue }, finish))
                    });
                    return Program::Step(Box::new(command));
                }
            }
        }
    }
}

/// Pending binds waiting on a program's value.
///
/// Built by [`Program::and_then`] and friends; reduction flattens it before
/// every step.
pub struct Suspension<S: CommandSet, A>(Box<dyn Suspended<S, A>>);

impl<S: CommandSet, A> Suspension<S, A> {
    pub(crate) fn into_chain(self) -> Chain<S> {
        self.0.into_chain()
    }

    /// Run queued continuations until a command or the final value is exposed.
    pub(crate) fn resolve(self) -> Program<S, A> {
        self.0.resolve()
    }
}

impl<S, A> Suspension<S, A>
where
    S: CommandSet + 'static,
    A: 'static,
{
    fn new(chain: Chain<S>, finish: fn(Erased) -> A) -> Self {
        Suspension(Box::new(Bound { chain, finish }))
    }

    pub(crate) fn typed(chain: Chain<S>) -> Self {
        Self::new(chain, downcast::<A>)
    }
}

impl<S: CommandSet + 'static> Suspension<S, Erased> {
    /// A chain viewed as an erased program whose value stays boxed.
    pub(crate) fn raw(chain: Chain<S>) -> Self {
        Self::new(chain, keep)
    }
}
