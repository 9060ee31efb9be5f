//! Interpreter trees
//!
//! Each [`Interpreter`] layer is an annotation (the interpreter's state at
//! that point) together with a handler record. Handling a command answers it
//! and produces the next layer, so the tree unfolds one layer per command.

use std::fmt;
use std::rc::Rc;

use crate::signature::CommandSet;

/// One layer of an interpreter for the command signature `S`, annotated with a `B`.
pub struct Interpreter<S: CommandSet, B> {
    annotation: B,
    handlers: S::Handlers<Interpreter<S, B>>,
}

impl<S: CommandSet, B> Interpreter<S, B> {
    /// Build a layer from its annotation and the handlers for the next command.
    pub fn new(annotation: B, handlers: S::Handlers<Interpreter<S, B>>) -> Self {
        Self { annotation, handlers }
    }

    /// The state recorded at this layer.
    pub fn annotation(&self) -> &B {
        &self.annotation
    }

    /// The handler record for the next command.
    pub fn handlers(&self) -> &S::Handlers<Interpreter<S, B>> {
        &self.handlers
    }

    /// Split the layer into its annotation and handler record.
    pub fn into_parts(self) -> (B, S::Handlers<Interpreter<S, B>>) {
        (self.annotation, self.handlers)
    }

    /// Drop the handlers, keeping only the annotation.
    pub fn into_annotation(self) -> B {
        self.annotation
    }
}

impl<S, B> Interpreter<S, B>
where
    S: CommandSet + 'static,
    B: 'static,
{
    /// Lazily unfold an interpreter from a seed.
    ///
    /// `coalgebra` maps a seed to the layer's annotation and a handler record
    /// whose entries yield the seed of the following layer. Layers are only
    /// built when a handler actually runs.
    pub fn unfold<T, G>(seed: T, coalgebra: G) -> Self
    where
        T: 'static,
        G: Fn(T) -> (B, S::Handlers<T>) + 'static,
    {
        Self::unfold_shared(seed, Rc::new(coalgebra))
    }

    fn unfold_shared<T, G>(seed: T, coalgebra: Rc<G>) -> Self
    where
        T: 'static,
        G: Fn(T) -> (B, S::Handlers<T>) + 'static,
    {
        let (annotation, handlers) = coalgebra(seed);
        let handlers = S::map_handlers::<T, Self, _>(handlers, move |next| Self::unfold_shared(next, coalgebra));
        Self { annotation, handlers }
    }
}

impl<S: CommandSet, B: fmt::Debug> fmt::Debug for Interpreter<S, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("annotation", &self.annotation)
            .finish_non_exhaustive()
    }
}
