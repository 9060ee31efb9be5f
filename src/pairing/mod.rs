//! Dual pairings between shapes
//!
//! A pairing consumes a value of one shape together with a value of its dual
//! shape and hands the two payloads left inside them to a combining function.
//! Every pairing in this crate, from the primitive tuple/function case up to
//! whole program and interpreter trees, is an instance of [`Pairing`].
//!
//! Only one direction of each dual pair is ever written by hand. The mirrored
//! direction is [`Flip`], which swaps the arguments and the order in which the
//! combining function receives its payloads.

use std::marker::PhantomData;

pub mod primitives;

pub use primitives::*;

/// A pairing rule between a left shape `L` carrying an `A` and a right shape
/// `R` carrying a `B`.
///
/// Implementors are zero-sized rule types; the rule itself is the associated
/// function. Implementations must be total for every well-formed `L`/`R`.
pub trait Pairing<L, R, A, B> {
    /// Annihilate `left` against `right`, combining the payloads that remain.
    fn pair<C, F>(combine: F, left: L, right: R) -> C
    where
        F: FnOnce(A, B) -> C;
}

/// Swap the argument order of a combining function.
pub fn flip<A, B, C>(f: impl FnOnce(A, B) -> C) -> impl FnOnce(B, A) -> C {
    move |b, a| f(a, b)
}

/// The mirror image of the pairing `P`.
///
/// If `P` pairs `L` against `R`, then `Flip<P>` pairs `R` against `L` so that
/// `Flip::<P>::pair(flip(f), y, x) == P::pair(f, x, y)` for every input.
pub struct Flip<P>(PhantomData<P>);

impl<P, L, R, A, B> Pairing<R, L, B, A> for Flip<P>
where
    P: Pairing<L, R, A, B>,
{
    fn pair<C, F>(combine: F, left: R, right: L) -> C
    where
        F: FnOnce(B, A) -> C,
    {
        <P as Pairing<L, R, A, B>>::pair(flip(combine), right, left)
    }
}
