// Primitive pairings
//
// The atomic dual shapes every command/handler encoding reduces to: a bare
// value against a bare value, a tuple against a function, and a two-way sum
// against a two-slot product.

use std::marker::PhantomData;

use super::{Flip, Pairing};

/// Pairs two bare values by handing both straight to the combining function.
pub struct Identity;

impl<A, B> Pairing<A, B, A, B> for Identity {
    fn pair<C, F>(combine: F, left: A, right: B) -> C
    where
        F: FnOnce(A, B) -> C,
    {
        combine(left, right)
    }
}

/// Pairs a product `(x, a)` with a function `g`: the function is driven by
/// `x` and its output is combined with `a`.
pub struct ProductFunction;

impl<X, A, B, G> Pairing<(X, A), G, A, B> for ProductFunction
where
    G: FnOnce(X) -> B,
{
    fn pair<C, F>(combine: F, left: (X, A), right: G) -> C
    where
        F: FnOnce(A, B) -> C,
    {
        let (x, a) = left;
        let b = right(x);
        combine(a, b)
    }
}

/// Function on the left, product on the right.
pub type FunctionProduct = Flip<ProductFunction>;

/// A two-way sum, dual to a two-slot product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sum<L, R> {
    /// Selects the first slot of the dual product.
    Left(L),
    /// Selects the second slot of the dual product.
    Right(R),
}

/// Pairs `Sum<L1, L2>` with `(R1, R2)`. The active variant selects its slot
/// and is paired against it with `P1` or `P2`; the other slot is dropped
/// without being touched.
pub struct SumProduct<P1, P2>(PhantomData<(P1, P2)>);

impl<P1, P2, L1, L2, R1, R2, A, B> Pairing<Sum<L1, L2>, (R1, R2), A, B> for SumProduct<P1, P2>
where
    P1: Pairing<L1, R1, A, B>,
    P2: Pairing<L2, R2, A, B>,
{
    fn pair<C, F>(combine: F, left: Sum<L1, L2>, right: (R1, R2)) -> C
    where
        F: FnOnce(A, B) -> C,
    {
        let (first, second) = right;
        match left {
            Sum::Left(l) => <P1 as Pairing<L1, R1, A, B>>::pair(combine, l, first),
            Sum::Right(l) => <P2 as Pairing<L2, R2, A, B>>::pair(combine, l, second),
        }
    }
}

/// Product on the left, sum on the right.
pub type ProductSum<P1, P2> = Flip<SumProduct<P1, P2>>;
