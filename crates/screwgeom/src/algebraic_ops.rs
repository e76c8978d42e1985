//! Low-level geometric algebra operations
//!
//! These are named after their algebraic meaning.
//! For code that reads like geometry, prefer the traits in the [ops](crate::ops) module
//! (e.g. `point.transform(motor)` over spelling out `m p m̃`.)

/// The reverse operator Ã
///
/// Reversion negates the grade-2 and grade-3 parts of an element.
/// For a normalized rotor or motor, the reverse is also its inverse.
/// Applying it twice is always the identity, bit for bit.
pub trait Reverse {
    fn reverse(self) -> Self;
}

/// The exponential map from a generator to the group element it generates
///
/// * [Branch](crate::re3::Branch) → [Rotor](crate::re3::Rotor)
/// * [Line](crate::re3::Line) → [Motor](crate::re3::Motor)
///
/// A generator encodes *half* of the motion it produces:
/// the branch `(θ/2)·axis` exponentiates to a rotation by `θ`.
pub trait Exp {
    type Output;
    fn exp(self) -> Self::Output;
}

/// The logarithm map from a group element back to its generator
///
/// This is the inverse of [Exp] up to sign:
/// the input is [constrained](crate::ops::Constrained) first,
/// so the recovered half-angle lies in `[0, π/2]`
/// and the generator describes a rotation of at most `π` either way.
/// `g` and `-g` perform the same motion, so `exp(log(g))` is `g` or `-g`.
/// The input is expected to be normalized.
pub trait Log {
    type Output;
    fn log(self) -> Self::Output;
}

/// The square root of a group element, or `None` if it has no well-defined one
///
/// `g.partial_sqrt()` performs half of the motion that `g` performs.
/// It is `None` exactly when `1 + g` vanishes,
/// i.e. for the rotor (or motor) equal to `-1`.
pub trait PartialSqrt: Sized {
    type Output;
    fn partial_sqrt(self) -> Option<Self::Output>;
}

/// The total version of [PartialSqrt]
///
/// At the degenerate input, this returns the zero element
/// rather than panicking or producing NaNs.
pub trait Sqrt: PartialSqrt {
    fn sqrt(self) -> Self::Output;
}
