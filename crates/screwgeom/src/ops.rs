//! Geometric operations

use crate::algebraic_ops::Reverse;

/// Apply a rotor, translator or motor to a primitive (the sandwich product `g x g̃`)
///
/// Group elements implement `Conjugate<T>` for every primitive type `T` they can move.
/// Besides single elements, two batched forms are provided.
/// Both factor the sandwich product once per call
/// and then spend a handful of multiply-adds per element:
///
/// * [conjugate_in_place](Conjugate::conjugate_in_place) transforms a slice in place
/// * [conjugate_into](Conjugate::conjugate_into) reads one slice and writes another
///
/// The borrow checker guarantees that the two slices of `conjugate_into` do not overlap,
/// so the only possible aliasing is the in-place form.
///
/// ```
/// use screwgeom::re3::*;
/// use screwgeom::ops::*;
///
/// let t = Translator::new(2., 1., 0., 0.);
/// let mut points = [Point::new(0., 0., 0.), Point::new(1., 1., 1.)];
/// t.conjugate_in_place(&mut points);
/// assert_eq!(points[0], Point::new(2., 0., 0.));
/// assert_eq!(points[1], Point::new(3., 1., 1.));
/// ```
///
/// The group element must be normalized;
/// an unnormalized one produces a geometrically meaningless result.
pub trait Conjugate<T> {
    fn conjugate(&self, x: T) -> T;

    fn conjugate_in_place(&self, xs: &mut [T]);

    /// # Panics
    ///
    /// Panics if `input` and `output` have different lengths.
    fn conjugate_into(&self, input: &[T], output: &mut [T]);
}

/// Transform element A by rotor, translator, or motor B
///
/// `x.transform(g)` is the same as `g.conjugate(x)`,
/// written with the primitive first.
pub trait Transform<T> {
    type Output;
    fn transform(self, r: T) -> Self::Output;
}

impl<T, G: Conjugate<T>> Transform<G> for T {
    type Output = T;
    fn transform(self, r: G) -> T {
        r.conjugate(self)
    }
}

/// Apply, to element A, the inverse of the transformation described by B
///
/// In other words, `a.transform_inverse(b)` is equivalent to
/// `a.transform(b.inverse_transformation())` for normalized `b`
pub trait TransformInverse<T> {
    type Output;
    fn transform_inverse(self, r: T) -> Self::Output;
}

impl<T, G: Conjugate<T> + Reverse> TransformInverse<G> for T {
    type Output = T;
    fn transform_inverse(self, r: G) -> T {
        r.reverse().conjugate(self)
    }
}

/// Combine two transformations into one which performs A and then B
///
/// `a.compose(b)` is the same as the geometric product `b * a`.
pub trait Compose<T> {
    type Output;
    fn compose(self, r: T) -> Self::Output;
}

/// The transformation which undoes this one
pub trait InverseTransformation {
    type Output;
    fn inverse_transformation(self) -> Self::Output;
}

/// The transformation which does nothing
pub trait IdentityTransformation {
    fn identity_transformation() -> Self;
}

/// The square of the [Norm]
///
/// This avoids the square root and is therefore available without `std`.
pub trait NormSquared {
    fn norm_squared(self) -> f32;
}

/// The magnitude of an element
///
/// * For a plane, the length of its normal vector
/// * For a direction, its length
/// * For a branch or line, the magnitude of its Euclidean part
/// * For a rotor, `√(r r̃)`
#[cfg(feature = "std")]
pub trait Norm: NormSquared {
    fn norm(self) -> f32;
}

/// Homogeneously scale an element so that its [Norm] is 1
///
/// For points, this instead divides by the homogeneous weight so that `w = 1`.
///
/// Rotors, motors and lines normalize with the fast reciprocal square root
/// (see [rsqrt](crate::scalar::rsqrt)),
/// so their result is unit only to within about 5e-6.
/// Long chains of products drift away from unit norm
/// and should be renormalized periodically.
pub trait Normalized {
    fn normalized(self) -> Self;
}

/// Flip the sign of a rotor or motor so that its scalar part is non-negative
///
/// `g` and `-g` perform the same motion;
/// the constrained one takes the shorter way around.
/// [Log](crate::algebraic_ops::Log) constrains its input before taking the logarithm.
pub trait Constrained {
    fn constrained(self) -> Self;
}
