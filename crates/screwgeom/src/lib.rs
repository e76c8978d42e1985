#![cfg_attr(not(feature = "std"), no_std)]

//! screwgeom is a kernel for rigid motions in 3D, built on projective geometric algebra.
//!
//! It provides [planes](re3::Plane), [points](re3::Point) and [directions](re3::Direction),
//! the motions that act on them
//! ([rotors](re3::Rotor), [translators](re3::Translator) and [motors](re3::Motor)),
//! and the generators of those motions ([branches](re3::Branch) and [lines](re3::Line)).
//!
//! ```
//! use screwgeom::re3::*;
//! use screwgeom::ops::*;
//!
//! // Rotate a quarter turn about the z axis, then slide 2 units along x
//! let m = Translator::new(2., 1., 0., 0.) * Rotor::new(core::f32::consts::FRAC_PI_2, 0., 0., 1.);
//! let p = Point::new(1., 0., 0.).transform(m);
//! assert!((p.x() - 2.).abs() < 1e-6);
//! assert!((p.y() - 1.).abs() < 1e-6);
//! ```
//!
//! Motions compose with `*` (right to left, like matrices)
//! and are applied to primitives with [Transform](ops::Transform)
//! or, for whole slices at once, with [Conjugate](ops::Conjugate).
//! The batched forms factor the motion once and then spend
//! a handful of multiply-adds per primitive.
//!
//! The [exponential and logarithm](exp_log) move between a motion and its generator.
//! Scaling a generator scales the motion, which is how motions are interpolated.
//! Both maps have removable singularities
//! (at zero rotation and at pure translations)
//! that are evaluated with Taylor series rather than divided through.
//!
//! Every entity is a plain `Copy` struct of one or two `[f32; 4]` packs,
//! 16-byte aligned, with a documented lane order.
//! screwgeom does not use SIMD intrinsics;
//! its [kernels](kernel) are written as lane-wise expressions
//! that the compiler can map onto SIMD registers.
//!
//! screwgeom is `no_std`-compatible.
//! Without the `std` feature, everything that needs `sin`, `cos`, `atan2` or `sqrt`
//! (angle/axis constructors, exp and log, norms) is unavailable;
//! normalization and square roots of motions remain, since they use a portable
//! [reciprocal square root](scalar::rsqrt).

/// Generate lane accessors, reversion and linear operators for entity structs
///
/// Each struct tagged with `#[lanes(...)]` names the basis blade of every lane
/// of its `[f32; 4]` packs:
///
/// ```
/// use screwgeom::entities;
/// use screwgeom::algebraic_ops::Reverse;
///
/// entities! {
///     // `_` marks a lane that is always zero.
///     // A lane may have a plain name and a blade name, separated by `|`.
///     // The scalar lane is called `scalar`.
///     #[lanes(p1 = [scalar, e23, e31, e12])]
///     #[derive(Clone, Copy, Debug, PartialEq)]
///     pub struct Spinor {
///         p1: [f32; 4],
///     }
/// }
///
/// let s = Spinor { p1: [1., 2., 3., 4.] };
/// assert_eq!(s.e13(), -3.);
/// assert_eq!(s.reverse(), Spinor { p1: [1., -2., -3., -4.] });
/// assert_eq!((s + s) * 0.5, s);
/// ```
///
/// The macro emits the items verbatim (without the `#[lanes]` attribute)
/// followed by the generated `impl` blocks.
/// [Reverse](algebraic_ops::Reverse) must be in scope where it is invoked.
pub use screwgeom_macros::entities;

pub mod algebraic_ops;
pub mod error;
pub mod exp_log;
pub mod kernel;
pub mod mat;
mod motion;
pub mod ops;
pub mod re3;
pub mod scalar;
