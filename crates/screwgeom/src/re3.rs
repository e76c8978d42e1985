//! Rigid Euclidean 3D geometry
//!
//! This module contains the primitives (planes, points, directions)
//! and the motions (rotors, translators, motors) of 3D projective geometric algebra,
//! plus the generators (branches, lines) that connect the two through
//! [exp](crate::algebraic_ops::Exp) and [log](crate::algebraic_ops::Log).
//!
//! Every entity is one or two packs of four `f32` lanes,
//! 16-byte aligned, with a fixed lane order documented on each struct.
//! A slice of entities is therefore a tightly packed array of floats
//! with a stride of exactly one entity.
//!
//! Each lane can be read back by the name of its basis blade.
//! Every spelling of a blade is available and carries the sign of its permutation:
//!
//! ```
//! use screwgeom::re3::*;
//!
//! let b = Branch::new(1., 2., 3.);
//! assert_eq!(b.e12(), 3.);
//! assert_eq!(b.e21(), -3.);
//! ```

use crate::algebraic_ops::Reverse;
use crate::error::NormalizationError;
use crate::kernel;
use crate::ops::*;
use crate::scalar::{abs, rsqrt, NORMALIZATION_TOLERANCE};
use screwgeom_macros::entities;

entities! {
    /// An oriented plane `a x + b y + c z + d = 0`
    ///
    /// Lanes: `p0 = [d, a, b, c]` on `e0, e1, e2, e3`.
    ///
    /// A plane with a unit normal (`a² + b² + c² = 1`) is normalized;
    /// its `d` is then the signed distance from the origin.
    #[lanes(p0 = [d | e0, a | e1, b | e2, c | e3])]
    #[repr(C, align(16))]
    #[derive(Clone, Copy, Default, Debug, PartialEq)]
    pub struct Plane {
        pub p0: [f32; 4],
    }

    /// A point in space
    ///
    /// Lanes: `p3 = [w, x, y, z]` on `e123, e032, e013, e021`.
    ///
    /// Points are homogeneous: `(x, y, z, w)` and `(2x, 2y, 2z, 2w)` are the same point.
    /// A normalized point has `w = 1`.
    #[lanes(p3 = [w | e123, x | e032, y | e013, z | e021])]
    #[repr(C, align(16))]
    #[derive(Clone, Copy, Default, Debug, PartialEq)]
    pub struct Point {
        pub p3: [f32; 4],
    }

    /// A point at infinity, used as a free vector
    ///
    /// Lanes: `p3 = [0, x, y, z]` on `e123, e032, e013, e021`.
    /// The homogeneous weight is always zero,
    /// so translations leave directions unchanged.
    #[lanes(p3 = [_, x | e032, y | e013, z | e021])]
    #[repr(C, align(16))]
    #[derive(Clone, Copy, Default, Debug, PartialEq)]
    pub struct Direction {
        pub p3: [f32; 4],
    }

    /// The generator of a rotation about an axis through the origin
    ///
    /// Lanes: `p1 = [0, e23, e31, e12]`.
    ///
    /// The branch `(θ/2)·axis` [exponentiates](crate::algebraic_ops::Exp)
    /// to the rotor that rotates by `θ` about `axis`.
    #[lanes(p1 = [_, e23, e31, e12])]
    #[repr(C, align(16))]
    #[derive(Clone, Copy, Default, Debug, PartialEq)]
    pub struct Branch {
        pub p1: [f32; 4],
    }

    /// A line, and the generator of a screw motion about it
    ///
    /// Lanes: `p1 = [0, e23, e31, e12]` (the Euclidean part, i.e. the direction)
    /// and `p2 = [0, e01, e02, e03]` (the ideal part, i.e. the moment.)
    ///
    /// A line whose Euclidean part is zero is an ideal line (a line at infinity);
    /// it generates a pure translation.
    #[lanes(p1 = [_, e23, e31, e12], p2 = [_, e01, e02, e03])]
    #[repr(C, align(16))]
    #[derive(Clone, Copy, Default, Debug, PartialEq)]
    pub struct Line {
        pub p1: [f32; 4],
        pub p2: [f32; 4],
    }

    /// A rotation about an axis through the origin
    ///
    /// Lanes: `p1 = [scalar, e23, e31, e12]`.
    ///
    /// A rotor `r` is normalized when `r r̃ = 1`.
    /// Rotors compose with `*`: `r2 * r1` rotates by `r1` and then by `r2`.
    ///
    /// Rotors also support `+`, `-` and scaling,
    /// but only as raw coordinate arithmetic (e.g. for blending):
    /// a linear combination of rotors must be [normalized](crate::ops::Normalized)
    /// before it represents a rotation again.
    #[lanes(p1 = [scalar, e23, e31, e12])]
    #[repr(C, align(16))]
    #[derive(Clone, Copy, Default, Debug, PartialEq)]
    pub struct Rotor {
        pub p1: [f32; 4],
    }

    /// A translation
    ///
    /// Lanes: `p2 = [0, e01, e02, e03]`. The scalar part is implicitly 1.
    ///
    /// Translators commute with each other,
    /// and their product adds their displacements.
    #[lanes(p2 = [_, e01, e02, e03])]
    #[repr(C, align(16))]
    #[derive(Clone, Copy, Default, Debug, PartialEq)]
    pub struct Translator {
        pub p2: [f32; 4],
    }

    /// A general rigid motion: a rotation about some axis combined with a slide along it
    ///
    /// Lanes: `p1 = [scalar, e23, e31, e12]` and `p2 = [e0123, e01, e02, e03]`.
    ///
    /// A motor `m` is normalized when `m m̃ = 1`,
    /// which constrains both the rotational part (`p1·p1 = 1`)
    /// and the pseudoscalar part (`scalar·e0123 = e23·e01 + e31·e02 + e12·e03`.)
    #[lanes(p1 = [scalar, e23, e31, e12], p2 = [e0123, e01, e02, e03])]
    #[repr(C, align(16))]
    #[derive(Clone, Copy, Default, Debug, PartialEq)]
    pub struct Motor {
        pub p1: [f32; 4],
        pub p2: [f32; 4],
    }
}

impl Plane {
    /// The plane `a x + b y + c z + d = 0`
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Plane {
        Plane { p0: [d, a, b, c] }
    }

    /// Signed distance of a normalized point from this (normalized) plane
    pub fn signed_distance(self, p: Point) -> f32 {
        kernel::dp(self.p0, p.p3)
    }
}

impl Point {
    /// The point `(x, y, z)`, with weight 1
    pub fn new(x: f32, y: f32, z: f32) -> Point {
        Point { p3: [1., x, y, z] }
    }

    pub fn origin() -> Point {
        Point { p3: [1., 0., 0., 0.] }
    }
}

impl Direction {
    pub fn new(x: f32, y: f32, z: f32) -> Direction {
        Direction { p3: [0., x, y, z] }
    }
}

impl Branch {
    /// The branch `a e23 + b e31 + c e12`
    pub fn new(a: f32, b: f32, c: f32) -> Branch {
        Branch { p1: [0., a, b, c] }
    }
}

impl Line {
    /// The line `a e01 + b e02 + c e03 + d e23 + e e31 + f e12`
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Line {
        Line {
            p1: [0., d, e, f],
            p2: [0., a, b, c],
        }
    }

    /// The ideal line `a e01 + b e02 + c e03`
    pub fn ideal(a: f32, b: f32, c: f32) -> Line {
        Line {
            p1: kernel::ZERO,
            p2: [0., a, b, c],
        }
    }

    /// The Euclidean part of this line, as a branch
    pub fn euclidean(self) -> Branch {
        Branch { p1: self.p1 }
    }
}

impl From<Branch> for Line {
    fn from(b: Branch) -> Line {
        Line {
            p1: b.p1,
            p2: kernel::ZERO,
        }
    }
}

/// Check a packed rotor part against the unit norm, and every lane for finiteness
fn check_unit(lanes: &[f32]) -> Result<(), NormalizationError> {
    if let Some(lane) = lanes.iter().position(|x| !x.is_finite()) {
        return Err(NormalizationError::NotFinite { lane });
    }
    let n: f32 = lanes.iter().take(4).map(|x| x * x).sum();
    let deviation = abs(n - 1.);
    if deviation > NORMALIZATION_TOLERANCE {
        return Err(NormalizationError::Norm { deviation });
    }
    Ok(())
}

impl Rotor {
    /// Rotation by `angle` radians about the axis `(x, y, z)` through the origin
    ///
    /// The axis does not need to be normalized.
    /// The rotation is counter-clockwise when looking down the axis towards the origin.
    ///
    /// ```
    /// use screwgeom::re3::*;
    /// use screwgeom::ops::*;
    ///
    /// let r = Rotor::new(core::f32::consts::FRAC_PI_2, 0., 0., 1.);
    /// let p = Point::new(1., 0., 0.).transform(r);
    /// assert!((p.x() - 0.).abs() < 1e-6);
    /// assert!((p.y() - 1.).abs() < 1e-6);
    /// ```
    #[cfg(feature = "std")]
    pub fn new(angle: f32, x: f32, y: f32, z: f32) -> Rotor {
        let inv_norm = -1. / (x * x + y * y + z * z).sqrt();
        let (sin, cos) = (0.5 * angle).sin_cos();
        let scale = sin * inv_norm;
        Rotor {
            p1: [cos, x * scale, y * scale, z * scale],
        }
    }

    /// Load a packed `[scalar, e23, e31, e12]` rotor without checking it
    ///
    /// The data *must* already be normalized.
    /// Loading unnormalized data is not detected,
    /// and every later operation will silently produce a distorted motion.
    /// See [try_load_normalized](Rotor::try_load_normalized) for a checked version.
    pub fn load_normalized(data: &[f32; 4]) -> Rotor {
        Rotor { p1: *data }
    }

    /// Load a packed `[scalar, e23, e31, e12]` rotor,
    /// rejecting it unless it is finite and normalized
    /// to within [NORMALIZATION_TOLERANCE]
    pub fn try_load_normalized(data: &[f32; 4]) -> Result<Rotor, NormalizationError> {
        check_unit(data)?;
        Ok(Rotor { p1: *data })
    }
}

impl Translator {
    /// Translation by `distance` along the direction `(x, y, z)`
    ///
    /// The direction does not need to be normalized.
    #[cfg(feature = "std")]
    pub fn new(distance: f32, x: f32, y: f32, z: f32) -> Translator {
        let scale = -0.5 * distance / (x * x + y * y + z * z).sqrt();
        Translator {
            p2: [0., x * scale, y * scale, z * scale],
        }
    }

    /// Load a packed `[_, e01, e02, e03]` translator. Lane 0 is ignored.
    pub fn load_normalized(data: &[f32; 4]) -> Translator {
        Translator {
            p2: [0., data[1], data[2], data[3]],
        }
    }

    /// The implicit scalar part, always 1
    pub fn scalar(self) -> f32 {
        1.
    }

    /// The displacement this translator applies to points
    pub fn displacement(self) -> Direction {
        Direction {
            p3: kernel::scale(self.p2, -2.),
        }
    }
}

impl Motor {
    /// The motor `a + b e23 + c e31 + d e12 + e e01 + f e02 + g e03 + h e0123`
    #[allow(clippy::too_many_arguments)]
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32, g: f32, h: f32) -> Motor {
        Motor {
            p1: [a, b, c, d],
            p2: [h, e, f, g],
        }
    }

    /// Load a packed motor `[scalar, e23, e31, e12, e0123, e01, e02, e03]` without checking it
    ///
    /// As with [Rotor::load_normalized], the data *must* already be normalized.
    pub fn load_normalized(data: &[f32; 8]) -> Motor {
        Motor {
            p1: [data[0], data[1], data[2], data[3]],
            p2: [data[4], data[5], data[6], data[7]],
        }
    }

    /// Load a packed motor `[scalar, e23, e31, e12, e0123, e01, e02, e03]`,
    /// rejecting it unless it is finite and satisfies `m m̃ = 1`
    /// to within [NORMALIZATION_TOLERANCE]
    pub fn try_load_normalized(data: &[f32; 8]) -> Result<Motor, NormalizationError> {
        check_unit(data)?;
        let m = Motor::load_normalized(data);
        let e = m.p1[0] * m.p2[0] - kernel::hi_dp(m.p1, m.p2);
        let scale = m.p2.iter().fold(1., |acc: f32, &x| acc.max(abs(x)));
        let deviation = abs(e);
        if deviation > NORMALIZATION_TOLERANCE * scale {
            return Err(NormalizationError::Screw { deviation });
        }
        Ok(m)
    }

    /// The rotational part of this motor
    pub fn rotor(self) -> Rotor {
        Rotor { p1: self.p1 }
    }
}

impl From<Rotor> for Motor {
    fn from(r: Rotor) -> Motor {
        Motor {
            p1: r.p1,
            p2: kernel::ZERO,
        }
    }
}

impl From<Translator> for Motor {
    fn from(t: Translator) -> Motor {
        Motor {
            p1: kernel::ONE,
            p2: t.p2,
        }
    }
}

impl NormSquared for Plane {
    fn norm_squared(self) -> f32 {
        kernel::hi_dp(self.p0, self.p0)
    }
}

impl NormSquared for Direction {
    fn norm_squared(self) -> f32 {
        kernel::hi_dp(self.p3, self.p3)
    }
}

impl NormSquared for Branch {
    fn norm_squared(self) -> f32 {
        kernel::hi_dp(self.p1, self.p1)
    }
}

impl NormSquared for Line {
    fn norm_squared(self) -> f32 {
        kernel::hi_dp(self.p1, self.p1)
    }
}

impl NormSquared for Rotor {
    fn norm_squared(self) -> f32 {
        kernel::dp(self.p1, self.p1)
    }
}

impl NormSquared for Motor {
    fn norm_squared(self) -> f32 {
        kernel::dp(self.p1, self.p1)
    }
}

macro_rules! impl_norm {
    ($type:ident) => {
        #[cfg(feature = "std")]
        impl Norm for $type {
            fn norm(self) -> f32 {
                self.norm_squared().sqrt()
            }
        }
    };
}

impl_norm!(Plane);
impl_norm!(Direction);
impl_norm!(Branch);
impl_norm!(Line);
impl_norm!(Rotor);
impl_norm!(Motor);

impl Normalized for Plane {
    fn normalized(self) -> Plane {
        Plane {
            p0: kernel::scale(self.p0, rsqrt(self.norm_squared())),
        }
    }
}

impl Normalized for Point {
    fn normalized(self) -> Point {
        let w = self.p3[0];
        Point {
            p3: [1., self.p3[1] / w, self.p3[2] / w, self.p3[3] / w],
        }
    }
}

impl Normalized for Direction {
    fn normalized(self) -> Direction {
        Direction {
            p3: kernel::scale(self.p3, rsqrt(self.norm_squared())),
        }
    }
}

impl Normalized for Branch {
    fn normalized(self) -> Branch {
        Branch {
            p1: kernel::scale(self.p1, rsqrt(self.norm_squared())),
        }
    }
}

impl Normalized for Line {
    /// Scale so the direction has unit length,
    /// and remove any component of the moment along the direction
    fn normalized(self) -> Line {
        let (p1, p2) = kernel::normalize_dual(self.p1, self.p2);
        Line { p1, p2 }
    }
}
