//! Exponential, logarithm and square root
//!
//! These connect the group elements ([Rotor], [Motor])
//! with their generators ([Branch], [Line]).
//!
//! A generator stores *half* of its motion:
//! a branch `(θ/2)·axis` exponentiates to a rotation by `θ`.
//! Interpolating a motion is therefore a matter of scaling its logarithm:
//!
//! ```
//! use screwgeom::re3::*;
//! use screwgeom::algebraic_ops::*;
//!
//! let m = Rotor::new(1., 0., 0., 1.) * Translator::new(3., 1., 0., 0.);
//! let third = (m.log() / 3.).exp();
//! let again = third * third * third;
//! assert!((again.e01() - m.e01()).abs() < 1e-3);
//! ```
//!
//! Both directions evaluate `cos m`, `sin m / m` and `(m cos m − sin m) / m³`
//! through [HalfAngle](crate::scalar::HalfAngle),
//! which switches to a Taylor series below [SMALL_ANGLE](crate::scalar::SMALL_ANGLE).
//! Sharing one threshold and one series keeps `exp(log(m))` close to `m`
//! through the neighbourhood of the identity and of pure translations.

use crate::algebraic_ops::*;
use crate::kernel;
use crate::re3::*;

#[cfg(feature = "std")]
use crate::ops::Constrained;
#[cfg(feature = "std")]
use crate::scalar::HalfAngle;

#[cfg(feature = "std")]
impl Exp for Branch {
    type Output = Rotor;

    fn exp(self) -> Rotor {
        let m = kernel::hi_dp(self.p1, self.p1).sqrt();
        let h = HalfAngle::new(m);
        let mut p1 = kernel::scale(self.p1, h.sinc);
        p1[0] = h.cos;
        Rotor { p1 }
    }
}

#[cfg(feature = "std")]
impl Log for Rotor {
    type Output = Branch;

    /// The half-angle is `atan2(|u|, s)` for bivector part `u`,
    /// so the rotation is recovered without dividing by `sin`.
    ///
    /// A rotor with a negative scalar part is [constrained](Constrained) first,
    /// so the half-angle stays within `[0, π/2]` and `exp(log(r))` is `-r`
    /// (the same rotation) for such rotors.
    /// The identity maps to the zero branch.
    fn log(self) -> Branch {
        let a = self.constrained().p1;
        let u = kernel::hi_dp(a, a).sqrt();
        let m = u.atan2(a[0]);
        let k = 1. / HalfAngle::new(m).sinc;
        let mut p1 = kernel::scale(a, k);
        p1[0] = 0.;
        Branch { p1 }
    }
}

#[cfg(feature = "std")]
impl Exp for Line {
    type Output = Motor;

    /// With Euclidean part `a`, ideal part `b` and `m = |a|`:
    ///
    /// * scalar `cos m`
    /// * Euclidean `g a`
    /// * ideal `g b + (a·b) h a`
    /// * pseudoscalar `(a·b) g`
    ///
    /// where `g = sin m / m` and `h = (m cos m − sin m) / m³`.
    /// The `h` term couples rotation and translation
    /// when the axis does not pass through the origin.
    fn exp(self) -> Motor {
        let (a, b) = (self.p1, self.p2);
        let m = kernel::hi_dp(a, a).sqrt();
        let ab = kernel::hi_dp(a, b);
        let h = HalfAngle::new(m);

        let mut p1 = kernel::scale(a, h.sinc);
        p1[0] = h.cos;
        let coupling = kernel::scale(kernel::hi_dp_bc(a, b), h.pitch);
        let mut p2 = kernel::add(kernel::scale(b, h.sinc), kernel::mul(a, coupling));
        p2[0] = ab * h.sinc;
        Motor { p1, p2 }
    }
}

#[cfg(feature = "std")]
impl Log for Motor {
    type Output = Line;

    /// Inverts [Line::exp](Exp::exp) for a normalized motor:
    /// the Euclidean part is recovered as for a rotor,
    /// then the ideal part is solved from the same coupling relation.
    ///
    /// As for rotors, a motor with a negative scalar part is constrained first.
    /// This keeps `1 / g` bounded (the half-angle never exceeds `π/2`)
    /// and makes `exp(log(m))` equal to `-m`, the same motion, for such motors.
    fn log(self) -> Line {
        let Motor { p1: a, p2: b } = self.constrained();
        let u = kernel::hi_dp(a, a).sqrt();
        let m = u.atan2(a[0]);
        let h = HalfAngle::new(m);
        let k = 1. / h.sinc;

        let mut p1 = kernel::scale(a, k);
        p1[0] = 0.;
        let mut p2 = kernel::sub(
            kernel::scale(b, k),
            kernel::scale(a, b[0] * k * k * k * h.pitch),
        );
        p2[0] = 0.;
        Line { p1, p2 }
    }
}

/// `1 + r`, the unnormalized square root
#[inline]
fn one_plus(p1: kernel::Lanes) -> kernel::Lanes {
    kernel::add(p1, kernel::ONE)
}

impl PartialSqrt for Rotor {
    type Output = Rotor;

    /// `None` when `1 + r` is (nearly) zero, i.e. for the rotor `-1`
    fn partial_sqrt(self) -> Option<Rotor> {
        let p1 = one_plus(self.p1);
        if kernel::dp(p1, p1) < f32::EPSILON {
            return None;
        }
        Some(Rotor {
            p1: kernel::normalize_p1(p1),
        })
    }
}

impl Sqrt for Rotor {
    /// Half of this rotation: `1 + r`, normalized
    ///
    /// For the degenerate rotor `-1` this returns the zero rotor.
    fn sqrt(self) -> Rotor {
        Rotor {
            p1: kernel::normalize_p1(one_plus(self.p1)),
        }
    }
}

impl PartialSqrt for Motor {
    type Output = Motor;

    fn partial_sqrt(self) -> Option<Motor> {
        let p1 = one_plus(self.p1);
        if kernel::dp(p1, p1) < f32::EPSILON {
            return None;
        }
        let (p1, p2) = kernel::normalize_dual(p1, self.p2);
        Some(Motor { p1, p2 })
    }
}

impl Sqrt for Motor {
    /// Half of this motion: `1 + m` with the two-term motor normalization
    ///
    /// For the degenerate motor with rotor part `-1` this returns the zero motor.
    fn sqrt(self) -> Motor {
        let (p1, p2) = kernel::normalize_dual(one_plus(self.p1), self.p2);
        Motor { p1, p2 }
    }
}

#[cfg(feature = "std")]
impl Motor {
    /// The screw motion that rotates by `angle` radians about `axis`
    /// while sliding `distance` along it
    ///
    /// `axis` should be [normalized](crate::ops::Normalized).
    /// With `distance = 0` this is a pure rotation about `axis`;
    /// with `angle = 0` it is a pure translation along `axis`'s direction.
    ///
    /// ```
    /// use screwgeom::re3::*;
    /// use screwgeom::ops::*;
    ///
    /// // A quarter turn about the vertical line through (1, 0, 0), rising 2 units
    /// let axis = Line::new(0., -1., 0., 0., 0., 1.);
    /// let m = Motor::screw(core::f32::consts::FRAC_PI_2, 2., axis);
    /// let p = Point::new(2., 0., 0.).transform(m);
    /// assert!((p.x() - 1.).abs() < 1e-5);
    /// assert!((p.y() - 1.).abs() < 1e-5);
    /// assert!((p.z() - 2.).abs() < 1e-5);
    /// ```
    pub fn screw(angle: f32, distance: f32, axis: Line) -> Motor {
        let u = -0.5 * angle;
        let v = 0.5 * distance;
        Line {
            p1: kernel::scale(axis.p1, u),
            p2: kernel::sub(kernel::scale(axis.p2, u), kernel::scale(axis.p1, v)),
        }
        .exp()
    }
}
