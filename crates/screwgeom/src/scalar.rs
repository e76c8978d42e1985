//! Scalar helpers shared by the kernels and the exp / log layer
//!
//! screwgeom works exclusively in `f32`.
//! Everything here that needs transcendental functions is gated on the `std` feature;
//! [rsqrt] is portable and is what normalization uses, so normalization
//! and square roots of group elements remain available under `no_std`.

/// Below this half-angle (in radians) the exponential and logarithm switch
/// from their closed forms to truncated Taylor series.
///
/// Every series in this module is truncated after its m⁴ term.
/// `exp` and `log` both go through the same functions,
/// so the switch happens at exactly the same place in both directions.
pub const SMALL_ANGLE: f32 = 0.1;

/// Maximum deviation from unit norm accepted by the validated loaders
/// (e.g. [Rotor::try_load_normalized](crate::re3::Rotor::try_load_normalized))
pub const NORMALIZATION_TOLERANCE: f32 = 1e-3;

/// Fast reciprocal square root
///
/// A bit-level initial guess refined by two Newton-Raphson iterations.
/// The relative error is below 5e-6, well inside 1.5·2⁻¹².
///
/// ## `rsqrt()` of `0`
///
/// `rsqrt(0.)` returns a large but finite value rather than infinity,
/// so normalizing an all-zero pack produces an all-zero pack instead of NaNs.
#[inline]
pub fn rsqrt(x: f32) -> f32 {
    let i = 0x5f37_5a86 - (x.to_bits() >> 1);
    let mut y = f32::from_bits(i);
    let half_x = 0.5 * x;
    y = y * (1.5 - half_x * y * y);
    y = y * (1.5 - half_x * y * y);
    y
}

/// Absolute value that does not depend on `std`
#[inline]
pub(crate) fn abs(x: f32) -> f32 {
    if x < 0. {
        -x
    } else {
        x
    }
}

/// The three functions of the half-angle `m` that the screw exponential needs:
/// `cos m`, `g = sin m / m` and `h = (m cos m − sin m) / m³`
///
/// `g` and `h` have removable singularities at zero;
/// below [SMALL_ANGLE] they are evaluated by their Taylor series.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug)]
pub struct HalfAngle {
    pub cos: f32,
    pub sinc: f32,
    pub pitch: f32,
}

#[cfg(feature = "std")]
impl HalfAngle {
    pub fn new(m: f32) -> HalfAngle {
        if m < SMALL_ANGLE {
            let m2 = m * m;
            let m4 = m2 * m2;
            HalfAngle {
                cos: 1. - m2 * (1. / 2.) + m4 * (1. / 24.),
                sinc: 1. - m2 * (1. / 6.) + m4 * (1. / 120.),
                pitch: -1. / 3. + m2 * (1. / 30.) - m4 * (1. / 840.),
            }
        } else {
            let (sin, cos) = m.sin_cos();
            HalfAngle {
                cos,
                sinc: sin / m,
                pitch: (m * cos - sin) / (m * m * m),
            }
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn rsqrt_error_bound() {
        let bound = 1.5 / 4096.;
        for &x in &[1e-6_f32, 0.01, 0.25, 0.5, 1., 2., 3., 10., 1234.5, 1e6] {
            let exact = 1. / (x as f64).sqrt();
            let approx = rsqrt(x) as f64;
            assert!(((approx - exact) / exact).abs() < bound, "rsqrt({})", x);
        }
    }

    #[test]
    fn rsqrt_zero_is_finite() {
        assert!(rsqrt(0.).is_finite());
        assert_eq!(0. * rsqrt(0.), 0.);
    }

    #[test]
    fn series_meet_closed_form() {
        // Both sides of the threshold should agree closely
        let below = HalfAngle::new(SMALL_ANGLE * 0.999);
        let above = HalfAngle::new(SMALL_ANGLE * 1.001);
        assert!((below.cos - above.cos).abs() < 1e-4);
        assert!((below.sinc - above.sinc).abs() < 1e-4);
        assert!((below.pitch - above.pitch).abs() < 1e-3);

        let zero = HalfAngle::new(0.);
        assert_eq!(zero.cos, 1.);
        assert_eq!(zero.sinc, 1.);
        assert!((zero.pitch + 1. / 3.).abs() < 1e-7);
    }
}
