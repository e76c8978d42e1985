//! Lane arithmetic and the fused product kernels
//!
//! Every entity is stored as one or two packs of four `f32` lanes
//! (see [re3](crate::re3) for the lane order of each entity.)
//! The functions here operate directly on those packs
//! without building intermediate multivectors.
//! They are written as plain lane-wise expressions
//! so the compiler is free to map them onto SIMD registers.
//!
//! Even elements (rotors, translators, motors, and lines viewed as generators)
//! share one layout:
//! `p1 = [scalar, e23, e31, e12]` and `p2 = [e0123, e01, e02, e03]`.

use crate::scalar::rsqrt;

/// One four-lane pack
pub type Lanes = [f32; 4];

pub const ZERO: Lanes = [0.; 4];

/// `[1, 0, 0, 0]`: the scalar part of the identity
pub const ONE: Lanes = [1., 0., 0., 0.];

#[inline]
pub fn splat(s: f32) -> Lanes {
    [s; 4]
}

#[inline]
pub fn add(a: Lanes, b: Lanes) -> Lanes {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3]]
}

#[inline]
pub fn sub(a: Lanes, b: Lanes) -> Lanes {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2], a[3] - b[3]]
}

#[inline]
pub fn mul(a: Lanes, b: Lanes) -> Lanes {
    [a[0] * b[0], a[1] * b[1], a[2] * b[2], a[3] * b[3]]
}

#[inline]
pub fn scale(a: Lanes, s: f32) -> Lanes {
    mul(a, splat(s))
}

/// Cross product of lanes 1 to 3. Lane 0 of the result is zero.
#[inline]
pub fn cross(a: Lanes, b: Lanes) -> Lanes {
    [
        0.,
        a[2] * b[3] - a[3] * b[2],
        a[3] * b[1] - a[1] * b[3],
        a[1] * b[2] - a[2] * b[1],
    ]
}

/// Dot product over all four lanes
#[inline]
pub fn dp(a: Lanes, b: Lanes) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

/// Dot product over lanes 1 to 3 (the bivector lanes of an even element)
#[inline]
pub fn hi_dp(a: Lanes, b: Lanes) -> f32 {
    a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

/// [dp], broadcast to every lane
#[inline]
pub fn dp_bc(a: Lanes, b: Lanes) -> Lanes {
    splat(dp(a, b))
}

/// [hi_dp], broadcast to every lane
#[inline]
pub fn hi_dp_bc(a: Lanes, b: Lanes) -> Lanes {
    splat(hi_dp(a, b))
}

/// Geometric product of two elements of the rotor subalgebra (`p1` packs only)
#[inline]
pub fn gp11(a: Lanes, b: Lanes) -> Lanes {
    let c = cross(a, b);
    [
        a[0] * b[0] - hi_dp(a, b),
        a[0] * b[1] + b[0] * a[1] - c[1],
        a[0] * b[2] + b[0] * a[2] - c[2],
        a[0] * b[3] + b[0] * a[3] - c[3],
    ]
}

/// Geometric product of two even elements `(a1, a2) (b1, b2)`
///
/// The even subalgebra is the dual quaternions:
/// with `I = e0123` (which squares to zero and commutes with every even element)
/// an even element is `p1 + I·q` where `q` is built from `p2`.
/// The `p1` result is just [gp11]; the `p2` result collects the cross terms.
#[inline]
pub fn gp_mm(a1: Lanes, a2: Lanes, b1: Lanes, b2: Lanes) -> (Lanes, Lanes) {
    let p1 = gp11(a1, b1);

    let c1 = cross(a1, b2);
    let c2 = cross(a2, b1);
    let p2 = [
        a1[0] * b2[0] + a2[0] * b1[0] + hi_dp(a1, b2) + hi_dp(a2, b1),
        a1[0] * b2[1] + b1[0] * a2[1] - a2[0] * b1[1] - b2[0] * a1[1] - c1[1] - c2[1],
        a1[0] * b2[2] + b1[0] * a2[2] - a2[0] * b1[2] - b2[0] * a1[2] - c1[2] - c2[2],
        a1[0] * b2[3] + b1[0] * a2[3] - a2[0] * b1[3] - b2[0] * a1[3] - c1[3] - c2[3],
    ];
    (p1, p2)
}

/// Multiply an even element by the dual number `alpha + beta·I`
///
/// `I` kills the `p2` pack and moves `p1` into it:
/// the scalar lands on `e0123` and each `e_ij` on the corresponding `-e_0k`.
#[inline]
pub fn scale_dual(p1: Lanes, p2: Lanes, alpha: f32, beta: f32) -> (Lanes, Lanes) {
    let sp2 = scale(p2, alpha);
    (
        scale(p1, alpha),
        [
            sp2[0] + beta * p1[0],
            sp2[1] - beta * p1[1],
            sp2[2] - beta * p1[2],
            sp2[3] - beta * p1[3],
        ],
    )
}

/// [rsqrt] of every lane
#[inline]
pub fn rsqrt_lanes(a: Lanes) -> Lanes {
    [rsqrt(a[0]), rsqrt(a[1]), rsqrt(a[2]), rsqrt(a[3])]
}

/// Normalize the rotor subalgebra part alone: `p1 / √(p1·p1)`
#[inline]
pub fn normalize_p1(p1: Lanes) -> Lanes {
    mul(p1, rsqrt_lanes(dp_bc(p1, p1)))
}

/// Two-term normalization of an even element.
///
/// The squared norm of a motor is the dual number `n + 2eI` with
/// `n = s² + |a|²` and `e = s·e0123 - a·b`.
/// Multiplying by the inverse square root `1/√n - I·e/(n√n)`
/// makes the scalar part 1 *and* clears the pseudoscalar part,
/// which normalizing `p1` alone would leave behind.
///
/// Lines go through here too: their lane 0 is zero in both packs,
/// which reduces this to `|a| = 1` and `a·b = 0`.
#[inline]
pub fn normalize_dual(p1: Lanes, p2: Lanes) -> (Lanes, Lanes) {
    let n = dp(p1, p1);
    if n == 0. {
        return (ZERO, ZERO);
    }
    let sigma = rsqrt(n);
    let tau = (hi_dp(p1, p2) - p1[0] * p2[0]) * sigma / n;
    scale_dual(p1, p2, sigma, tau)
}

/// The factored form of a sandwich product `g x g̃`
///
/// Building a `Sandwich` costs a few dozen multiplies;
/// applying it to a primitive costs a handful.
/// The batched conjugations build one and reuse it for the whole slice.
///
/// `TRANSLATE` selects between the rotor path (rotation only)
/// and the motor path (rotation followed by a translation.)
/// It is a compile-time parameter so the rotor path carries no translation code.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sandwich<const TRANSLATE: bool> {
    /// Columns of the rotation matrix, in lanes 1 to 3 (lane 0 is zero)
    pub cols: [Lanes; 3],
    /// Translation in lanes 1 to 3 (lane 0 is zero)
    pub shift: Lanes,
}

/// Rotation matrix columns of the (assumed normalized) rotor part `p1`
#[inline]
fn rotation_columns(p1: Lanes) -> [Lanes; 3] {
    let [s, a1, a2, a3] = p1;
    let ss = s * s;
    let (a11, a22, a33) = (a1 * a1, a2 * a2, a3 * a3);
    let (a12, a13, a23) = (a1 * a2, a1 * a3, a2 * a3);
    let (sa1, sa2, sa3) = (s * a1, s * a2, s * a3);
    [
        [0., ss + a11 - a22 - a33, 2. * (a12 - sa3), 2. * (a13 + sa2)],
        [0., 2. * (a12 + sa3), ss - a11 + a22 - a33, 2. * (a23 - sa1)],
        [0., 2. * (a13 - sa2), 2. * (a23 + sa1), ss - a11 - a22 + a33],
    ]
}

const IDENTITY_COLUMNS: [Lanes; 3] = [[0., 1., 0., 0.], [0., 0., 1., 0.], [0., 0., 0., 1.]];

impl Sandwich<false> {
    /// Factor the sandwich of the rotor `p1 = [s, e23, e31, e12]`
    pub fn rotor(p1: Lanes) -> Sandwich<false> {
        Sandwich {
            cols: rotation_columns(p1),
            shift: ZERO,
        }
    }
}

impl Sandwich<true> {
    /// Factor the sandwich of the translator `1 + p2` with `p2 = [0, e01, e02, e03]`
    pub fn translator(p2: Lanes) -> Sandwich<true> {
        Sandwich {
            cols: IDENTITY_COLUMNS,
            shift: [0., -2. * p2[1], -2. * p2[2], -2. * p2[3]],
        }
    }

    /// Factor the sandwich of the motor `(p1, p2)`
    ///
    /// The motion is a rotation by the rotor part
    /// followed by the translation `t = -2 (s b + e0123 a + b × a)`
    /// where `s, a` come from `p1` and `b` from `p2`.
    pub fn motor(p1: Lanes, p2: Lanes) -> Sandwich<true> {
        let s = p1[0];
        let p = p2[0];
        let c = cross(p2, p1);
        Sandwich {
            cols: rotation_columns(p1),
            shift: [
                0.,
                -2. * (s * p2[1] + p * p1[1] + c[1]),
                -2. * (s * p2[2] + p * p1[2] + c[2]),
                -2. * (s * p2[3] + p * p1[3] + c[3]),
            ],
        }
    }
}

impl<const TRANSLATE: bool> Sandwich<TRANSLATE> {
    /// Rotate lanes 1 to 3. Lane 0 of the result is zero.
    #[inline]
    pub fn rotate(&self, v: Lanes) -> Lanes {
        add(
            add(scale(self.cols[0], v[1]), scale(self.cols[1], v[2])),
            scale(self.cols[2], v[3]),
        )
    }

    /// `p0 = [d, a, b, c]`
    #[inline]
    pub fn plane(&self, p0: Lanes) -> Lanes {
        let mut out = self.rotate(p0);
        out[0] = p0[0];
        if TRANSLATE {
            out[0] -= hi_dp(out, self.shift);
        }
        out
    }

    /// `p3 = [w, x, y, z]`; directions use this with `w = 0`
    #[inline]
    pub fn point(&self, p3: Lanes) -> Lanes {
        let mut out = self.rotate(p3);
        if TRANSLATE {
            out = add(out, scale(self.shift, p3[0]));
        }
        out[0] = p3[0];
        out
    }

    /// A line with Euclidean part `p1` and ideal part `p2`
    #[inline]
    pub fn line(&self, p1: Lanes, p2: Lanes) -> (Lanes, Lanes) {
        let a = self.rotate(p1);
        let mut b = self.rotate(p2);
        if TRANSLATE {
            b = add(b, cross(self.shift, a));
        }
        (a, b)
    }

    /// A branch, i.e. a line through the origin with no ideal part
    #[inline]
    pub fn branch(&self, p1: Lanes) -> Lanes {
        self.rotate(p1)
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    fn assert_lanes_close(a: Lanes, b: Lanes) {
        for i in 0..4 {
            assert!(
                (a[i] - b[i]).abs() < 1e-4 * (1. + a[i].abs().max(b[i].abs())),
                "{:?} !~= {:?}",
                a,
                b
            );
        }
    }

    fn rotor_z(angle: f32) -> Lanes {
        let half = 0.5 * angle;
        [half.cos(), 0., 0., -half.sin()]
    }

    #[test]
    fn dot_products() {
        let a = [1., 2., 3., 4.];
        let b = [5., 6., 7., 8.];
        assert_eq!(dp(a, b), 70.);
        assert_eq!(hi_dp(a, b), 65.);
        assert_eq!(dp_bc(a, b), [70.; 4]);
        assert_eq!(hi_dp_bc(a, b), [65.; 4]);
        assert_eq!(cross([0., 1., 0., 0.], [0., 0., 1., 0.]), [0., 0., 0., 1.]);

        let unit = normalize_p1(a);
        assert!((dp(unit, unit) - 1.).abs() < 1e-5);
        assert_eq!(rsqrt_lanes([4.; 4]), [rsqrt(4.); 4]);
    }

    #[test]
    fn rotor_products_compose_angles() {
        let r = gp11(rotor_z(0.3), rotor_z(0.4));
        assert_lanes_close(r, rotor_z(0.7));
        // Bivectors square to -1
        assert_eq!(gp11([0., 0., 0., 1.], [0., 0., 0., 1.]), [-1., 0., 0., 0.]);
    }

    #[test]
    fn even_product_matches_rotor_product() {
        let a = [0.8, 0.1, -0.5, 0.3];
        let b = [0.2, 0.7, 0.4, -0.1];
        let (p1, p2) = gp_mm(a, ZERO, b, ZERO);
        assert_eq!(p1, gp11(a, b));
        assert_eq!(p2, ZERO);
    }

    #[test]
    fn translators_add() {
        let (p1, p2) = gp_mm(ONE, [0., 1., 2., 3.], ONE, [0., -4., 0.5, 1.]);
        assert_eq!(p1, ONE);
        assert_eq!(p2, [0., -3., 2.5, 4.]);
    }

    #[test]
    fn normalize_dual_satisfies_constraint() {
        let (p1, p2) = normalize_dual([2., 0.3, -1., 0.5], [0.7, 1., 2., -3.]);
        assert!((dp(p1, p1) - 1.).abs() < 1e-4);
        assert!((p1[0] * p2[0] - hi_dp(p1, p2)).abs() < 1e-4);

        let (l1, l2) = normalize_dual([0., 3., 0., 4.], [0., 1., 1., 1.]);
        assert!((hi_dp(l1, l1) - 1.).abs() < 1e-4);
        assert!(hi_dp(l1, l2).abs() < 1e-4);
        assert_eq!(l1[0], 0.);
        assert_eq!(l2[0], 0.);

        assert_eq!(normalize_dual(ZERO, ZERO), (ZERO, ZERO));
    }

    #[test]
    fn quarter_turn_about_z() {
        let s = Sandwich::rotor(rotor_z(core::f32::consts::FRAC_PI_2));
        assert_lanes_close(s.point([1., 1., 0., 0.]), [1., 0., 1., 0.]);
        assert_lanes_close(s.point([1., 0., 1., 0.]), [1., -1., 0., 0.]);
        assert_lanes_close(s.point([1., 0., 0., 1.]), [1., 0., 0., 1.]);
    }

    #[test]
    fn translation_sandwich() {
        let s = Sandwich::translator([0., -1., 0., 0.5]);
        assert_eq!(s.point([1., 0., 0., 0.]), [1., 2., 0., -1.]);
        assert_eq!(s.point([0., 3., 0., 0.]), [0., 3., 0., 0.]);
        // The plane x = 1 moves to x = 3
        assert_eq!(s.plane([-1., 1., 0., 0.]), [-3., 1., 0., 0.]);
    }

    #[test]
    fn motor_matches_rotor_then_translator_sandwiches() {
        // m = t r: rotate first, then translate
        let r = rotor_z(0.9);
        let t = [0., 0.5, -1., 2.];
        let (m1, m2) = gp_mm(ONE, t, r, ZERO);
        let motor = Sandwich::motor(m1, m2);
        let rotor = Sandwich::rotor(r);
        let translator = Sandwich::translator(t);

        let p = [1., 0.3, -2., 5.];
        assert_lanes_close(motor.point(p), translator.point(rotor.point(p)));

        let plane = [0.4, 0., 0.6, 0.8];
        assert_lanes_close(motor.plane(plane), translator.plane(rotor.plane(plane)));

        let (a, b) = ([0., 0., 0.6, 0.8], [0., 1., 0.8, -0.6]);
        let (ra, rb) = rotor.line(a, b);
        let expected = translator.line(ra, rb);
        let actual = motor.line(a, b);
        assert_lanes_close(actual.0, expected.0);
        assert_lanes_close(actual.1, expected.1);
    }

    #[test]
    fn line_sandwich_matches_triple_product() {
        let (m1, m2) = normalize_dual([0.9, 0.2, -0.4, 0.1], [0.3, 1., -0.5, 2.]);
        let (l1, l2) = ([0., 0.2, 0.5, -1.], [0., 3., -1., 0.7]);

        let (t1, t2) = gp_mm(m1, m2, l1, l2);
        let rev1 = [m1[0], -m1[1], -m1[2], -m1[3]];
        let rev2 = [m2[0], -m2[1], -m2[2], -m2[3]];
        let (e1, e2) = gp_mm(t1, t2, rev1, rev2);

        let (k1, k2) = Sandwich::motor(m1, m2).line(l1, l2);
        assert_lanes_close(k1, e1);
        assert_lanes_close(k2, e2);
    }
}
