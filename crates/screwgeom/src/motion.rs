//! Composition, normalization and application of rotors, translators and motors

use crate::kernel::{self, Sandwich};
use crate::ops::*;
use crate::re3::*;
use core::ops::Mul;

impl Mul<Rotor> for Rotor {
    type Output = Rotor;
    #[inline]
    fn mul(self, r: Rotor) -> Rotor {
        Rotor {
            p1: kernel::gp11(self.p1, r.p1),
        }
    }
}

impl Mul<Translator> for Translator {
    type Output = Translator;
    #[inline]
    fn mul(self, r: Translator) -> Translator {
        // The product of the two ideal parts is zero
        Translator {
            p2: kernel::add(self.p2, r.p2),
        }
    }
}

impl Mul<Motor> for Motor {
    type Output = Motor;
    #[inline]
    fn mul(self, r: Motor) -> Motor {
        let (p1, p2) = kernel::gp_mm(self.p1, self.p2, r.p1, r.p2);
        Motor { p1, p2 }
    }
}

macro_rules! impl_mul_via_motor {
    ($lhs:ident, $rhs:ident) => {
        impl Mul<$rhs> for $lhs {
            type Output = Motor;
            #[inline]
            fn mul(self, r: $rhs) -> Motor {
                Motor::from(self) * Motor::from(r)
            }
        }
    };
}

impl_mul_via_motor!(Rotor, Translator);
impl_mul_via_motor!(Translator, Rotor);
impl_mul_via_motor!(Rotor, Motor);
impl_mul_via_motor!(Motor, Rotor);
impl_mul_via_motor!(Translator, Motor);
impl_mul_via_motor!(Motor, Translator);

macro_rules! impl_compose {
    ($lhs:ident, $rhs:ident) => {
        impl Compose<$rhs> for $lhs {
            type Output = <$rhs as Mul<$lhs>>::Output;
            fn compose(self, r: $rhs) -> Self::Output {
                r * self
            }
        }
    };
}

impl_compose!(Rotor, Rotor);
impl_compose!(Rotor, Translator);
impl_compose!(Rotor, Motor);
impl_compose!(Translator, Rotor);
impl_compose!(Translator, Translator);
impl_compose!(Translator, Motor);
impl_compose!(Motor, Rotor);
impl_compose!(Motor, Translator);
impl_compose!(Motor, Motor);

impl IdentityTransformation for Rotor {
    fn identity_transformation() -> Rotor {
        Rotor { p1: kernel::ONE }
    }
}

impl IdentityTransformation for Translator {
    fn identity_transformation() -> Translator {
        Translator { p2: kernel::ZERO }
    }
}

impl IdentityTransformation for Motor {
    fn identity_transformation() -> Motor {
        Motor {
            p1: kernel::ONE,
            p2: kernel::ZERO,
        }
    }
}

impl Rotor {
    /// Normalize in place so that `r r̃ = 1`
    ///
    /// This uses the fast reciprocal square root;
    /// the result is unit to within about 5e-6 (and always within 1.5·2⁻¹²).
    pub fn normalize(&mut self) {
        self.p1 = kernel::normalize_p1(self.p1);
    }

    /// Flip the sign in place if the scalar part is negative
    pub fn constrain(&mut self) {
        if self.p1[0] < 0. {
            self.p1 = kernel::scale(self.p1, -1.);
        }
    }

    /// The factored sandwich product of this rotor,
    /// for applying it to many primitives by hand
    pub fn sandwich(self) -> Sandwich<false> {
        Sandwich::rotor(self.p1)
    }
}

impl Motor {
    /// Normalize in place so that `m m̃ = 1`
    ///
    /// This fixes both the scalar part and the pseudoscalar part of `m m̃`;
    /// see [normalize_dual](kernel::normalize_dual).
    pub fn normalize(&mut self) {
        (self.p1, self.p2) = kernel::normalize_dual(self.p1, self.p2);
    }

    /// Flip the sign in place if the scalar part is negative
    pub fn constrain(&mut self) {
        if self.p1[0] < 0. {
            self.p1 = kernel::scale(self.p1, -1.);
            self.p2 = kernel::scale(self.p2, -1.);
        }
    }

    pub fn sandwich(self) -> Sandwich<true> {
        Sandwich::motor(self.p1, self.p2)
    }
}

impl Translator {
    pub fn sandwich(self) -> Sandwich<true> {
        Sandwich::translator(self.p2)
    }
}

impl Normalized for Rotor {
    fn normalized(mut self) -> Rotor {
        self.normalize();
        self
    }
}

impl Normalized for Motor {
    fn normalized(mut self) -> Motor {
        self.normalize();
        self
    }
}

impl Constrained for Rotor {
    fn constrained(mut self) -> Rotor {
        self.constrain();
        self
    }
}

impl Constrained for Motor {
    fn constrained(mut self) -> Motor {
        self.constrain();
        self
    }
}

impl InverseTransformation for Rotor {
    type Output = Rotor;

    /// `r̃ / (r r̃)`, which is exact for unnormalized rotors too
    fn inverse_transformation(self) -> Rotor {
        let inv_n = 1. / kernel::dp(self.p1, self.p1);
        Rotor {
            p1: [
                self.p1[0] * inv_n,
                -self.p1[1] * inv_n,
                -self.p1[2] * inv_n,
                -self.p1[3] * inv_n,
            ],
        }
    }
}

impl InverseTransformation for Translator {
    type Output = Translator;
    fn inverse_transformation(self) -> Translator {
        Translator {
            p2: kernel::scale(self.p2, -1.),
        }
    }
}

impl InverseTransformation for Motor {
    type Output = Motor;

    /// `m̃ / (m m̃)`, dividing by the dual number `n + 2eI`
    fn inverse_transformation(self) -> Motor {
        let n = kernel::dp(self.p1, self.p1);
        let e = self.p1[0] * self.p2[0] - kernel::hi_dp(self.p1, self.p2);
        let inv_n = 1. / n;
        let rev1 = [self.p1[0], -self.p1[1], -self.p1[2], -self.p1[3]];
        let rev2 = [self.p2[0], -self.p2[1], -self.p2[2], -self.p2[3]];
        let (p1, p2) = kernel::scale_dual(rev1, rev2, inv_n, -2. * e * inv_n * inv_n);
        Motor { p1, p2 }
    }
}

/// Implement single and batched [Conjugate] for a group element
/// from one per-primitive kernel expression.
///
/// The sandwich is factored once per call,
/// so the batched forms pay for it once per slice.
macro_rules! impl_conjugate {
    ($group:ident: $($prim:ident => |$s:ident, $x:ident| $body:expr;)*) => {
        $(
            impl Conjugate<$prim> for $group {
                #[inline]
                fn conjugate(&self, $x: $prim) -> $prim {
                    let $s = self.sandwich();
                    $body
                }

                fn conjugate_in_place(&self, xs: &mut [$prim]) {
                    let $s = self.sandwich();
                    for x in xs.iter_mut() {
                        let $x = *x;
                        *x = $body;
                    }
                }

                fn conjugate_into(&self, input: &[$prim], output: &mut [$prim]) {
                    assert_eq!(
                        input.len(),
                        output.len(),
                        "input and output batches differ in length"
                    );
                    let $s = self.sandwich();
                    for (out, &$x) in output.iter_mut().zip(input) {
                        *out = $body;
                    }
                }
            }
        )*
    };
}

impl_conjugate! { Rotor:
    Plane => |s, x| Plane { p0: s.plane(x.p0) };
    Point => |s, x| Point { p3: s.point(x.p3) };
    Direction => |s, x| Direction { p3: s.point(x.p3) };
    Branch => |s, x| Branch { p1: s.branch(x.p1) };
    Line => |s, x| {
        let (p1, p2) = s.line(x.p1, x.p2);
        Line { p1, p2 }
    };
}

impl_conjugate! { Translator:
    Plane => |s, x| Plane { p0: s.plane(x.p0) };
    Point => |s, x| Point { p3: s.point(x.p3) };
    Direction => |s, x| Direction { p3: s.point(x.p3) };
    Line => |s, x| {
        let (p1, p2) = s.line(x.p1, x.p2);
        Line { p1, p2 }
    };
}

impl_conjugate! { Motor:
    Plane => |s, x| Plane { p0: s.plane(x.p0) };
    Point => |s, x| Point { p3: s.point(x.p3) };
    Direction => |s, x| Direction { p3: s.point(x.p3) };
    Line => |s, x| {
        let (p1, p2) = s.line(x.p1, x.p2);
        Line { p1, p2 }
    };
}
