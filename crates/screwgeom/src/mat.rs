//! Conversion to homogeneous 4×4 matrices for renderers and physics code

use crate::kernel::Sandwich;
use crate::re3::*;

/// A column-major 4×4 matrix acting on `(x, y, z, w)` column vectors
///
/// `cols[j][i]` is the entry in row `i`, column `j`.
/// This is the layout most graphics APIs expect for a uniform upload.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[repr(C, align(16))]
pub struct Mat4x4 {
    pub cols: [[f32; 4]; 4],
}

impl Mat4x4 {
    pub fn identity() -> Mat4x4 {
        Mat4x4 {
            cols: [
                [1., 0., 0., 0.],
                [0., 1., 0., 0.],
                [0., 0., 1., 0.],
                [0., 0., 0., 1.],
            ],
        }
    }

    /// Multiply a point (as the column vector `(x, y, z, w)`) by this matrix
    pub fn apply(&self, p: Point) -> Point {
        let [w, x, y, z] = p.p3;
        let v = [x, y, z, w];
        let mut out = [0.; 4];
        for (col, &s) in self.cols.iter().zip(v.iter()) {
            for (o, &c) in out.iter_mut().zip(col.iter()) {
                *o += c * s;
            }
        }
        Point {
            p3: [out[3], out[0], out[1], out[2]],
        }
    }

    fn from_sandwich<const TRANSLATE: bool>(s: Sandwich<TRANSLATE>) -> Mat4x4 {
        let col = |c: [f32; 4]| [c[1], c[2], c[3], 0.];
        Mat4x4 {
            cols: [
                col(s.cols[0]),
                col(s.cols[1]),
                col(s.cols[2]),
                [s.shift[1], s.shift[2], s.shift[3], 1.],
            ],
        }
    }
}

impl Rotor {
    /// The rotation matrix of this rotor, which must be normalized
    pub fn as_mat4x4(self) -> Mat4x4 {
        Mat4x4::from_sandwich(self.sandwich())
    }
}

impl Translator {
    pub fn as_mat4x4(self) -> Mat4x4 {
        Mat4x4::from_sandwich(self.sandwich())
    }
}

impl Motor {
    /// The rigid transformation matrix of this motor, which must be normalized
    ///
    /// ```
    /// use screwgeom::re3::*;
    /// use screwgeom::ops::*;
    ///
    /// let m = Rotor::new(0.7, 1., 2., 3.) * Translator::new(4., 0., 1., 0.);
    /// let p = Point::new(1., -1., 2.);
    /// let by_matrix = m.as_mat4x4().apply(p);
    /// let by_sandwich = p.transform(m);
    /// for (a, b) in by_matrix.p3.iter().zip(by_sandwich.p3.iter()) {
    ///     assert!((a - b).abs() < 1e-5);
    /// }
    /// ```
    pub fn as_mat4x4(self) -> Mat4x4 {
        Mat4x4::from_sandwich(self.sandwich())
    }
}
