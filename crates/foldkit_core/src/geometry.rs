//! Points, sizes, and projective transforms

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// 3x3 projective transform (row-major)
///
/// Maps `(x, y)` to `((a*x + b*y + c) / w, (d*x + e*y + f) / w)` with
/// `w = g*x + h*y + i`. An affine transform has a bottom row of `[0, 0, 1]`;
/// a perspective rotation fills in `g`/`h`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projective2D {
    pub rows: [[f32; 3]; 3],
}

impl Default for Projective2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Projective2D {
    pub const IDENTITY: Projective2D = Projective2D {
        rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Below this magnitude a homogeneous `w` is treated as a point at infinity.
    const W_EPSILON: f32 = 1e-6;

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            rows: [[1.0, 0.0, x], [0.0, 1.0, y], [0.0, 0.0, 1.0]],
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            rows: [[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Matrix product `self * other`
    ///
    /// The resulting transform first applies `other`, then `self`.
    pub fn then(&self, other: &Projective2D) -> Projective2D {
        let mut rows = [[0.0f32; 3]; 3];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.rows[r][k] * other.rows[k][c]).sum();
            }
        }
        Projective2D { rows }
    }

    /// Translate before applying this transform (`self * T(dx, dy)`)
    pub fn pre_translate(&self, dx: f32, dy: f32) -> Projective2D {
        self.then(&Projective2D::translation(dx, dy))
    }

    /// Translate after applying this transform (`T(dx, dy) * self`)
    pub fn post_translate(&self, dx: f32, dy: f32) -> Projective2D {
        Projective2D::translation(dx, dy).then(self)
    }

    /// Whether the bottom row is `[0, 0, 1]`
    pub fn is_affine(&self) -> bool {
        self.rows[2] == [0.0, 0.0, 1.0]
    }

    /// Map a point, returning `None` when it projects to infinity
    pub fn map_point(&self, point: Point) -> Option<Point> {
        let [r0, r1, r2] = self.rows;
        let w = r2[0] * point.x + r2[1] * point.y + r2[2];
        if w.abs() < Self::W_EPSILON {
            return None;
        }
        Some(Point::new(
            (r0[0] * point.x + r0[1] * point.y + r0[2]) / w,
            (r1[0] * point.x + r1[1] * point.y + r1[2]) / w,
        ))
    }

    pub fn determinant(&self) -> f32 {
        let m = &self.rows;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse via the adjugate; `None` for singular matrices
    ///
    /// A strip rotated exactly edge-on collapses to a line and has no inverse.
    pub fn invert(&self) -> Option<Projective2D> {
        let det = self.determinant();
        if det.abs() < Self::W_EPSILON {
            return None;
        }
        let m = &self.rows;
        let inv = 1.0 / det;
        Some(Projective2D {
            rows: [
                [
                    (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv,
                    (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv,
                    (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv,
                ],
                [
                    (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv,
                    (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv,
                    (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv,
                ],
                [
                    (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv,
                    (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv,
                    (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv,
                ],
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn test_translation_order() {
        let m = Projective2D::scale(2.0, 2.0)
            .pre_translate(1.0, 0.0)
            .post_translate(0.0, 5.0);
        // (0,0) -> +1 -> *2 -> +5
        let p = m.map_point(Point::ZERO).unwrap();
        assert!(approx(p, Point::new(2.0, 5.0)));
    }

    #[test]
    fn test_invert_round_trip() {
        let m = Projective2D {
            rows: [[1.0, 0.0, 3.0], [0.0, 0.5, -2.0], [0.0, 0.001, 1.0]],
        };
        let inv = m.invert().unwrap();
        let p = Point::new(12.0, 40.0);
        let back = inv.map_point(m.map_point(p).unwrap()).unwrap();
        assert!(approx(back, p));
    }

    #[test]
    fn test_singular_has_no_inverse() {
        assert!(Projective2D::scale(1.0, 0.0).invert().is_none());
    }

    #[test]
    fn test_point_at_infinity() {
        let m = Projective2D {
            rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        };
        assert!(m.map_point(Point::new(3.0, 0.0)).is_none());
        assert!(!m.is_affine());
    }
}
