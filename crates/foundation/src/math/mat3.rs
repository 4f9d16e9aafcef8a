use super::Vec3;

/// Row-major 3x3 matrix, used for rotations only.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat3 {
    pub rows: [[f64; 3]; 3],
}

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3 {
        rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Rotation for intrinsic X-then-Y-then-Z Euler angles (`Rx * Ry * Rz`).
    pub fn from_euler_xyz(angles: Vec3) -> Self {
        let (b, a) = angles.x.sin_cos();
        let (d, c) = angles.y.sin_cos();
        let (f, e) = angles.z.sin_cos();

        Self {
            rows: [
                [c * e, -c * f, d],
                [a * f + b * e * d, a * e - b * f * d, -b * c],
                [b * f - a * e * d, b * e + a * f * d, a * c],
            ],
        }
    }

    pub fn transpose(self) -> Self {
        let r = self.rows;
        Self {
            rows: [
                [r[0][0], r[1][0], r[2][0]],
                [r[0][1], r[1][1], r[2][1]],
                [r[0][2], r[1][2], r[2][2]],
            ],
        }
    }

    pub fn mul(self, other: Mat3) -> Mat3 {
        let a = self.rows;
        let b = other.rows;
        let mut rows = [[0.0; 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
            }
        }
        Mat3 { rows }
    }

    pub fn mul_vec(self, v: Vec3) -> Vec3 {
        let r = self.rows;
        Vec3::new(
            r[0][0] * v.x + r[0][1] * v.y + r[0][2] * v.z,
            r[1][0] * v.x + r[1][1] * v.y + r[1][2] * v.z,
            r[2][0] * v.x + r[2][1] * v.y + r[2][2] * v.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Mat3;
    use crate::math::{Vec3, approx_eq};
    use std::f64::consts::FRAC_PI_2;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!(
            approx_eq(a.x, b.x, 1e-12) && approx_eq(a.y, b.y, 1e-12) && approx_eq(a.z, b.z, 1e-12),
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn quarter_turn_about_y_maps_x_to_minus_z() {
        let m = Mat3::from_euler_xyz(Vec3::new(0.0, FRAC_PI_2, 0.0));
        assert_vec_close(m.mul_vec(Vec3::X), Vec3::new(0.0, 0.0, -1.0));
        assert_vec_close(m.mul_vec(Vec3::Y), Vec3::Y);
    }

    #[test]
    fn transpose_inverts_rotation() {
        let m = Mat3::from_euler_xyz(Vec3::new(0.3, -1.1, 2.0));
        let v = Vec3::new(1.0, -2.0, 0.5);
        assert_vec_close(m.transpose().mul_vec(m.mul_vec(v)), v);
    }

    #[test]
    fn zero_angles_are_identity() {
        assert_eq!(Mat3::from_euler_xyz(Vec3::ZERO), Mat3::IDENTITY);
    }
}
