//! 4x4 transformation matrix.
//!
//! # Convention
//! - Row-major storage, addressed as `data[row][col]`
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! There is no general inverse here: the only matrices this pipeline ever
//! inverts are orthonormal rotations, where the transpose is the inverse.

use std::ops::Mul;

use super::mat3::Mat3;
use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis.
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis.
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Assembles an affine transform from a 3x3 rotation block and a
    /// translation in the last column.
    pub fn from_rotation_translation(rotation: Mat3, translation: Vec3) -> Self {
        Mat4::new([
            [
                rotation.get(0, 0),
                rotation.get(0, 1),
                rotation.get(0, 2),
                translation.x,
            ],
            [
                rotation.get(1, 0),
                rotation.get(1, 1),
                rotation.get(1, 2),
                translation.y,
            ],
            [
                rotation.get(2, 0),
                rotation.get(2, 1),
                rotation.get(2, 2),
                translation.z,
            ],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates an OpenGL-style right-handed perspective projection matrix.
    ///
    /// The camera looks down -Z in view space; a visible vertex ends up with
    /// clip-space `w = -z_view > 0`. NDC z spans [-1, 1] between the near
    /// and far planes.
    ///
    /// `far == near` divides by zero; callers own that precondition.
    pub fn perspective(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let c = 1.0 / (fov_y / 2.0).tan();
        Mat4::new([
            [c / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, c, 0.0, 0.0],
            [
                0.0,
                0.0,
                -(far + near) / (far - near),
                -(2.0 * far * near) / (far - near),
            ],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Creates the NDC-to-screen viewport matrix.
    ///
    /// Maps NDC [-1,1]x[-1,1] to pixel coordinates [0,width]x[0,height],
    /// flipping Y (NDC +Y is up, screen +Y is down), and NDC z [-1,1] to the
    /// [0,1] depth range.
    pub fn viewport(width: u32, height: u32) -> Self {
        let half_w = width as f32 / 2.0;
        let half_h = height as f32 / 2.0;
        Mat4::new([
            [half_w, 0.0, 0.0, half_w],
            [0.0, -half_h, 0.0, half_h],
            [0.0, 0.0, 0.5, 0.5],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Swaps `data[r][c]` with `data[c][r]`.
    pub fn transpose(&self) -> Self {
        let mut result = [[0.0f32; 4]; 4];
        for (row, cells) in self.data.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                result[col][row] = value;
            }
        }
        Mat4::new(result)
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];
        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = (0..4).map(|k| self.data[row][k] * rhs.data[k][col]).sum();
            }
        }
        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
///
/// Row `i` of the result is the dot product of matrix row `i` with `v`.
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |i: usize| {
            let r = self.data[i];
            r[0] * v.x + r[1] * v.y + r[2] * v.z + r[3] * v.w
        };
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}
