//! Edge function-based triangle rasterization.
//!
//! Each candidate pixel is tested against three edge equations; a pixel is
//! covered when all three agree in sign. The same edge values, normalized by
//! the triangle's signed area, are the barycentric weights used for
//! attribute interpolation.
//!
//! # Edge Function
//!
//! For an edge from point A to point B, the edge function at point P is:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! This is the 2D cross product (B - A) x (P - A): twice the signed area of
//! triangle (A, B, P). Its sign says which side of the directed edge A->B
//! the point lies on.
//!
//! # Winding
//!
//! Mesh data is wound clockwise in model space. The viewport transform flips
//! Y, which flips the screen-space winding, so [`EdgeFunctionRasterizer`]
//! reverses the vertex feed order to (v2, v1, v0) before evaluating edges.
//! After the reversal a front-facing triangle has positive signed area and
//! interior pixels satisfy all-edges >= 0; a back-facing one goes negative
//! and is rejected by the area check without a separate culling pass.
//!
//! # Incremental stepping
//!
//! The edge function is affine in (x, y), so its per-column and per-row
//! deltas are constant per triangle. Each edge is evaluated once at the
//! bounding-box origin and advanced by addition while scanning, instead of
//! being recomputed per pixel.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use super::framebuffer::FrameBuffer;
use super::shader::{GouraudShader, PixelShader, TextureShader};
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::texture::Texture;

/// A triangle ready for rasterization in screen space.
///
/// `points` hold screen-space x/y (and the [0,1] depth the viewport mapping
/// produced); `inv_w` is the reciprocal of each vertex's pre-divide clip w,
/// required for the depth test and perspective-correct interpolation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec3; 3],
    pub inv_w: [f32; 3],
    pub vertex_colors: [u32; 3],
    pub uvs: [Vec2; 3],
}

impl Triangle {
    pub fn new(points: [Vec3; 3], inv_w: [f32; 3], vertex_colors: [u32; 3], uvs: [Vec2; 3]) -> Self {
        Self {
            points,
            inv_w,
            vertex_colors,
            uvs,
        }
    }
}

/// Computes the edge function value for point P relative to edge (A -> B).
#[inline]
fn edge_function(a: Vec3, b: Vec3, p: Vec3) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Triangle rasterizer using the edge function algorithm.
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    pub fn new() -> Self {
        EdgeFunctionRasterizer {}
    }

    /// Fills a triangle, choosing the shading path from its material.
    ///
    /// With a texture, UVs are interpolated perspective-correct through
    /// [`TextureShader`]; otherwise per-vertex colors go through
    /// [`GouraudShader`].
    ///
    /// A triangle with any vertex at or behind the camera plane
    /// (`inv_w <= 0`) is skipped whole for the frame. This is the coarse
    /// near-plane policy: such vertices already have invalid screen
    /// coordinates, and partially-visible geometry is dropped rather than
    /// clipped.
    pub fn fill_triangle(
        &self,
        triangle: &Triangle,
        buffer: &mut FrameBuffer,
        texture: Option<&Texture>,
    ) {
        if triangle.inv_w.iter().any(|&w| w <= 0.0) {
            return;
        }

        // Reverse the feed order (attributes included) to undo the winding
        // flip introduced by the viewport Y flip.
        let points = [
            triangle.points[2],
            triangle.points[1],
            triangle.points[0],
        ];
        let inv_w = [triangle.inv_w[2], triangle.inv_w[1], triangle.inv_w[0]];

        match texture {
            Some(tex) => {
                let uvs = [triangle.uvs[2], triangle.uvs[1], triangle.uvs[0]];
                let shader = TextureShader::new(tex, uvs, inv_w);
                Self::rasterize_with_shader(points, inv_w, buffer, &shader);
            }
            None => {
                let colors = [
                    triangle.vertex_colors[2],
                    triangle.vertex_colors[1],
                    triangle.vertex_colors[0],
                ];
                let shader = GouraudShader::new(colors);
                Self::rasterize_with_shader(points, inv_w, buffer, &shader);
            }
        }
    }

    /// Rasterizes three screen-space vertices with the given pixel shader.
    ///
    /// Handles bounding box computation and clamping, incremental edge
    /// evaluation, the inside test, barycentric normalization, and
    /// depth-tested pixel writes. Vertices must already be in the
    /// rasterizer's sign convention (positive signed area when front-facing).
    pub fn rasterize_with_shader<S: PixelShader>(
        points: [Vec3; 3],
        inv_w: [f32; 3],
        buffer: &mut FrameBuffer,
        shader: &S,
    ) {
        let [v0, v1, v2] = points;

        // Twice the signed area. Zero means degenerate (nothing to draw, and
        // the barycentric divide below would blow up); negative means the
        // triangle faces away under the sign convention.
        let area = edge_function(v0, v1, v2);
        if area <= 0.0 {
            return;
        }
        let inv_area = 1.0 / area;

        // Integer pixel bounding box, clamped to the buffer.
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(buffer.width() as i32 - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(buffer.height() as i32 - 1);

        // Edge values at the bounding-box origin (pixel center), plus the
        // constant per-column and per-row deltas for incremental stepping.
        let origin = Vec3::new(min_x as f32 + 0.5, min_y as f32 + 0.5, 0.0);
        let mut w0_row = edge_function(v1, v2, origin);
        let mut w1_row = edge_function(v2, v0, origin);
        let mut w2_row = edge_function(v0, v1, origin);

        let (w0_dx, w0_dy) = (v2.y - v1.y, v1.x - v2.x);
        let (w1_dx, w1_dy) = (v0.y - v2.y, v2.x - v0.x);
        let (w2_dx, w2_dy) = (v1.y - v0.y, v0.x - v1.x);

        for y in min_y..=max_y {
            let mut w0 = w0_row;
            let mut w1 = w1_row;
            let mut w2 = w2_row;

            for x in min_x..=max_x {
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    let lambda = [w0 * inv_area, w1 * inv_area, w2 * inv_area];

                    // 1/w interpolates linearly in screen space.
                    let depth =
                        lambda[0] * inv_w[0] + lambda[1] * inv_w[1] + lambda[2] * inv_w[2];

                    let color = shader.shade(lambda);
                    buffer.set_pixel_with_depth(x, y, depth, color);
                }
                w0 += w0_dx;
                w1 += w1_dx;
                w2 += w2_dx;
            }

            w0_row += w0_dy;
            w1_row += w1_dy;
            w2_row += w2_dy;
        }
    }
}

impl Default for EdgeFunctionRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use approx::assert_relative_eq;

    fn buffer_8x8() -> (Vec<u32>, Vec<f32>) {
        (vec![colors::BACKGROUND; 64], vec![0.0f32; 64])
    }

    fn no_uvs() -> [Vec2; 3] {
        [Vec2::ZERO; 3]
    }

    #[test]
    fn edge_signs_agree_inside_and_split_outside() {
        let v0 = Vec3::new(1.0, 1.0, 0.0);
        let v1 = Vec3::new(6.0, 2.0, 0.0);
        let v2 = Vec3::new(3.0, 6.0, 0.0);

        // Strictly inside: all three edge evaluations share a sign.
        let inside = Vec3::new(3.0, 3.0, 0.0);
        let e0 = edge_function(v0, v1, inside);
        let e1 = edge_function(v1, v2, inside);
        let e2 = edge_function(v2, v0, inside);
        assert!(
            (e0 > 0.0 && e1 > 0.0 && e2 > 0.0) || (e0 < 0.0 && e1 < 0.0 && e2 < 0.0)
        );

        // Strictly outside: at least one sign differs.
        let outside = Vec3::new(0.0, 5.0, 0.0);
        let f0 = edge_function(v0, v1, outside);
        let f1 = edge_function(v1, v2, outside);
        let f2 = edge_function(v2, v0, outside);
        assert!(
            !((f0 > 0.0 && f1 > 0.0 && f2 > 0.0) || (f0 < 0.0 && f1 < 0.0 && f2 < 0.0))
        );
    }

    #[test]
    fn barycentric_weights_partition_unity() {
        let v0 = Vec3::new(1.0, 1.0, 0.0);
        let v1 = Vec3::new(6.0, 2.0, 0.0);
        let v2 = Vec3::new(3.0, 6.0, 0.0);
        let inv_area = 1.0 / edge_function(v0, v1, v2);

        // Holds for any point, inside or outside the triangle.
        for p in [
            Vec3::new(3.0, 3.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(7.5, -2.0, 0.0),
            Vec3::new(-4.0, 9.0, 0.0),
        ] {
            let w0 = edge_function(v1, v2, p) * inv_area;
            let w1 = edge_function(v2, v0, p) * inv_area;
            let w2 = edge_function(v0, v1, p) * inv_area;
            assert_relative_eq!(w0 + w1 + w2, 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn right_triangle_fills_with_vertex_color_gradient() {
        let (mut color, mut depth) = buffer_8x8();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 8, 8);

        let tri = Triangle::new(
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(4.0, 0.0, 0.0),
                Vec3::new(0.0, 4.0, 0.0),
            ],
            [1.0; 3],
            [colors::RED, colors::GREEN, colors::BLUE],
            no_uvs(),
        );
        EdgeFunctionRasterizer::new().fill_triangle(&tri, &mut fb, None);

        // The pixel nearest the red vertex is red-dominant.
        let near_red = fb.get_pixel(0, 0).unwrap();
        let (r, g, b) = colors::unpack_color(near_red);
        assert!(r > g && r > b);

        // Interior carries green/blue contributions.
        let interior = fb.get_pixel(1, 1).unwrap();
        assert_ne!(interior, colors::BACKGROUND);

        // Outside the triangle stays background.
        assert_eq!(fb.get_pixel(4, 4), Some(colors::BACKGROUND));
        assert_eq!(fb.get_pixel(7, 7), Some(colors::BACKGROUND));
        assert_eq!(fb.get_pixel(7, 0), Some(colors::BACKGROUND));
    }

    #[test]
    fn textured_quad_corners_match_corner_texels() {
        let tex = Texture::checkerboard(4, 4, 1, colors::WHITE, colors::MAGENTA);
        let (mut color, mut depth) = buffer_8x8();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 8, 8);

        // Two triangles covering the full 8x8 buffer, UVs at the corners,
        // wound like pipeline output (clockwise before the internal
        // reversal).
        let p = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(8.0, 0.0, 0.0),
            Vec3::new(8.0, 8.0, 0.0),
            Vec3::new(0.0, 8.0, 0.0),
        ];
        let uv = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let raster = EdgeFunctionRasterizer::new();
        for [a, b, c] in [[0usize, 1, 2], [0, 2, 3]] {
            let tri = Triangle::new(
                [p[a], p[b], p[c]],
                [1.0; 3],
                [colors::WHITE; 3],
                [uv[a], uv[b], uv[c]],
            );
            raster.fill_triangle(&tri, &mut fb, Some(&tex));
        }

        // Pixel centers at the buffer corners land in the corner texels.
        assert_eq!(fb.get_pixel(0, 0), Some(tex.texel(0, 0)));
        assert_eq!(fb.get_pixel(7, 0), Some(tex.texel(3, 0)));
        assert_eq!(fb.get_pixel(0, 7), Some(tex.texel(0, 3)));
        assert_eq!(fb.get_pixel(7, 7), Some(tex.texel(3, 3)));
    }

    #[test]
    fn behind_camera_vertex_skips_whole_triangle() {
        let (mut color, mut depth) = buffer_8x8();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 8, 8);

        let tri = Triangle::new(
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(7.0, 0.0, 0.0),
                Vec3::new(0.0, 7.0, 0.0),
            ],
            [1.0, 1.0, -0.5],
            [colors::RED; 3],
            no_uvs(),
        );
        EdgeFunctionRasterizer::new().fill_triangle(&tri, &mut fb, None);
        drop(fb);

        assert!(color.iter().all(|&c| c == colors::BACKGROUND));
    }

    #[test]
    fn degenerate_triangle_draws_nothing() {
        let (mut color, mut depth) = buffer_8x8();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 8, 8);

        // Collinear points: zero signed area.
        let tri = Triangle::new(
            [
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(3.0, 3.0, 0.0),
                Vec3::new(5.0, 5.0, 0.0),
            ],
            [1.0; 3],
            [colors::RED; 3],
            no_uvs(),
        );
        EdgeFunctionRasterizer::new().fill_triangle(&tri, &mut fb, None);
        drop(fb);

        assert!(color.iter().all(|&c| c == colors::BACKGROUND));
    }

    #[test]
    fn back_facing_triangle_is_rejected() {
        let (mut color, mut depth) = buffer_8x8();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 8, 8);

        // Opposite winding from the fill test above.
        let tri = Triangle::new(
            [
                Vec3::new(0.0, 4.0, 0.0),
                Vec3::new(4.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 0.0),
            ],
            [1.0; 3],
            [colors::RED; 3],
            no_uvs(),
        );
        EdgeFunctionRasterizer::new().fill_triangle(&tri, &mut fb, None);
        drop(fb);

        assert!(color.iter().all(|&c| c == colors::BACKGROUND));
    }

    #[test]
    fn closer_triangle_wins_depth_test() {
        let (mut color, mut depth) = buffer_8x8();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 8, 8);

        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(7.0, 0.0, 0.0),
            Vec3::new(0.0, 7.0, 0.0),
        ];
        let raster = EdgeFunctionRasterizer::new();

        let far = Triangle::new(points, [0.1; 3], [colors::RED; 3], no_uvs());
        let near = Triangle::new(points, [0.5; 3], [colors::BLUE; 3], no_uvs());

        raster.fill_triangle(&far, &mut fb, None);
        raster.fill_triangle(&near, &mut fb, None);
        assert_eq!(fb.get_pixel(1, 1), Some(colors::BLUE));

        // Drawing the far one again must not overwrite the near result.
        raster.fill_triangle(&far, &mut fb, None);
        assert_eq!(fb.get_pixel(1, 1), Some(colors::BLUE));
    }
}
