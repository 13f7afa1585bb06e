//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer owns coverage: bounding box, edge functions, inside
//! testing, barycentric weights. The shader owns color: attribute
//! interpolation and texture sampling. The split mirrors the fixed-function
//! rasterizer / programmable fragment stage boundary on a GPU.

use crate::colors::{pack_color, unpack_color};
use crate::math::vec2::Vec2;
use crate::texture::Texture;

/// Per-pixel shading over barycentric coordinates.
///
/// `lambda` holds the three screen-space barycentric weights [λ0, λ1, λ2],
/// normalized to sum to 1.0 inside the triangle. Attribute arrays passed to
/// shader constructors must be in the same vertex order the rasterizer
/// evaluates its edge functions in.
pub trait PixelShader {
    /// Compute the color for a pixel given its barycentric coordinates.
    fn shade(&self, lambda: [f32; 3]) -> u32;
}

/// Constant color for every pixel.
pub struct FlatShader {
    color: u32,
}

impl FlatShader {
    pub fn new(color: u32) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _lambda: [f32; 3]) -> u32 {
        self.color
    }
}

/// Interpolates per-vertex packed colors across the triangle.
///
/// Each channel is interpolated independently as a float and truncated back
/// to 8 bits. Interpolation is in **screen space**: barycentric weights are
/// not corrected by reciprocal depth, so gradients warp slightly on
/// strongly tilted triangles. That is the accepted simplification for flat
/// color fills; texture coordinates go through [`TextureShader`], which does
/// correct for perspective.
pub struct GouraudShader {
    /// Unpacked RGB for each vertex, in [0.0, 1.0].
    colors: [(f32, f32, f32); 3],
}

impl GouraudShader {
    pub fn new(vertex_colors: [u32; 3]) -> Self {
        Self {
            colors: [
                unpack_color(vertex_colors[0]),
                unpack_color(vertex_colors[1]),
                unpack_color(vertex_colors[2]),
            ],
        }
    }
}

impl PixelShader for GouraudShader {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> u32 {
        let r = lambda[0] * self.colors[0].0
            + lambda[1] * self.colors[1].0
            + lambda[2] * self.colors[2].0;
        let g = lambda[0] * self.colors[0].1
            + lambda[1] * self.colors[1].1
            + lambda[2] * self.colors[2].1;
        let b = lambda[0] * self.colors[0].2
            + lambda[1] * self.colors[1].2
            + lambda[2] * self.colors[2].2;
        pack_color(r, g, b)
    }
}

/// Samples a texture at perspective-correct interpolated UVs.
///
/// Screen-space barycentric weights are not perspective-correct for
/// attributes that vary with depth. Each weight is multiplied by its
/// vertex's reciprocal clip-space w before interpolating:
///
/// ```text
/// f_i = λ_i * (1/w_i)
/// uv  = (Σ f_i * uv_i) / (Σ f_i)
/// ```
///
/// Without this, textures visibly swim on triangles tilted away from the
/// view plane.
pub struct TextureShader<'a> {
    texture: &'a Texture,
    uvs: [Vec2; 3],
    inv_w: [f32; 3],
}

impl<'a> TextureShader<'a> {
    pub fn new(texture: &'a Texture, uvs: [Vec2; 3], inv_w: [f32; 3]) -> Self {
        Self {
            texture,
            uvs,
            inv_w,
        }
    }

    /// Perspective-correct UV interpolation.
    #[inline]
    fn interpolate_uv(&self, lambda: [f32; 3]) -> (f32, f32) {
        let f0 = lambda[0] * self.inv_w[0];
        let f1 = lambda[1] * self.inv_w[1];
        let f2 = lambda[2] * self.inv_w[2];
        let sum = f0 + f1 + f2;

        let u = (f0 * self.uvs[0].x + f1 * self.uvs[1].x + f2 * self.uvs[2].x) / sum;
        let v = (f0 * self.uvs[0].y + f1 * self.uvs[1].y + f2 * self.uvs[2].y) / sum;
        (u, v)
    }
}

impl PixelShader for TextureShader<'_> {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> u32 {
        let (u, v) = self.interpolate_uv(lambda);
        self.texture.sample(u, v)
    }
}
