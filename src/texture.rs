//! Decoded textures and nearest-neighbor sampling.
//!
//! A [`Texture`] is a flat array of 0x00RRGGBB texels plus dimensions. The
//! renderer only ever reads it by integer texel coordinate; file decoding
//! happens once, up front, at the ingestion boundary.

use std::fmt;
use std::path::Path;

/// Behavior for UV coordinates outside [0, 1].
///
/// The sampler's documented contract only covers in-range UVs; what to do
/// outside that range is a policy choice surfaced here rather than wired in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Clamp UVs to [0, 1]. `u = 1.0` addresses the last texel exactly.
    #[default]
    Clamp,
    /// Tile the texture; UVs wrap modulo 1 (so `u = 1.0` wraps to texel 0).
    Repeat,
}

/// Errors surfaced at the texture ingestion boundary.
///
/// These are input-contract violations: continuing with a malformed texture
/// would silently corrupt rendering, so they abort the load instead.
#[derive(Debug)]
pub enum TextureError {
    /// Pixel data length does not match width * height, or a dimension is 0.
    BadDimensions {
        width: u32,
        height: u32,
        len: usize,
    },
    /// The decoded file is not 32-bit uncompressed truecolor.
    UnsupportedFormat(String),
    /// The underlying image file could not be decoded at all.
    Decode(image::ImageError),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::BadDimensions { width, height, len } => write!(
                f,
                "texture data length {len} does not match {width}x{height} dimensions"
            ),
            TextureError::UnsupportedFormat(format) => {
                write!(f, "texture must be 32-bit truecolor, got {format}")
            }
            TextureError::Decode(err) => write!(f, "failed to decode texture: {err}"),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(err: image::ImageError) -> Self {
        TextureError::Decode(err)
    }
}

/// A 2D texture for nearest-neighbor sampling.
pub struct Texture {
    data: Vec<u32>, // Texels in 0x00RRGGBB layout, row-major.
    width: u32,
    height: u32,
    wrap: WrapMode,
}

impl Texture {
    /// Wraps already-decoded pixel data.
    ///
    /// This is the core ingestion contract: callers hand over a flat
    /// row-major array of 0x00RRGGBB texels and its dimensions. Returns an
    /// error if the dimensions are zero or don't match the data length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u32>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 || data.len() != (width * height) as usize {
            return Err(TextureError::BadDimensions {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            wrap: WrapMode::default(),
        })
    }

    /// Loads a texture from an image file.
    ///
    /// The source must decode to 32-bit uncompressed truecolor (RGBA8);
    /// anything else is a fatal input-contract violation reported as
    /// [`TextureError::UnsupportedFormat`]. The alpha byte is discarded on
    /// conversion to 0x00RRGGBB.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path)?;
        if img.color() != image::ColorType::Rgba8 {
            return Err(TextureError::UnsupportedFormat(format!("{:?}", img.color())));
        }

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let data: Vec<u32> = rgba
            .pixels()
            .map(|p| {
                let [r, g, b, _a] = p.0;
                ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect();

        Texture::from_raw(width, height, data)
    }

    /// Generates a two-color checkerboard, `cell` texels per square.
    ///
    /// Used by the demo scene so the renderer has something to map without
    /// requiring an asset on disk.
    pub fn checkerboard(width: u32, height: u32, cell: u32, a: u32, b: u32) -> Self {
        let data = (0..height)
            .flat_map(|y| {
                (0..width).map(move |x| {
                    if ((x / cell) + (y / cell)) % 2 == 0 {
                        a
                    } else {
                        b
                    }
                })
            })
            .collect();
        Self {
            data,
            width,
            height,
            wrap: WrapMode::default(),
        }
    }

    /// Sets the out-of-range UV policy.
    pub fn set_wrap(&mut self, wrap: WrapMode) {
        self.wrap = wrap;
    }

    /// Samples the texture at normalized UV coordinates, nearest-neighbor.
    ///
    /// UVs are scaled by the texture dimensions and truncated to integer
    /// texel coordinates. No filtering. Out-of-range UVs are resolved by the
    /// texture's [`WrapMode`]. UV (0,0) addresses the first texel in memory.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        let (u, v) = match self.wrap {
            WrapMode::Clamp => (u.clamp(0.0, 1.0), v.clamp(0.0, 1.0)),
            WrapMode::Repeat => (u.rem_euclid(1.0), v.rem_euclid(1.0)),
        };

        // The min() keeps u = 1.0 under Clamp on the last texel instead of
        // one past the end.
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.texel(x, y)
    }

    /// Direct integer texel lookup.
    #[inline]
    pub fn texel(&self, x: u32, y: u32) -> u32 {
        self.data[(y * self.width + x) as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
