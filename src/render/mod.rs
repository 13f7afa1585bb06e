//! Rasterization and pixel-buffer access.

mod framebuffer;
mod rasterizer;
mod shader;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{EdgeFunctionRasterizer, Triangle};
pub use shader::{FlatShader, GouraudShader, PixelShader, TextureShader};
