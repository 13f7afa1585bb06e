//! A CPU-based software-rendered 3D graphics pipeline.
//!
//! This crate transforms triangles from model space to screen space,
//! rasterizes them with perspective-correct attribute interpolation, and
//! writes packed 0x00RRGGBB pixels into a caller-owned buffer. SDL2 is used
//! only by the demo binary to put that buffer on screen; all rendering is
//! done on the CPU.
//!
//! # Quick Start
//!
//! ```ignore
//! use softrast::prelude::*;
//!
//! let mut engine = Engine::new(800, 600);
//! engine.load_demo_scene();
//!
//! let mut color = vec![0u32; 800 * 600];
//! let mut depth = vec![0.0f32; 800 * 600];
//! let mut fb = FrameBuffer::new(&mut color, &mut depth, 800, 600);
//! engine.render(&mut fb);
//! ```

pub mod camera;
pub mod colors;
pub mod engine;
pub mod math;
pub mod projection;
pub mod render;
pub mod scene;
pub mod texture;
pub mod transform;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use camera::Camera;
pub use engine::{Engine, RenderMode};
pub use projection::Projection;
pub use scene::{InputState, SceneObject};
pub use texture::{Texture, TextureError, WrapMode};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softrast::prelude::*;
/// ```
pub mod prelude {
    // Engine & scene
    pub use crate::camera::Camera;
    pub use crate::engine::{Engine, RenderMode};
    pub use crate::projection::Projection;
    pub use crate::scene::{Face, InputState, MeshVertex, SceneObject};

    // Texture
    pub use crate::texture::{Texture, TextureError, WrapMode};

    // Math
    pub use crate::math::mat3::Mat3;
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Rendering
    pub use crate::render::FrameBuffer;
    pub use crate::transform::{ModelTransform, Pipeline, Vertex};

    // Window & Input
    pub use crate::window::{
        FpsCounter, FrameLimiter, Key, Window, WindowEvent, WINDOW_HEIGHT, WINDOW_WIDTH,
    };
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        EdgeFunctionRasterizer, FlatShader, FrameBuffer, GouraudShader, PixelShader,
        TextureShader, Triangle,
    };
}
