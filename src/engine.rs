//! Core rendering engine.
//!
//! [`Engine`] is the caller-owned context object for the whole renderer:
//! camera, projection, scene objects, and the optional texture all live
//! here, passed explicitly into each frame's `update` and `render` calls.
//! There is no process-wide mutable state.
//!
//! The engine does not own pixel memory. `render` writes through a
//! [`FrameBuffer`] view borrowed from the caller, who allocates the color
//! and depth buffers and presents them afterwards.

use crate::camera::Camera;
use crate::colors;
use crate::math::vec3::Vec3;
use crate::projection::Projection;
use crate::render::{EdgeFunctionRasterizer, FrameBuffer, Triangle};
use crate::scene::{InputState, SceneObject};
use crate::texture::Texture;
use crate::transform::{Pipeline, Vertex};

const DEFAULT_FOV_DEGREES: f32 = 60.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

/// Camera translation per update tick while a move action is held.
const MOVE_RATE: f32 = 0.1;
/// Camera rotation in degrees per update tick while a look action is held.
const LOOK_RATE: f32 = 2.0;

/// Rendering mode presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Filled triangles only (key: 1)
    #[default]
    Filled,
    /// Filled + wireframe overlay (key: 2)
    FilledWireframe,
    /// Wireframe only (key: 3)
    Wireframe,
}

pub struct Engine {
    camera: Camera,
    projection: Projection,
    objects: Vec<SceneObject>,
    texture: Option<Texture>,
    rasterizer: EdgeFunctionRasterizer,
    render_mode: RenderMode,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Self {
        let aspect_ratio = width as f32 / height as f32;
        Self {
            camera: Camera::default(),
            projection: Projection::from_degrees(DEFAULT_FOV_DEGREES, aspect_ratio, Z_NEAR, Z_FAR),
            objects: Vec::new(),
            texture: None,
            rasterizer: EdgeFunctionRasterizer::new(),
            render_mode: RenderMode::default(),
        }
    }

    /// Populates the built-in demo scene: a vertex-colored cube and a
    /// texture-mapped quad, both slowly spinning, plus a generated
    /// checkerboard so texturing works without an asset on disk.
    pub fn load_demo_scene(&mut self) {
        let mut cube = SceneObject::cube();
        cube.position = Vec3::new(-2.2, 0.0, -7.0);
        cube.angular_velocity = Vec3::new(0.4, 0.7, 0.0);
        self.objects.push(cube);

        let mut quad = SceneObject::quad();
        quad.position = Vec3::new(2.2, 0.0, -7.0);
        quad.angular_velocity = Vec3::new(0.0, 0.9, 0.0);
        quad.scale = 1.5;
        self.objects.push(quad);

        if self.texture.is_none() {
            self.texture = Some(Texture::checkerboard(64, 64, 8, 0x00E0E0E0, 0x00B03030));
        }
    }

    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = Some(texture);
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut Vec<SceneObject> {
        &mut self.objects
    }

    /// Updates the projection after a viewport size change.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection
            .set_aspect_ratio(width as f32 / height as f32);
    }

    /// Advances scene and camera state by one tick of semantic input.
    pub fn update(&mut self, input: &InputState) {
        for object in &mut self.objects {
            object.update(input);
        }

        if input.move_forward {
            self.camera.move_forward(MOVE_RATE);
        }
        if input.move_back {
            self.camera.move_forward(-MOVE_RATE);
        }
        if input.strafe_right {
            self.camera.move_right(MOVE_RATE);
        }
        if input.strafe_left {
            self.camera.move_right(-MOVE_RATE);
        }

        let look_step = LOOK_RATE.to_radians();
        if input.look_left {
            self.camera.rotate_yaw(look_step);
        }
        if input.look_right {
            self.camera.rotate_yaw(-look_step);
        }
        if input.look_up {
            self.camera.rotate_pitch(look_step);
        }
        if input.look_down {
            self.camera.rotate_pitch(-look_step);
        }
    }

    /// Renders the scene into the caller's buffers.
    ///
    /// Clears color and depth first (the rasterizer never paints outside
    /// triangle interiors), then runs every face of every object through
    /// the transform pipeline and the rasterizer.
    pub fn render(&self, fb: &mut FrameBuffer) {
        fb.clear(colors::BACKGROUND);
        fb.clear_depth();

        let pipeline = Pipeline::new(&self.camera, &self.projection, fb.width(), fb.height());

        for object in &self.objects {
            let model = object.model_transform();
            let texture = if object.textured {
                self.texture.as_ref()
            } else {
                None
            };

            for face in object.faces() {
                let mesh = object.vertices();
                let mut corners = [
                    Vertex::new(mesh[face.a].position, mesh[face.a].color, mesh[face.a].uv),
                    Vertex::new(mesh[face.b].position, mesh[face.b].color, mesh[face.b].uv),
                    Vertex::new(mesh[face.c].position, mesh[face.c].color, mesh[face.c].uv),
                ];
                for vertex in &mut corners {
                    pipeline.project(&model, vertex);
                }

                // Coarse near-plane policy: any vertex at or behind the
                // camera plane drops the whole triangle for this frame.
                if corners.iter().any(|v| v.inv_w <= 0.0) {
                    continue;
                }

                let triangle = Triangle::new(
                    [
                        corners[0].position.to_vec3(),
                        corners[1].position.to_vec3(),
                        corners[2].position.to_vec3(),
                    ],
                    [corners[0].inv_w, corners[1].inv_w, corners[2].inv_w],
                    [corners[0].color, corners[1].color, corners[2].color],
                    [corners[0].uv, corners[1].uv, corners[2].uv],
                );

                match self.render_mode {
                    RenderMode::Filled => {
                        self.rasterizer.fill_triangle(&triangle, fb, texture);
                    }
                    RenderMode::FilledWireframe => {
                        self.rasterizer.fill_triangle(&triangle, fb, texture);
                        Self::draw_wireframe(&triangle, fb);
                    }
                    RenderMode::Wireframe => {
                        Self::draw_wireframe(&triangle, fb);
                    }
                }
            }
        }
    }

    fn draw_wireframe(triangle: &Triangle, fb: &mut FrameBuffer) {
        let [p0, p1, p2] = triangle.points;
        let [w0, w1, w2] = [
            1.0 / triangle.inv_w[0],
            1.0 / triangle.inv_w[1],
            1.0 / triangle.inv_w[2],
        ];
        fb.draw_line(
            p0.x as i32,
            p0.y as i32,
            w0,
            p1.x as i32,
            p1.y as i32,
            w1,
            colors::WIREFRAME,
        );
        fb.draw_line(
            p1.x as i32,
            p1.y as i32,
            w1,
            p2.x as i32,
            p2.y as i32,
            w2,
            colors::WIREFRAME,
        );
        fb.draw_line(
            p2.x as i32,
            p2.y as i32,
            w2,
            p0.x as i32,
            p0.y as i32,
            w0,
            colors::WIREFRAME,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u32 = 64;
    const H: u32 = 48;

    fn render_once(engine: &Engine) -> Vec<u32> {
        let mut color = vec![0u32; (W * H) as usize];
        let mut depth = vec![0.0f32; (W * H) as usize];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, W, H);
        engine.render(&mut fb);
        color
    }

    #[test]
    fn demo_scene_puts_pixels_on_screen() {
        let mut engine = Engine::new(W, H);
        engine.load_demo_scene();
        let frame = render_once(&engine);
        assert!(frame.iter().any(|&c| c != colors::BACKGROUND));
    }

    #[test]
    fn empty_scene_renders_background_only() {
        let engine = Engine::new(W, H);
        let frame = render_once(&engine);
        assert!(frame.iter().all(|&c| c == colors::BACKGROUND));
    }

    #[test]
    fn object_behind_camera_leaves_frame_clear() {
        let mut engine = Engine::new(W, H);
        let mut cube = SceneObject::cube();
        cube.position = Vec3::new(0.0, 0.0, 7.0);
        engine.objects_mut().push(cube);

        let frame = render_once(&engine);
        assert!(frame.iter().all(|&c| c == colors::BACKGROUND));
    }

    #[test]
    fn update_moves_camera_forward() {
        let mut engine = Engine::new(W, H);
        let input = InputState {
            move_forward: true,
            ..InputState::default()
        };
        engine.update(&input);
        assert!(engine.camera().position().z < 0.0);
    }

    #[test]
    fn wireframe_mode_draws_edges_not_fill() {
        let mut engine = Engine::new(W, H);
        let mut quad = SceneObject::quad();
        quad.textured = false;
        quad.position = Vec3::new(0.0, 0.0, -5.0);
        engine.objects_mut().push(quad);
        engine.set_render_mode(RenderMode::Wireframe);

        let frame = render_once(&engine);
        let lit = frame.iter().filter(|&&c| c != colors::BACKGROUND).count();
        assert!(lit > 0);
        // Edges only: far fewer pixels than the filled quad's interior.
        assert!(lit < (W * H / 4) as usize);
    }
}
