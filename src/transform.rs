//! The vertex transform pipeline: model space to screen space.
//!
//! A vertex travels through five algebraic stages each frame:
//!
//! 1. **Scale** by the object's uniform scale factor
//! 2. **Rotate** by the object's world orientation matrix
//! 3. **Translate** by the object's world position
//! 4. **World -> camera** via the view matrix (transpose-as-inverse)
//! 5. **Camera -> clip** via the perspective matrix, then the perspective
//!    divide and the NDC -> screen viewport mapping
//!
//! The [`Vertex`] record is mutated in place: its position enters in model
//! space and leaves in screen space, and the divide stage stores the
//! reciprocal of the pre-divide w, which the rasterizer needs for depth
//! testing and perspective-correct interpolation.
//!
//! There is no near-plane clipping here. A vertex at or behind the camera
//! plane ends up with `w <= 0` and nonsense screen coordinates; the
//! rasterizer skips any triangle carrying one (coarse reject rather than
//! true clipping).

use crate::camera::Camera;
use crate::math::mat3::Mat3;
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::projection::Projection;

/// A single vertex flowing through the pipeline.
///
/// One mutable record per vertex per frame: `position` is overwritten in
/// place as it moves through the spaces rather than copied per stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// Model-space position on entry; screen-space position after
    /// [`Pipeline::project`].
    pub position: Vec4,
    /// Packed 0xRRGGBB vertex color.
    pub color: u32,
    /// Texture coordinates in [0, 1].
    pub uv: Vec2,
    /// Reciprocal of the pre-divide clip-space w. Zero until projected;
    /// non-positive afterwards means the vertex sits at or behind the
    /// camera plane.
    pub inv_w: f32,
}

impl Vertex {
    pub fn new(position: Vec3, color: u32, uv: Vec2) -> Self {
        Self {
            position: Vec4::from_vec3(position, 1.0),
            color,
            uv,
            inv_w: 0.0,
        }
    }
}

/// Per-object placement in the world: uniform scale, orientation, position.
#[derive(Clone, Copy, Debug)]
pub struct ModelTransform {
    pub position: Vec3,
    pub orientation: Mat3,
    pub scale: f32,
}

impl ModelTransform {
    /// Applies scale, then rotation, then translation to a model-space
    /// point.
    #[inline]
    pub fn apply(&self, point: Vec3) -> Vec3 {
        self.orientation * (point * self.scale) + self.position
    }
}

/// The per-frame transform pipeline.
///
/// Built once per frame from the camera pose, projection parameters, and
/// viewport size, then applied to every vertex of every object.
pub struct Pipeline {
    world_to_camera: Mat4,
    camera_to_clip: Mat4,
    ndc_to_screen: Mat4,
}

impl Pipeline {
    pub fn new(camera: &Camera, projection: &Projection, width: u32, height: u32) -> Self {
        Self {
            world_to_camera: camera.view_matrix(),
            camera_to_clip: projection.matrix(),
            ndc_to_screen: Mat4::viewport(width, height),
        }
    }

    /// Runs one vertex through the full pipeline in place.
    ///
    /// On return, `vertex.position` is in screen space (x/y in pixels, z in
    /// [0, 1]) and `vertex.inv_w` holds the reciprocal of the clip-space w.
    /// The divide is unguarded: `w == 0` (a vertex exactly on the camera
    /// plane) produces non-finite coordinates, which the rasterizer's
    /// behind-camera reject absorbs.
    pub fn project(&self, model: &ModelTransform, vertex: &mut Vertex) {
        let world = model.apply(vertex.position.to_vec3());
        let view = self.world_to_camera * Vec4::from_vec3(world, 1.0);
        let clip = self.camera_to_clip * view;

        vertex.inv_w = 1.0 / clip.w;
        let ndc = clip / clip.w;

        vertex.position = self.ndc_to_screen * ndc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn identity_model() -> ModelTransform {
        ModelTransform {
            position: Vec3::ZERO,
            orientation: Mat3::identity(),
            scale: 1.0,
        }
    }

    fn test_pipeline() -> Pipeline {
        let camera = Camera::new(Vec3::ZERO);
        let projection = Projection::new(FRAC_PI_2, 1.0, 0.1, 100.0);
        Pipeline::new(&camera, &projection, 800, 600)
    }

    #[test]
    fn model_transform_applies_scale_rotate_translate_in_order() {
        let model = ModelTransform {
            position: Vec3::new(10.0, 0.0, 0.0),
            orientation: Mat3::rotation_z(FRAC_PI_2),
            scale: 2.0,
        };
        // (1,0,0) -> scaled (2,0,0) -> rotated (0,2,0) -> translated (10,2,0)
        let p = model.apply(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn center_of_view_projects_to_screen_center() {
        let pipeline = test_pipeline();
        let model = ModelTransform {
            position: Vec3::new(0.0, 0.0, -5.0),
            ..identity_model()
        };
        let mut vertex = Vertex::new(Vec3::ZERO, 0, Vec2::ZERO);
        pipeline.project(&model, &mut vertex);

        assert_relative_eq!(vertex.position.x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(vertex.position.y, 300.0, epsilon = 1e-3);
    }

    #[test]
    fn divide_stores_reciprocal_of_pre_divide_w() {
        let pipeline = test_pipeline();
        let model = ModelTransform {
            position: Vec3::new(0.0, 0.0, -5.0),
            ..identity_model()
        };
        let mut vertex = Vertex::new(Vec3::ZERO, 0, Vec2::ZERO);
        pipeline.project(&model, &mut vertex);

        // Clip w equals the view-space distance: 5. Its reciprocal survives
        // the divide on the vertex record.
        assert_relative_eq!(vertex.inv_w, 0.2, epsilon = 1e-5);
        assert_relative_eq!(vertex.position.w, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn behind_camera_vertex_gets_negative_inv_w() {
        let pipeline = test_pipeline();
        let model = ModelTransform {
            position: Vec3::new(0.0, 0.0, 5.0),
            ..identity_model()
        };
        let mut vertex = Vertex::new(Vec3::ZERO, 0, Vec2::ZERO);
        pipeline.project(&model, &mut vertex);
        assert!(vertex.inv_w < 0.0);
    }

    #[test]
    fn frustum_top_edge_maps_to_ndc_one() {
        // With fov_y 90 degrees, the frustum's top edge at distance d is
        // y = tan(45 degrees) * d = d.
        let projection = Projection::new(FRAC_PI_2, 1.0, 0.1, 100.0);
        let clip = projection.matrix() * Vec4::point(0.0, 5.0, -5.0);
        let ndc_y = clip.y / clip.w;
        assert_relative_eq!(ndc_y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn ndc_corners_map_to_screen_corners_exactly() {
        let vp = Mat4::viewport(800, 600);

        let lower_left = vp * Vec4::point(-1.0, -1.0, 0.0);
        assert_eq!(lower_left.x, 0.0);
        assert_eq!(lower_left.y, 600.0);

        let upper_right = vp * Vec4::point(1.0, 1.0, 0.0);
        assert_eq!(upper_right.x, 800.0);
        assert_eq!(upper_right.y, 0.0);
    }

    #[test]
    fn ndc_depth_range_maps_to_zero_one() {
        let vp = Mat4::viewport(800, 600);
        assert_eq!((vp * Vec4::point(0.0, 0.0, -1.0)).z, 0.0);
        assert_eq!((vp * Vec4::point(0.0, 0.0, 1.0)).z, 1.0);
    }
}
