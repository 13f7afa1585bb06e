//! Scene state: mesh data, per-object transforms, and the per-frame update
//! step.
//!
//! Objects are initialized once at startup and mutated every frame by the
//! update step before the renderer consumes them. Rotation angles are kept
//! in **degrees** and wrapped into (-180, 180] after every update tick.

use crate::math::mat3::Mat3;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::transform::ModelTransform;

/// Degrees of object rotation applied per update tick while a rotate action
/// is held.
pub const TURN_RATE: f32 = 2.0;

/// Semantic input actions for one update tick.
///
/// Raw key and device codes are decoded upstream by the platform layer; the
/// core only ever sees these flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    // Object rotation
    pub rotate_left: bool,
    pub rotate_right: bool,

    // Camera movement
    pub move_forward: bool,
    pub move_back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,

    // Camera look
    pub look_left: bool,
    pub look_right: bool,
    pub look_up: bool,
    pub look_down: bool,
}

/// A triangle's three indices into its object's vertex list.
///
/// Quads are expressed as two faces sharing indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

/// A model-space vertex with its shading attributes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub color: u32,
    pub uv: Vec2,
}

const fn v(x: f32, y: f32, z: f32, color: u32) -> MeshVertex {
    MeshVertex {
        position: Vec3::new(x, y, z),
        color,
        uv: Vec2::ZERO,
    }
}

const fn vt(x: f32, y: f32, z: f32, u: f32, tv: f32) -> MeshVertex {
    MeshVertex {
        position: Vec3::new(x, y, z),
        color: 0x00FFFFFF,
        uv: Vec2::new(u, tv),
    }
}

const fn face(a: usize, b: usize, c: usize) -> Face {
    Face { a, b, c }
}

/// Unit cube with a distinct color per corner.
pub const CUBE_VERTICES: [MeshVertex; 8] = [
    v(-1.0, -1.0, -1.0, 0x00FF0000),
    v(-1.0, 1.0, -1.0, 0x0000FF00),
    v(1.0, 1.0, -1.0, 0x000000FF),
    v(1.0, -1.0, -1.0, 0x00FFFF00),
    v(1.0, 1.0, 1.0, 0x00FF00FF),
    v(1.0, -1.0, 1.0, 0x0000FFFF),
    v(-1.0, 1.0, 1.0, 0x00FFFFFF),
    v(-1.0, -1.0, 1.0, 0x00FF8000),
];

/// Cube faces, wound clockwise when viewed from outside.
pub const CUBE_FACES: [Face; 12] = [
    // +Z (toward the default camera)
    face(6, 4, 5),
    face(6, 5, 7),
    // -Z
    face(2, 1, 0),
    face(2, 0, 3),
    // +X
    face(4, 2, 3),
    face(4, 3, 5),
    // -X
    face(1, 6, 7),
    face(1, 7, 0),
    // +Y
    face(6, 1, 2),
    face(6, 2, 4),
    // -Y
    face(7, 5, 3),
    face(7, 3, 0),
];

/// Unit quad in the XY plane with UVs at the corners, wound clockwise when
/// viewed from +Z.
pub const QUAD_VERTICES: [MeshVertex; 4] = [
    vt(-1.0, 1.0, 0.0, 0.0, 0.0),
    vt(1.0, 1.0, 0.0, 1.0, 0.0),
    vt(1.0, -1.0, 0.0, 1.0, 1.0),
    vt(-1.0, -1.0, 0.0, 0.0, 1.0),
];

pub const QUAD_FACES: [Face; 2] = [face(0, 1, 2), face(0, 2, 3)];

/// Wraps an angle in degrees into (-180, 180].
///
/// A single +/-360 adjustment, matching the per-tick update where deltas are
/// always far smaller than a full turn.
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    if angle > 180.0 {
        angle - 360.0
    } else if angle <= -180.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// A drawable object: mesh data plus world placement and motion.
#[derive(Clone, Debug)]
pub struct SceneObject {
    vertices: Vec<MeshVertex>,
    faces: Vec<Face>,

    /// World position.
    pub position: Vec3,
    /// Euler rotation in degrees (x = pitch, y = yaw, z = roll).
    pub rotation: Vec3,
    /// Uniform scale factor.
    pub scale: f32,
    /// Degrees of rotation accumulated per update tick.
    pub angular_velocity: Vec3,
    /// Whether the renderer should texture-map this object instead of
    /// interpolating its vertex colors.
    pub textured: bool,
}

impl SceneObject {
    pub fn new(vertices: Vec<MeshVertex>, faces: Vec<Face>) -> Self {
        Self {
            vertices,
            faces,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            angular_velocity: Vec3::ZERO,
            textured: false,
        }
    }

    /// The built-in vertex-colored cube.
    pub fn cube() -> Self {
        Self::new(CUBE_VERTICES.to_vec(), CUBE_FACES.to_vec())
    }

    /// The built-in texture-mapped quad.
    pub fn quad() -> Self {
        let mut object = Self::new(QUAD_VERTICES.to_vec(), QUAD_FACES.to_vec());
        object.textured = true;
        object
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// World orientation matrix built from the Euler angles.
    pub fn orientation(&self) -> Mat3 {
        Mat3::rotation_y(self.rotation.y.to_radians())
            * Mat3::rotation_x(self.rotation.x.to_radians())
            * Mat3::rotation_z(self.rotation.z.to_radians())
    }

    /// Placement for the transform pipeline.
    pub fn model_transform(&self) -> ModelTransform {
        ModelTransform {
            position: self.position,
            orientation: self.orientation(),
            scale: self.scale,
        }
    }

    /// Advances the object's rotation for one tick.
    ///
    /// The free-running angular velocity always applies; held rotate actions
    /// add +/-TURN_RATE degrees of yaw on top. All angles wrap into
    /// (-180, 180].
    pub fn update(&mut self, input: &InputState) {
        self.rotation = self.rotation + self.angular_velocity;
        if input.rotate_left {
            self.rotation.y += TURN_RATE;
        }
        if input.rotate_right {
            self.rotation.y -= TURN_RATE;
        }
        self.rotation.x = wrap_degrees(self.rotation.x);
        self.rotation.y = wrap_degrees(self.rotation.y);
        self.rotation.z = wrap_degrees(self.rotation.z);
    }
}
