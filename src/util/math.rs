//! Math type re-exports and FBX-specific rotation utilities.
//!
//! This module re-exports types from `glam` and provides the Euler rotation
//! handling the format needs: a configurable rotation order and conversions
//! to matrices and quaternions. FBX stores node transforms in double
//! precision, so the double-precision glam types are the working set.

// Re-export glam types
pub use glam::{
    // Double precision (primary working set)
    DMat3, DMat4, DQuat, DVec2, DVec3, DVec4,
    // Single precision, for downstream consumers
    Mat3, Mat4, Quat, Vec2, Vec3, Vec4,
};

/// Degrees to radians. The format stores all rotation triples in degrees.
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Euler rotation application order.
///
/// Letters name the rotation factors left to right: `Zyx` composes
/// `Rz * Ry * Rx`. The format defaults to Z-Y-X.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RotationOrder {
    Xyz,
    Xzy,
    Yzx,
    Yxz,
    Zxy,
    #[default]
    Zyx,
}

impl RotationOrder {
    /// Decode the format's `RotationOrder` property value.
    pub fn from_index(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Xyz),
            1 => Some(Self::Xzy),
            2 => Some(Self::Yzx),
            3 => Some(Self::Yxz),
            4 => Some(Self::Zxy),
            5 => Some(Self::Zyx),
            _ => None,
        }
    }

    /// Rotation factors, leftmost first.
    fn axes(self) -> [Axis; 3] {
        match self {
            Self::Xyz => [Axis::X, Axis::Y, Axis::Z],
            Self::Xzy => [Axis::X, Axis::Z, Axis::Y],
            Self::Yzx => [Axis::Y, Axis::Z, Axis::X],
            Self::Yxz => [Axis::Y, Axis::X, Axis::Z],
            Self::Zxy => [Axis::Z, Axis::X, Axis::Y],
            Self::Zyx => [Axis::Z, Axis::Y, Axis::X],
        }
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
    Z,
}

/// Euler angles (radians) with an explicit application order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Euler {
    pub angles: DVec3,
    pub order: RotationOrder,
}

impl Euler {
    /// Create a new Euler rotation from angles in radians.
    #[inline]
    pub fn new(angles: DVec3, order: RotationOrder) -> Self {
        Self { angles, order }
    }

    /// Build the 4x4 rotation matrix for these angles in this order.
    pub fn to_matrix(&self) -> DMat4 {
        let [a, b, c] = self.order.axes();
        self.axis_matrix(a) * self.axis_matrix(b) * self.axis_matrix(c)
    }

    /// Convert to a quaternion.
    pub fn to_quat(&self) -> DQuat {
        DQuat::from_mat4(&self.to_matrix())
    }

    fn axis_matrix(&self, axis: Axis) -> DMat4 {
        match axis {
            Axis::X => DMat4::from_rotation_x(self.angles.x),
            Axis::Y => DMat4::from_rotation_y(self.angles.y),
            Axis::Z => DMat4::from_rotation_z(self.angles.z),
        }
    }
}

/// Compose a local matrix from position, orientation and scale.
#[inline]
pub fn compose(position: DVec3, rotation: DQuat, scale: DVec3) -> DMat4 {
    DMat4::from_scale_rotation_translation(scale, rotation, position)
}

/// Decompose an affine matrix into (position, orientation, scale).
#[inline]
pub fn decompose(matrix: &DMat4) -> (DVec3, DQuat, DVec3) {
    let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
    (translation, rotation, scale)
}
