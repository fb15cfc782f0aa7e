//! Local transform composition.
//!
//! The format's node transform model is wider than plain TRS: a rotation
//! pivot offset, pre- and post-rotation, and a configurable Euler order all
//! feed one local matrix. The composition order below is load-bearing;
//! changing it changes the rendered result for any node using pre/post
//! rotation.

use crate::util::{DMat4, DVec3, DVec4, Euler, RotationOrder, DEG_TO_RAD};

/// Optional transform parameters read from a model's property block.
///
/// Rotation triples are in degrees. Absent fields default to identity/zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformData {
    pub translation: Option<DVec3>,
    pub rotation_offset: Option<DVec3>,
    pub rotation: Option<DVec3>,
    pub pre_rotation: Option<DVec3>,
    pub post_rotation: Option<DVec3>,
    pub scale: Option<DVec3>,
    pub rotation_order: Option<RotationOrder>,
}

impl TransformData {
    /// Compose the local matrix.
    ///
    /// Scale and translation are composed first (translation written
    /// directly into the last column, overwriting it), then the combined
    /// rotation is applied by right-multiplication:
    ///
    /// `local = (scale + translation) * (pre * base * post^-1)`
    pub fn local_matrix(&self) -> DMat4 {
        let order = self.rotation_order.unwrap_or_default();

        let mut translation = self.translation.unwrap_or(DVec3::ZERO);
        if let Some(offset) = self.rotation_offset {
            translation += offset;
        }

        let mut rotation = DMat4::IDENTITY;
        if let Some(r) = self.rotation {
            rotation = Euler::new(r * DEG_TO_RAD, order).to_matrix();
        }
        if let Some(r) = self.pre_rotation {
            rotation = Euler::new(r * DEG_TO_RAD, order).to_matrix() * rotation;
        }
        if let Some(r) = self.post_rotation {
            rotation *= Euler::new(r * DEG_TO_RAD, order).to_matrix().inverse();
        }

        let mut transform = DMat4::IDENTITY;
        if let Some(s) = self.scale {
            transform = DMat4::from_scale(s);
        }
        // Overwrites the translation column; the scale diagonal is untouched.
        transform.w_axis = DVec4::new(translation.x, translation.y, translation.z, 1.0);

        transform * rotation
    }
}
