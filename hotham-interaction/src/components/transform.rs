use glam::{Affine3A, Quat, Vec3};

/// An entity's pose in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// The translation of the entity
    pub translation: Vec3,
    /// The rotation of the entity
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// A transform at `translation` with no rotation
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Convenience function to convert the `Transform` into a `glam::Affine3A`
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.rotation, self.translation)
    }

    /// Update the translation and rotation from a `glam::Affine3A`, discarding any scale
    pub fn update_from_affine(&mut self, affine: &Affine3A) {
        let (_, rotation, translation) = affine.to_scale_rotation_translation();
        self.translation = translation;
        self.rotation = rotation;
    }
}
