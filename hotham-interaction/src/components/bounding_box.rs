use glam::Vec3;

use super::Transform;

/// The extent of an entity, relative to its [`Transform`].
///
/// The registration point is where the entity's position sits inside the box, from `(0, 0, 0)` at
/// its minimum corner to `(1, 1, 1)` at its maximum corner. The default is the centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Size of the box along each local axis, in metres
    pub dimensions: Vec3,
    /// Where the entity's position sits inside the box
    pub registration_point: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::from_dimensions(Vec3::splat(0.1))
    }
}

impl BoundingBox {
    /// A box of the given size centred on the entity's position
    pub fn from_dimensions(dimensions: Vec3) -> Self {
        Self {
            dimensions,
            registration_point: Vec3::splat(0.5),
        }
    }

    /// Distance from a world space `point` to this box when placed at `transform`. Zero if the
    /// point is inside the box.
    pub fn distance_to_point(&self, transform: &Transform, point: Vec3) -> f32 {
        let local = transform.rotation.inverse() * (point - transform.translation);
        let min = -self.dimensions * self.registration_point;
        let max = self.dimensions * (Vec3::ONE - self.registration_point);
        let outside = (min - local).max(local - max).max(Vec3::ZERO);
        outside.length()
    }
}
