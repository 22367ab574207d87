use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Axis-aligned bounding box relative to an entity's [`MapPosition`].
///
/// Distances between agents are measured between the centers of their boxes.
///
/// [`MapPosition`]: super::mapposition::MapPosition
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
    pub offset: Vec2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
        }
    }

    /// Modify BoxCollider with given offset
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vec2) -> (Vec2, Vec2) {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        (p0.min(p1), p0.max(p1))
    }

    /// Center of the box in world space.
    pub fn center(&self, position: Vec2) -> Vec2 {
        let (min, max) = self.aabb(position);
        (min + max) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_with_offset() {
        let collider = BoxCollider::new(64.0, 32.0).with_offset(Vec2::new(0.0, 32.0));
        assert_eq!(collider.center(Vec2::new(100.0, 100.0)), Vec2::new(132.0, 148.0));
    }

    #[test]
    fn test_aabb_normalizes_negative_size() {
        let collider = BoxCollider::new(-10.0, -20.0);
        let (min, max) = collider.aabb(Vec2::ZERO);
        assert_eq!(min, Vec2::new(-10.0, -20.0));
        assert_eq!(max, Vec2::ZERO);
    }
}
