//! Axis-aligned bounding boxes and the ray test used for picking.
//!
//! Every collision query in the simulation goes through these two
//! primitives: box-vs-box overlap for movement, ray-vs-box for
//! interaction picking.

use glam::Vec3;

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Builds a box from its bottom-center point and full extents.
    /// Room geometry is specified this way (x/z centered, y at the base).
    pub fn from_center_bottom(center_bottom: Vec3, size: Vec3) -> Self {
        let half = Vec3::new(size.x / 2.0, 0.0, size.z / 2.0);
        Self {
            min: center_bottom - half,
            max: center_bottom + half + Vec3::new(0.0, size.y, 0.0),
        }
    }

    /// Builds a cube of the given half-extent around a point.
    pub fn around(center: Vec3, half_extent: f32) -> Self {
        let half = Vec3::splat(half_extent);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Center point of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }

    /// Overlap test, inclusive of touching faces.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Slab-method ray intersection. Returns the entry distance along
    /// `dir` if the ray hits within `max_dist`. A ray starting inside
    /// the box reports distance 0.
    pub fn ray_hit(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<f32> {
        let inv = dir.recip();
        let t1 = (self.min - origin) * inv;
        let t2 = (self.max - origin) * inv;

        let t_near = t1.min(t2);
        let t_far = t1.max(t2);

        let t_min = t_near.max_element().max(0.0);
        let t_max = t_far.min_element();

        if t_min <= t_max && t_min <= max_dist {
            Some(t_min)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(at: Vec3) -> Aabb {
        Aabb::new(at, at + Vec3::ONE)
    }

    #[test]
    fn test_overlap_and_separation() {
        let a = unit_box(Vec3::ZERO);
        let b = unit_box(Vec3::new(0.5, 0.5, 0.5));
        let c = unit_box(Vec3::new(2.0, 0.0, 0.0));

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_faces_count_as_overlap() {
        let a = unit_box(Vec3::ZERO);
        let b = unit_box(Vec3::new(1.0, 0.0, 0.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_from_center_bottom() {
        let b = Aabb::from_center_bottom(Vec3::new(2.0, 1.0, -3.0), Vec3::new(4.0, 2.0, 6.0));
        assert_eq!(b.min, Vec3::new(0.0, 1.0, -6.0));
        assert_eq!(b.max, Vec3::new(4.0, 3.0, 0.0));
    }

    #[test]
    fn test_ray_hit_head_on() {
        let b = unit_box(Vec3::new(0.0, 0.0, -5.0));
        let t = b
            .ray_hit(Vec3::new(0.5, 0.5, 0.0), Vec3::new(0.0, 0.0, -1.0), 10.0)
            .expect("ray should hit");
        assert!((t - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_ray_miss_and_out_of_range() {
        let b = unit_box(Vec3::new(0.0, 0.0, -5.0));
        // Pointing away
        assert!(
            b.ray_hit(Vec3::new(0.5, 0.5, 0.0), Vec3::new(0.0, 0.0, 1.0), 10.0)
                .is_none()
        );
        // Within the ray's line but beyond range
        assert!(
            b.ray_hit(Vec3::new(0.5, 0.5, 0.0), Vec3::new(0.0, 0.0, -1.0), 3.0)
                .is_none()
        );
    }

    #[test]
    fn test_ray_from_inside_reports_zero() {
        let b = unit_box(Vec3::ZERO);
        let t = b
            .ray_hit(Vec3::splat(0.5), Vec3::new(1.0, 0.0, 0.0), 10.0)
            .expect("ray from inside should hit");
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_ray_parallel_to_axis() {
        // Ray parallel to a slab but outside it must miss despite the
        // infinite inverse components.
        let b = unit_box(Vec3::ZERO);
        assert!(
            b.ray_hit(Vec3::new(2.0, 0.5, 0.5), Vec3::new(0.0, 0.0, 1.0), 10.0)
                .is_none()
        );
    }
}
