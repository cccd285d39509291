// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding boxes used to reject rays before face tests.

use nalgebra::Point3;

use crate::ray::Ray;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// Box containing nothing; expanding it by a point yields that point.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box containing all `points`.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Self {
        let mut bounds = Self::empty();
        for p in points {
            bounds.expand(p);
        }
        bounds
    }

    /// Grow the box to include `point`.
    pub fn expand(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Box grown by `margin` on every side.
    pub fn inflated(&self, margin: f64) -> Self {
        Self {
            min: Point3::new(self.min.x - margin, self.min.y - margin, self.min.z - margin),
            max: Point3::new(self.max.x + margin, self.max.y + margin, self.max.z + margin),
        }
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Slab test against a ray.
    ///
    /// Returns the entry and exit parameters clamped to the forward half of
    /// the ray, or `None` when the ray misses the box.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }

        let inv = ray.inv_direction();
        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            if inv[axis].is_infinite() {
                // Parallel to this slab: inside or never.
                if origin < self.min[axis] || origin > self.max[axis] {
                    return None;
                }
                continue;
            }
            let t1 = (self.min[axis] - origin) * inv[axis];
            let t2 = (self.max[axis] - origin) * inv[axis];
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
        }

        if t_max >= t_min && t_max >= 0.0 {
            Some((t_min.max(0.0), t_max))
        } else {
            None
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn unit_box() -> BoundingBox {
        BoundingBox::from_points(&[Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)])
    }

    #[test]
    fn test_ray_box_hit() {
        let ray = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        let (t_min, t_max) = unit_box().intersect_ray(&ray).unwrap();
        assert!((t_min - 5.0).abs() < 1e-10);
        assert!((t_max - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_ray_box_miss() {
        let ray = Ray::new(Point3::new(-5.0, 5.0, 5.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        assert!(unit_box().intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_ray_box_behind() {
        let ray = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vector3::new(-1.0, 0.0, 0.0)).unwrap();
        assert!(unit_box().intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_ray_starting_inside() {
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        let (t_min, t_max) = unit_box().intersect_ray(&ray).unwrap();
        assert_eq!(t_min, 0.0);
        assert!((t_max - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_empty_box() {
        let bounds = BoundingBox::empty();
        assert!(bounds.is_empty());
        let ray = Ray::new(Point3::origin(), Vector3::new(1.0, 1.0, 1.0)).unwrap();
        assert!(bounds.intersect_ray(&ray).is_none());
        assert!(!bounds.inflated(0.1).contains(&Point3::origin()));
    }
}
