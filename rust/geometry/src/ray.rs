// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ray representation.

use nalgebra::{Point3, Unit, Vector3};

use crate::curve::LENGTH_EPSILON;
use crate::error::{Error, Result};

/// A half-line in 3D space defined by origin and unit direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3<f64>,
    /// Unit direction of the ray.
    pub direction: Unit<Vector3<f64>>,
    /// Reciprocal of direction components for slab tests.
    inv_direction: Vector3<f64>,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Result<Self> {
        let direction = Unit::try_new(direction, LENGTH_EPSILON).ok_or(Error::ZeroDirection)?;
        Ok(Self::from_unit(origin, direction))
    }

    /// Create a ray from an already normalized direction.
    pub fn from_unit(origin: Point3<f64>, direction: Unit<Vector3<f64>>) -> Self {
        let inv_direction = Vector3::new(1.0 / direction.x, 1.0 / direction.y, 1.0 / direction.z);
        Self {
            origin,
            direction,
            inv_direction,
        }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction.into_inner() * t
    }

    #[inline]
    pub(crate) fn inv_direction(&self) -> &Vector3<f64> {
        &self.inv_direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        let p = ray.at(5.0);
        assert!((p.x - 5.0).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
        assert!(p.z.abs() < 1e-12);
    }

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Point3::origin(), Vector3::new(0.0, 3.0, 4.0)).unwrap();
        assert!((ray.direction.norm() - 1.0).abs() < 1e-12);
        assert!((ray.direction.y - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_zero_direction_rejected() {
        let result = Ray::new(Point3::origin(), Vector3::zeros());
        assert!(matches!(result, Err(Error::ZeroDirection)));
    }
}
