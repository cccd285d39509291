// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar faces and ray/face intersection.

use nalgebra::{Isometry3, Point3, Vector3};

use crate::ray::Ray;

/// Determinants below this are treated as a ray parallel to the face.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Triangle definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Point3<f64>,
    pub v1: Point3<f64>,
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Calculate triangle normal
    pub fn normal(&self) -> Vector3<f64> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2).normalize()
    }

    /// Calculate triangle area
    pub fn area(&self) -> f64 {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2).norm() * 0.5
    }

    /// Möller–Trumbore ray/triangle test.
    ///
    /// Edges are inclusive so a ray through the shared diagonal of a quad is
    /// not lost. Hits behind the ray origin are rejected.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f64> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let pvec = ray.direction.cross(&edge2);
        let det = edge1.dot(&pvec);
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let tvec = ray.origin - self.v0;
        let u = tvec.dot(&pvec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(&edge1);
        let v = ray.direction.dot(&qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(&qvec) * inv_det;
        (t >= 0.0).then_some(t)
    }
}

/// Planar convex quadrilateral, corners in boundary order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub corners: [Point3<f64>; 4],
}

impl Quad {
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>, d: Point3<f64>) -> Self {
        Self {
            corners: [a, b, c, d],
        }
    }

    /// Fan split along the a–c diagonal.
    pub fn triangles(&self) -> [Triangle; 2] {
        let [a, b, c, d] = self.corners;
        [Triangle::new(a, b, c), Triangle::new(a, c, d)]
    }

    /// Face normal following the corner winding
    pub fn normal(&self) -> Vector3<f64> {
        self.triangles()[0].normal()
    }

    pub fn area(&self) -> f64 {
        self.triangles().iter().map(Triangle::area).sum()
    }

    /// Ray parameter of the crossing with this face, one value per face even
    /// when the ray passes exactly through the diagonal.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f64> {
        self.triangles().iter().find_map(|tri| tri.intersect_ray(ray))
    }

    pub fn transformed(&self, transform: &Isometry3<f64>) -> Self {
        Self {
            corners: self.corners.map(|p| transform * p),
        }
    }
}
