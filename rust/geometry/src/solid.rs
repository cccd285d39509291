// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Straight wall solids.
//!
//! A wall is its location line swept sideways by half the thickness in each
//! direction and extruded upwards by its height. The result is a box with
//! six planar faces; a ray passing through the wall crosses two of them.

use nalgebra::{Isometry3, Point3, Vector3};
use smallvec::SmallVec;

use crate::bounds::BoundingBox;
use crate::curve::{Line, LENGTH_EPSILON};
use crate::error::{Error, Result};
use crate::face::Quad;
use crate::ray::Ray;

/// Face of a wall solid, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WallFace {
    Exterior = 0,
    Interior = 1,
    Start = 2,
    End = 3,
    Bottom = 4,
    Top = 5,
}

impl WallFace {
    pub const ALL: [WallFace; 6] = [
        WallFace::Exterior,
        WallFace::Interior,
        WallFace::Start,
        WallFace::End,
        WallFace::Bottom,
        WallFace::Top,
    ];

    /// Returns the face name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            WallFace::Exterior => "Exterior",
            WallFace::Interior => "Interior",
            WallFace::Start => "Start",
            WallFace::End => "End",
            WallFace::Bottom => "Bottom",
            WallFace::Top => "Top",
        }
    }
}

impl std::fmt::Display for WallFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One face crossing of a ray through a solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceHit {
    /// Distance along the ray
    pub t: f64,
    pub face: WallFace,
}

/// Six-faced solid of a straight wall.
#[derive(Debug, Clone, PartialEq)]
pub struct WallSolid {
    faces: [Quad; 6],
    bounds: BoundingBox,
}

impl WallSolid {
    /// Build the solid of a straight wall.
    ///
    /// Only the XY projection of `baseline` is used; the solid spans
    /// `base_elevation..base_elevation + height` vertically.
    pub fn from_baseline(
        baseline: &Line,
        thickness: f64,
        base_elevation: f64,
        height: f64,
    ) -> Result<Self> {
        if thickness <= 0.0 {
            return Err(Error::InvalidWall(format!("thickness must be positive, got {}", thickness)));
        }
        if height <= 0.0 {
            return Err(Error::InvalidWall(format!("height must be positive, got {}", height)));
        }

        let run = Vector3::new(
            baseline.end.x - baseline.start.x,
            baseline.end.y - baseline.start.y,
            0.0,
        );
        let length = run.norm();
        if length < LENGTH_EPSILON {
            return Err(Error::InvalidWall("location line has zero length in plan".into()));
        }

        let dir = run / length;
        let side = Vector3::new(-dir.y, dir.x, 0.0) * (thickness * 0.5);
        let up = Vector3::new(0.0, 0.0, height);

        let start = Point3::new(baseline.start.x, baseline.start.y, base_elevation);
        let end = Point3::new(baseline.end.x, baseline.end.y, base_elevation);

        // Bottom ring: a0/b0 on the exterior side, a1/b1 on the interior side
        let a0 = start + side;
        let b0 = end + side;
        let b1 = end - side;
        let a1 = start - side;
        let (a0t, b0t, b1t, a1t) = (a0 + up, b0 + up, b1 + up, a1 + up);

        // Counter-clockwise when viewed from outside
        let faces = [
            Quad::new(b0, a0, a0t, b0t),
            Quad::new(a1, b1, b1t, a1t),
            Quad::new(a0, a1, a1t, a0t),
            Quad::new(b1, b0, b0t, b1t),
            Quad::new(a0, b0, b1, a1),
            Quad::new(a0t, a1t, b1t, b0t),
        ];

        Ok(Self::from_faces(faces))
    }

    fn from_faces(faces: [Quad; 6]) -> Self {
        let bounds = BoundingBox::from_points(faces.iter().flat_map(|q| q.corners.iter()));
        Self { faces, bounds }
    }

    pub fn faces(&self) -> &[Quad; 6] {
        &self.faces
    }

    pub fn face(&self, face: WallFace) -> &Quad {
        &self.faces[face as usize]
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Solid moved by a rigid transform (e.g. a link instance placement).
    pub fn transformed(&self, transform: &Isometry3<f64>) -> Self {
        Self::from_faces(self.faces.map(|q| q.transformed(transform)))
    }

    /// Every face crossing of `ray`, ordered by distance.
    pub fn intersect_ray(&self, ray: &Ray) -> SmallVec<[FaceHit; 4]> {
        let mut hits = SmallVec::new();

        // Inflate so hits exactly on the boundary survive the slab test
        if self.bounds.inflated(LENGTH_EPSILON).intersect_ray(ray).is_none() {
            return hits;
        }

        for face in WallFace::ALL {
            if let Some(t) = self.face(face).intersect_ray(ray) {
                hits.push(FaceHit { t, face });
            }
        }

        hits.sort_by(|a, b| a.t.total_cmp(&b.t));
        hits
    }
}
