// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sleeve Geometry
//!
//! Geometry primitives used to find where MEP centerlines pierce walls:
//! straight and arc centerlines, rays, bounding boxes, planar faces and the
//! six-faced solid of a straight wall. Math types come from nalgebra.

pub mod bounds;
pub mod curve;
pub mod error;
pub mod face;
pub mod ray;
pub mod solid;

// Re-export nalgebra types for convenience
pub use nalgebra::{Isometry3, Point3, Translation3, Unit, UnitQuaternion, Vector3};

pub use bounds::BoundingBox;
pub use curve::{Arc, Curve, Line, LENGTH_EPSILON};
pub use error::{Error, Result};
pub use face::{Quad, Triangle};
pub use ray::Ray;
pub use solid::{FaceHit, WallFace, WallSolid};
