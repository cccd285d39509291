// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conduits and the rays traced along them.

use nalgebra::{Point3, Unit, Vector3};
use serde::{Deserialize, Serialize};
use sleeve_geometry::Curve;
use sleeve_model::ElementId;

use crate::error::{Error, Result};

/// Kind of MEP conduit. Ducts are processed before pipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConduitKind {
    Duct,
    Pipe,
}

impl ConduitKind {
    pub const ALL: [ConduitKind; 2] = [ConduitKind::Duct, ConduitKind::Pipe];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConduitKind::Duct => "duct",
            ConduitKind::Pipe => "pipe",
        }
    }
}

impl std::fmt::Display for ConduitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A duct or pipe as seen by the planner.
#[derive(Debug, Clone, PartialEq)]
pub struct Conduit {
    pub id: ElementId,
    pub kind: ConduitKind,
    pub centerline: Curve,
    pub diameter: f64,
}

/// Ray along a straight conduit centerline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConduitRay {
    pub conduit: ElementId,
    pub kind: ConduitKind,
    /// Start point of the centerline.
    pub origin: Point3<f64>,
    pub direction: Unit<Vector3<f64>>,
    /// Centerline length; crossings further away are ignored.
    pub max_distance: f64,
    pub diameter: f64,
}

impl ConduitRay {
    pub fn from_conduit(conduit: &Conduit) -> Result<Self> {
        let line = conduit
            .centerline
            .as_line()
            .ok_or(Error::NonLinearCenterline(conduit.id))?;
        let direction = line
            .direction()
            .map_err(|_| Error::DegenerateCenterline(conduit.id))?;
        if !(conduit.diameter.is_finite() && conduit.diameter > 0.0) {
            return Err(Error::InvalidDiameter {
                conduit: conduit.id,
                diameter: conduit.diameter,
            });
        }

        Ok(Self {
            conduit: conduit.id,
            kind: conduit.kind,
            origin: line.end_point(0),
            direction,
            max_distance: line.length(),
            diameter: conduit.diameter,
        })
    }

    /// Point at `distance` along the ray.
    pub fn point_at(&self, distance: f64) -> Point3<f64> {
        self.origin + self.direction.into_inner() * distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sleeve_geometry::{Arc, Line};

    fn duct(start: Point3<f64>, end: Point3<f64>, diameter: f64) -> Conduit {
        Conduit {
            id: ElementId::new(7),
            kind: ConduitKind::Duct,
            centerline: Curve::Line(Line::new(start, end)),
            diameter,
        }
    }

    #[test]
    fn ray_follows_centerline() {
        let conduit = duct(Point3::new(1.0, 2.0, 3.0), Point3::new(1.0, 6.0, 3.0), 0.2);
        let ray = ConduitRay::from_conduit(&conduit).unwrap();

        assert_eq!(ray.conduit, ElementId::new(7));
        assert_eq!(ray.origin, Point3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(ray.direction.into_inner(), Vector3::y());
        assert_relative_eq!(ray.max_distance, 4.0);
        assert_relative_eq!(ray.diameter, 0.2);
        assert_relative_eq!(ray.point_at(1.5), Point3::new(1.0, 3.5, 3.0));
    }

    #[test]
    fn curved_centerline_is_rejected() {
        let conduit = Conduit {
            id: ElementId::new(9),
            kind: ConduitKind::Pipe,
            centerline: Curve::Arc(Arc {
                center: Point3::origin(),
                radius: 1.0,
                normal: Vector3::z_axis(),
                x_axis: Vector3::x_axis(),
                start_angle: 0.0,
                end_angle: 1.0,
            }),
            diameter: 0.05,
        };
        assert!(matches!(
            ConduitRay::from_conduit(&conduit),
            Err(Error::NonLinearCenterline(id)) if id == ElementId::new(9)
        ));
    }

    #[test]
    fn degenerate_conduits_are_rejected() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(matches!(
            ConduitRay::from_conduit(&duct(p, p, 0.2)),
            Err(Error::DegenerateCenterline(_))
        ));
        assert!(matches!(
            ConduitRay::from_conduit(&duct(p, Point3::new(2.0, 1.0, 1.0), 0.0)),
            Err(Error::InvalidDiameter { .. })
        ));
        assert!(matches!(
            ConduitRay::from_conduit(&duct(p, Point3::new(2.0, 1.0, 1.0), f64::NAN)),
            Err(Error::InvalidDiameter { .. })
        ));
    }

    #[test]
    fn kinds_are_ordered_ducts_first() {
        assert_eq!(ConduitKind::ALL, [ConduitKind::Duct, ConduitKind::Pipe]);
        assert_eq!(ConduitKind::Pipe.to_string(), "pipe");
    }
}
