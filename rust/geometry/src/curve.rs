// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Centerline curves of linear MEP elements and wall location lines.

use nalgebra::{Point3, Unit, Vector3};

use crate::error::{Error, Result};

/// Curves shorter than this are treated as degenerate.
pub const LENGTH_EPSILON: f64 = 1e-9;

/// Straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Line {
    /// Create a new line segment
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    /// Endpoint by index: 0 is the start, anything else the end.
    pub fn end_point(&self, index: usize) -> Point3<f64> {
        if index == 0 {
            self.start
        } else {
            self.end
        }
    }

    /// Euclidean length of the segment
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unit direction from start to end.
    pub fn direction(&self) -> Result<Unit<Vector3<f64>>> {
        Unit::try_new(self.end - self.start, LENGTH_EPSILON).ok_or_else(|| {
            Error::DegenerateCurve(format!(
                "line from {:?} to {:?} has zero length",
                self.start.coords.as_slice(),
                self.end.coords.as_slice()
            ))
        })
    }

    /// Point at normalized parameter `t` (0 = start, 1 = end).
    pub fn evaluate(&self, t: f64) -> Point3<f64> {
        self.start + (self.end - self.start) * t
    }
}

/// Circular arc in an arbitrary plane.
///
/// Angles are measured from `x_axis` towards `normal × x_axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Point3<f64>,
    pub radius: f64,
    pub normal: Unit<Vector3<f64>>,
    pub x_axis: Unit<Vector3<f64>>,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    /// Arc length
    pub fn length(&self) -> f64 {
        self.radius * (self.end_angle - self.start_angle).abs()
    }

    /// Point on the arc at `angle`.
    pub fn point_at(&self, angle: f64) -> Point3<f64> {
        let y_axis = self.normal.cross(self.x_axis.as_ref());
        self.center
            + self.x_axis.into_inner() * (self.radius * angle.cos())
            + y_axis * (self.radius * angle.sin())
    }

    /// Endpoint by index: 0 is the start, anything else the end.
    pub fn end_point(&self, index: usize) -> Point3<f64> {
        if index == 0 {
            self.point_at(self.start_angle)
        } else {
            self.point_at(self.end_angle)
        }
    }
}

/// Location curve of a linear element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Line(Line),
    Arc(Arc),
}

impl Curve {
    /// The straight segment, if this curve is one.
    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Curve::Line(line) => Some(line),
            Curve::Arc(_) => None,
        }
    }

    /// Whether the curve is a straight segment
    pub fn is_linear(&self) -> bool {
        matches!(self, Curve::Line(_))
    }

    /// Curve length
    pub fn length(&self) -> f64 {
        match self {
            Curve::Line(line) => line.length(),
            Curve::Arc(arc) => arc.length(),
        }
    }

    /// Endpoint by index: 0 is the start, anything else the end.
    pub fn end_point(&self, index: usize) -> Point3<f64> {
        match self {
            Curve::Line(line) => line.end_point(index),
            Curve::Arc(arc) => arc.end_point(index),
        }
    }
}

impl From<Line> for Curve {
    fn from(line: Line) -> Self {
        Curve::Line(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_line_length_and_direction() {
        let line = Line::new(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 6.0, 3.0));
        assert_relative_eq!(line.length(), 5.0);

        let dir = line.direction().unwrap();
        assert_relative_eq!(dir.x, 0.6);
        assert_relative_eq!(dir.y, 0.8);
        assert_relative_eq!(dir.z, 0.0);
    }

    #[test]
    fn test_line_end_points() {
        let line = Line::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0));
        assert_eq!(line.end_point(0), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(line.end_point(1), Point3::new(2.0, 0.0, 0.0));
        assert_eq!(line.evaluate(0.5), Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_zero_length_line_has_no_direction() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let line = Line::new(p, p);
        assert!(matches!(line.direction(), Err(Error::DegenerateCurve(_))));
    }

    #[test]
    fn test_quarter_arc() {
        let arc = Arc {
            center: Point3::origin(),
            radius: 2.0,
            normal: Vector3::z_axis(),
            x_axis: Vector3::x_axis(),
            start_angle: 0.0,
            end_angle: FRAC_PI_2,
        };
        let curve = Curve::Arc(arc);

        assert!(!curve.is_linear());
        assert!(curve.as_line().is_none());
        assert_relative_eq!(curve.length(), std::f64::consts::PI);

        let end = curve.end_point(1);
        assert_relative_eq!(end.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(end.y, 2.0, epsilon = 1e-12);
    }
}
