// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element types stored in a document.

use nalgebra::{Isometry3, Point3};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use sleeve_geometry::{Curve, Line, WallSolid};

use crate::keys::ElementId;
use crate::parameters::Parameters;

/// Discriminant for element kinds, used as a collector filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementClass {
    Level,
    Wall,
    Duct,
    Pipe,
    View3D,
    FamilySymbol,
    FamilyInstance,
    LinkInstance,
}

impl ElementClass {
    /// Returns the class name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementClass::Level => "Level",
            ElementClass::Wall => "Wall",
            ElementClass::Duct => "Duct",
            ElementClass::Pipe => "Pipe",
            ElementClass::View3D => "View3D",
            ElementClass::FamilySymbol => "FamilySymbol",
            ElementClass::FamilyInstance => "FamilyInstance",
            ElementClass::LinkInstance => "LinkInstance",
        }
    }
}

impl std::fmt::Display for ElementClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in category of a loadable family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    GenericModel,
    Doors,
    Windows,
    MechanicalEquipment,
}

/// Structural role of a placed family instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralType {
    #[default]
    NonStructural,
    Beam,
    Column,
    Footing,
}

/// Horizontal datum that hosts walls and instances.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub elevation: f64,
}

/// Straight wall.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    /// Location line; only its plan projection is used.
    pub baseline: Line,
    pub thickness: f64,
    pub height: f64,
    /// Offset of the wall bottom above its level.
    pub base_offset: f64,
    pub level: ElementId,
}

impl Wall {
    /// Solid of the wall standing on a level at `level_elevation`.
    pub fn solid(&self, level_elevation: f64) -> sleeve_geometry::Result<WallSolid> {
        WallSolid::from_baseline(
            &self.baseline,
            self.thickness,
            level_elevation + self.base_offset,
            self.height,
        )
    }
}

/// Round duct or pipe segment.
#[derive(Debug, Clone, PartialEq)]
pub struct MepCurve {
    pub centerline: Curve,
    pub diameter: f64,
    pub system: Option<String>,
}

/// 3D view; ray searches only see what the view shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View3D {
    pub is_template: bool,
    pub hidden: FxHashSet<ElementId>,
}

impl View3D {
    pub fn is_visible(&self, id: ElementId) -> bool {
        !self.hidden.contains(&id)
    }
}

/// Loadable family type.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilySymbol {
    pub family_name: String,
    pub category: Category,
    pub is_active: bool,
    /// Instance parameters with their default values, keyed by display name.
    pub parameters: Parameters,
}

/// Placed instance of a family symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyInstance {
    pub symbol: ElementId,
    pub location: Point3<f64>,
    pub host: ElementId,
    pub level: ElementId,
    pub structural_type: StructuralType,
    pub parameters: Parameters,
}

/// Placement of another document inside this one.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkInstance {
    /// Title of the linked document.
    pub linked_title: String,
    pub transform: Isometry3<f64>,
}

/// Element payload by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Level(Level),
    Wall(Wall),
    Duct(MepCurve),
    Pipe(MepCurve),
    View3D(View3D),
    FamilySymbol(FamilySymbol),
    FamilyInstance(FamilyInstance),
    LinkInstance(LinkInstance),
}

impl ElementKind {
    pub fn class(&self) -> ElementClass {
        match self {
            ElementKind::Level(_) => ElementClass::Level,
            ElementKind::Wall(_) => ElementClass::Wall,
            ElementKind::Duct(_) => ElementClass::Duct,
            ElementKind::Pipe(_) => ElementClass::Pipe,
            ElementKind::View3D(_) => ElementClass::View3D,
            ElementKind::FamilySymbol(_) => ElementClass::FamilySymbol,
            ElementKind::FamilyInstance(_) => ElementClass::FamilyInstance,
            ElementKind::LinkInstance(_) => ElementClass::LinkInstance,
        }
    }
}

/// An element of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub name: String,
    pub kind: ElementKind,
}

impl Element {
    pub fn class(&self) -> ElementClass {
        self.kind.class()
    }

    pub fn as_level(&self) -> Option<&Level> {
        match &self.kind {
            ElementKind::Level(level) => Some(level),
            _ => None,
        }
    }

    pub fn as_wall(&self) -> Option<&Wall> {
        match &self.kind {
            ElementKind::Wall(wall) => Some(wall),
            _ => None,
        }
    }

    /// Duct or pipe payload.
    pub fn as_mep_curve(&self) -> Option<&MepCurve> {
        match &self.kind {
            ElementKind::Duct(curve) | ElementKind::Pipe(curve) => Some(curve),
            _ => None,
        }
    }

    pub fn as_view3d(&self) -> Option<&View3D> {
        match &self.kind {
            ElementKind::View3D(view) => Some(view),
            _ => None,
        }
    }

    pub fn as_family_symbol(&self) -> Option<&FamilySymbol> {
        match &self.kind {
            ElementKind::FamilySymbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub(crate) fn as_family_symbol_mut(&mut self) -> Option<&mut FamilySymbol> {
        match &mut self.kind {
            ElementKind::FamilySymbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn as_family_instance(&self) -> Option<&FamilyInstance> {
        match &self.kind {
            ElementKind::FamilyInstance(instance) => Some(instance),
            _ => None,
        }
    }

    pub(crate) fn as_family_instance_mut(&mut self) -> Option<&mut FamilyInstance> {
        match &mut self.kind {
            ElementKind::FamilyInstance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_link_instance(&self) -> Option<&LinkInstance> {
        match &self.kind {
            ElementKind::LinkInstance(link) => Some(link),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_class_names() {
        assert_eq!(ElementClass::Wall.as_str(), "Wall");
        assert_eq!(ElementClass::View3D.to_string(), "View3D");
        assert_eq!(ElementClass::LinkInstance.to_string(), "LinkInstance");
    }

    #[test]
    fn duct_and_pipe_share_payload() {
        let curve = MepCurve {
            centerline: Curve::Line(Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0))),
            diameter: 0.2,
            system: None,
        };
        let duct = Element {
            id: ElementId::new(1),
            name: "Duct".into(),
            kind: ElementKind::Duct(curve.clone()),
        };
        let pipe = Element {
            id: ElementId::new(2),
            name: "Pipe".into(),
            kind: ElementKind::Pipe(curve),
        };
        assert_eq!(duct.class(), ElementClass::Duct);
        assert_eq!(pipe.class(), ElementClass::Pipe);
        assert_eq!(duct.as_mep_curve(), pipe.as_mep_curve());
        assert!(duct.as_wall().is_none());
    }

    #[test]
    fn view_visibility() {
        let mut view = View3D::default();
        view.hidden.insert(ElementId::new(7));
        assert!(!view.is_visible(ElementId::new(7)));
        assert!(view.is_visible(ElementId::new(8)));
    }
}
