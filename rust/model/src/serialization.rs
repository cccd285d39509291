// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON serialization for sessions.
//!
//! A project file lists the open documents with their elements. Points and
//! vectors are plain `[x, y, z]` arrays; element kinds are tagged by a
//! `"type"` field.

use nalgebra::{Isometry3, Point3, Unit, Vector3};
use serde::{Deserialize, Serialize};
use sleeve_geometry::{Arc, Curve, Line};

use crate::document::Document;
use crate::element::*;
use crate::error::{Error, Result};
use crate::keys::ElementId;
use crate::parameters::Parameters;
use crate::session::Session;

/// Serializable representation of a whole session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub documents: Vec<DocumentSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub title: String,
    #[serde(default)]
    pub active: bool,
    pub elements: Vec<ElementSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub id: ElementId,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub kind: KindSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KindSnapshot {
    Level {
        elevation: f64,
    },
    Wall {
        start: [f64; 3],
        end: [f64; 3],
        thickness: f64,
        height: f64,
        #[serde(default)]
        base_offset: f64,
        level: ElementId,
    },
    Duct {
        centerline: CurveSnapshot,
        diameter: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        system: Option<String>,
    },
    Pipe {
        centerline: CurveSnapshot,
        diameter: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        system: Option<String>,
    },
    #[serde(rename = "view3d")]
    View3D {
        #[serde(default)]
        is_template: bool,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        hidden: Vec<ElementId>,
    },
    FamilySymbol {
        family_name: String,
        category: Category,
        #[serde(default)]
        is_active: bool,
        #[serde(default)]
        parameters: Parameters,
    },
    FamilyInstance {
        symbol: ElementId,
        location: [f64; 3],
        host: ElementId,
        level: ElementId,
        #[serde(default)]
        structural_type: StructuralType,
        #[serde(default)]
        parameters: Parameters,
    },
    LinkInstance {
        linked_title: String,
        #[serde(default)]
        translation: [f64; 3],
        /// Rotation about the Z axis, radians.
        #[serde(default)]
        rotation: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurveSnapshot {
    Line {
        start: [f64; 3],
        end: [f64; 3],
    },
    Arc {
        center: [f64; 3],
        radius: f64,
        normal: [f64; 3],
        x_axis: [f64; 3],
        start_angle: f64,
        end_angle: f64,
    },
}

fn point(p: [f64; 3]) -> Point3<f64> {
    Point3::new(p[0], p[1], p[2])
}

fn array(p: &Point3<f64>) -> [f64; 3] {
    [p.x, p.y, p.z]
}

fn unit(v: [f64; 3], what: &str) -> Result<Unit<Vector3<f64>>> {
    Unit::try_new(Vector3::new(v[0], v[1], v[2]), 1e-12)
        .ok_or_else(|| Error::Serialization(format!("{} must not be a zero vector", what)))
}

impl CurveSnapshot {
    fn to_curve(&self) -> Result<Curve> {
        Ok(match self {
            CurveSnapshot::Line { start, end } => Curve::Line(Line::new(point(*start), point(*end))),
            CurveSnapshot::Arc {
                center,
                radius,
                normal,
                x_axis,
                start_angle,
                end_angle,
            } => Curve::Arc(Arc {
                center: point(*center),
                radius: *radius,
                normal: unit(*normal, "arc normal")?,
                x_axis: unit(*x_axis, "arc x axis")?,
                start_angle: *start_angle,
                end_angle: *end_angle,
            }),
        })
    }

    fn from_curve(curve: &Curve) -> Self {
        match curve {
            Curve::Line(line) => CurveSnapshot::Line {
                start: array(&line.start),
                end: array(&line.end),
            },
            Curve::Arc(arc) => CurveSnapshot::Arc {
                center: array(&arc.center),
                radius: arc.radius,
                normal: [arc.normal.x, arc.normal.y, arc.normal.z],
                x_axis: [arc.x_axis.x, arc.x_axis.y, arc.x_axis.z],
                start_angle: arc.start_angle,
                end_angle: arc.end_angle,
            },
        }
    }
}

impl KindSnapshot {
    fn to_kind(&self) -> Result<ElementKind> {
        Ok(match self {
            KindSnapshot::Level { elevation } => ElementKind::Level(Level {
                elevation: *elevation,
            }),
            KindSnapshot::Wall {
                start,
                end,
                thickness,
                height,
                base_offset,
                level,
            } => ElementKind::Wall(Wall {
                baseline: Line::new(point(*start), point(*end)),
                thickness: *thickness,
                height: *height,
                base_offset: *base_offset,
                level: *level,
            }),
            KindSnapshot::Duct {
                centerline,
                diameter,
                system,
            } => ElementKind::Duct(MepCurve {
                centerline: centerline.to_curve()?,
                diameter: *diameter,
                system: system.clone(),
            }),
            KindSnapshot::Pipe {
                centerline,
                diameter,
                system,
            } => ElementKind::Pipe(MepCurve {
                centerline: centerline.to_curve()?,
                diameter: *diameter,
                system: system.clone(),
            }),
            KindSnapshot::View3D {
                is_template,
                hidden,
            } => ElementKind::View3D(View3D {
                is_template: *is_template,
                hidden: hidden.iter().copied().collect(),
            }),
            KindSnapshot::FamilySymbol {
                family_name,
                category,
                is_active,
                parameters,
            } => ElementKind::FamilySymbol(FamilySymbol {
                family_name: family_name.clone(),
                category: *category,
                is_active: *is_active,
                parameters: parameters.clone(),
            }),
            KindSnapshot::FamilyInstance {
                symbol,
                location,
                host,
                level,
                structural_type,
                parameters,
            } => ElementKind::FamilyInstance(FamilyInstance {
                symbol: *symbol,
                location: point(*location),
                host: *host,
                level: *level,
                structural_type: *structural_type,
                parameters: parameters.clone(),
            }),
            KindSnapshot::LinkInstance {
                linked_title,
                translation,
                rotation,
            } => ElementKind::LinkInstance(LinkInstance {
                linked_title: linked_title.clone(),
                transform: Isometry3::new(
                    Vector3::new(translation[0], translation[1], translation[2]),
                    Vector3::z() * *rotation,
                ),
            }),
        })
    }

    fn from_kind(kind: &ElementKind) -> Self {
        match kind {
            ElementKind::Level(level) => KindSnapshot::Level {
                elevation: level.elevation,
            },
            ElementKind::Wall(wall) => KindSnapshot::Wall {
                start: array(&wall.baseline.start),
                end: array(&wall.baseline.end),
                thickness: wall.thickness,
                height: wall.height,
                base_offset: wall.base_offset,
                level: wall.level,
            },
            ElementKind::Duct(curve) => KindSnapshot::Duct {
                centerline: CurveSnapshot::from_curve(&curve.centerline),
                diameter: curve.diameter,
                system: curve.system.clone(),
            },
            ElementKind::Pipe(curve) => KindSnapshot::Pipe {
                centerline: CurveSnapshot::from_curve(&curve.centerline),
                diameter: curve.diameter,
                system: curve.system.clone(),
            },
            ElementKind::View3D(view) => {
                let mut hidden: Vec<ElementId> = view.hidden.iter().copied().collect();
                hidden.sort();
                KindSnapshot::View3D {
                    is_template: view.is_template,
                    hidden,
                }
            }
            ElementKind::FamilySymbol(symbol) => KindSnapshot::FamilySymbol {
                family_name: symbol.family_name.clone(),
                category: symbol.category,
                is_active: symbol.is_active,
                parameters: symbol.parameters.clone(),
            },
            ElementKind::FamilyInstance(instance) => KindSnapshot::FamilyInstance {
                symbol: instance.symbol,
                location: array(&instance.location),
                host: instance.host,
                level: instance.level,
                structural_type: instance.structural_type,
                parameters: instance.parameters.clone(),
            },
            ElementKind::LinkInstance(link) => {
                let t = link.transform.translation.vector;
                KindSnapshot::LinkInstance {
                    linked_title: link.linked_title.clone(),
                    translation: [t.x, t.y, t.z],
                    rotation: link.transform.rotation.euler_angles().2,
                }
            }
        }
    }
}

impl Session {
    /// Rebuilds a session from a snapshot. Without an `active` flag the
    /// first document becomes active.
    pub fn from_snapshot(snapshot: &ProjectSnapshot) -> Result<Self> {
        let mut session = Session::new();
        for doc_snap in &snapshot.documents {
            let mut doc = Document::new(doc_snap.title.clone());
            for element in &doc_snap.elements {
                doc.insert_with_id(element.id, element.name.clone(), element.kind.to_kind()?)?;
            }
            let key = session.open(doc);
            if doc_snap.active {
                session.set_active(key)?;
            }
        }
        Ok(session)
    }

    /// Captures all open documents.
    pub fn to_snapshot(&self) -> ProjectSnapshot {
        let active = self.active();
        ProjectSnapshot {
            documents: self
                .documents()
                .map(|(key, doc)| DocumentSnapshot {
                    title: doc.title().to_string(),
                    active: Some(key) == active,
                    elements: doc
                        .elements()
                        .map(|e| ElementSnapshot {
                            id: e.id,
                            name: e.name.clone(),
                            kind: KindSnapshot::from_kind(&e.kind),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Parses a project file.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: ProjectSnapshot =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        Self::from_snapshot(&snapshot)
    }

    /// Writes a project file.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_snapshot())
            .map_err(|e| Error::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParamValue;

    const PROJECT: &str = r#"{
        "documents": [
            {
                "title": "House_AR",
                "active": true,
                "elements": [
                    { "id": 1, "name": "Level 1", "type": "level", "elevation": 0.0 },
                    { "id": 2, "name": "Wall", "type": "wall",
                      "start": [4.0, -5.0, 0.0], "end": [4.0, 5.0, 0.0],
                      "thickness": 0.2, "height": 3.0, "level": 1 },
                    { "id": 3, "name": "{3D}", "type": "view3d", "hidden": [2] },
                    { "id": 4, "name": "Opening", "type": "family_symbol",
                      "family_name": "Opening", "category": "generic_model",
                      "parameters": { "Width": { "Double": 0.0 } } },
                    { "id": 5, "name": "KR", "type": "link_instance",
                      "linked_title": "House_KR", "translation": [1.0, 2.0, 0.0],
                      "rotation": 1.5707963267948966 }
                ]
            },
            {
                "title": "House_ОВК",
                "elements": [
                    { "id": 10, "name": "Duct", "type": "duct", "diameter": 0.2,
                      "centerline": { "kind": "line", "start": [0.0, 0.0, 1.5], "end": [10.0, 0.0, 1.5] } },
                    { "id": 11, "name": "Bend", "type": "pipe", "diameter": 0.05,
                      "centerline": { "kind": "arc", "center": [0.0, 0.0, 1.0], "radius": 1.0,
                                      "normal": [0.0, 0.0, 1.0], "x_axis": [1.0, 0.0, 0.0],
                                      "start_angle": 0.0, "end_angle": 1.0 } }
                ]
            }
        ]
    }"#;

    #[test]
    fn load_project() {
        let session = Session::from_json(PROJECT).unwrap();
        assert_eq!(session.len(), 2);

        let ar_key = session.active().unwrap();
        let ar = session.get(ar_key).unwrap();
        assert_eq!(ar.title(), "House_AR");
        assert_eq!(ar.count(ElementClass::Wall), 1);

        let view = ar.get(ElementId::new(3)).unwrap().as_view3d().unwrap();
        assert!(!view.is_visible(ElementId::new(2)));

        let symbol = ar.get(ElementId::new(4)).unwrap().as_family_symbol().unwrap();
        assert_eq!(symbol.parameters.get("Width"), Some(&ParamValue::Double(0.0)));
        assert!(!symbol.is_active);

        let link = ar.get(ElementId::new(5)).unwrap().as_link_instance().unwrap();
        let moved = link.transform * Point3::new(1.0, 0.0, 0.0);
        assert!((moved.x - 1.0).abs() < 1e-12);
        assert!((moved.y - 3.0).abs() < 1e-12);

        let ovk = session.get(session.find_document_by_title("ОВК").unwrap()).unwrap();
        let bend = ovk.get(ElementId::new(11)).unwrap().as_mep_curve().unwrap();
        assert!(!bend.centerline.is_linear());
    }

    #[test]
    fn save_and_reload_keeps_elements() {
        let session = Session::from_json(PROJECT).unwrap();
        let json = session.to_json().unwrap();
        let reloaded = Session::from_json(&json).unwrap();

        let before = session.to_snapshot();
        let after = reloaded.to_snapshot();
        assert_eq!(before.documents.len(), after.documents.len());
        for (a, b) in before.documents.iter().zip(&after.documents) {
            assert_eq!(a.title, b.title);
            assert_eq!(a.active, b.active);
            assert_eq!(a.elements.len(), b.elements.len());
        }

        let link = reloaded
            .get(reloaded.active().unwrap())
            .unwrap()
            .get(ElementId::new(5))
            .unwrap()
            .as_link_instance()
            .unwrap();
        assert!((link.transform.rotation.angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn malformed_project_is_an_error() {
        assert!(matches!(
            Session::from_json("{ \"documents\": 3 }"),
            Err(Error::Serialization(_))
        ));

        let zero_normal = PROJECT.replace("\"normal\": [0.0, 0.0, 1.0]", "\"normal\": [0.0, 0.0, 0.0]");
        assert!(matches!(Session::from_json(&zero_normal), Err(Error::Serialization(_))));
    }
}
