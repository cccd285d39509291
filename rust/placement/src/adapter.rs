// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bindings of the placement traits to the in-memory model.

use nalgebra::{Point3, Unit, Vector3};
use sleeve_model::{
    Document, ElementClass, ElementId, ParamValue, ReferenceIntersector, StructuralType,
    Transaction,
};

use crate::batch::ConduitCollector;
use crate::conduit::{Conduit, ConduitKind};
use crate::error::{Error, Result};
use crate::host::InstanceFactory;
use crate::query::{DirectionalSearchIndex, IntersectionCandidate, SurfaceRef};
use crate::resolve::{WallHost, WallResolver};

impl DirectionalSearchIndex for ReferenceIntersector {
    fn find(
        &self,
        origin: &Point3<f64>,
        direction: &Unit<Vector3<f64>>,
    ) -> Result<Vec<IntersectionCandidate>> {
        Ok(ReferenceIntersector::find(self, origin, direction.as_ref())?
            .into_iter()
            .map(|hit| IntersectionCandidate {
                proximity: hit.proximity,
                surface: SurfaceRef::new(hit.reference.element, hit.reference.linked_element),
            })
            .collect())
    }
}

/// Ducts and pipes of a document.
#[derive(Debug, Clone, Copy)]
pub struct DocumentConduits<'d> {
    doc: &'d Document,
}

impl<'d> DocumentConduits<'d> {
    pub fn new(doc: &'d Document) -> Self {
        Self { doc }
    }
}

impl ConduitCollector for DocumentConduits<'_> {
    fn collect_conduits(&self, kind: ConduitKind) -> Result<Vec<Conduit>> {
        let class = match kind {
            ConduitKind::Duct => ElementClass::Duct,
            ConduitKind::Pipe => ElementClass::Pipe,
        };
        Ok(self
            .doc
            .collect(class)
            .filter_map(|element| {
                element.as_mep_curve().map(|curve| Conduit {
                    id: element.id,
                    kind,
                    centerline: curve.centerline.clone(),
                    diameter: curve.diameter,
                })
            })
            .collect())
    }
}

/// Resolves crossed walls in the document openings are placed in.
#[derive(Debug, Clone, Copy)]
pub struct DocumentWalls<'d> {
    doc: &'d Document,
}

impl<'d> DocumentWalls<'d> {
    pub fn new(doc: &'d Document) -> Self {
        Self { doc }
    }
}

impl WallResolver for DocumentWalls<'_> {
    fn host_of(&self, surface: SurfaceRef) -> Result<WallHost> {
        if surface.is_linked() {
            return Err(Error::LinkedHost(surface));
        }
        let wall = self
            .doc
            .wall(surface.element)
            .map_err(|_| Error::UnresolvedWall(surface))?;
        self.doc
            .level(wall.level)
            .map_err(|_| Error::UnresolvedLevel(surface.element))?;
        Ok(WallHost {
            wall: surface.element,
            level: wall.level,
        })
    }
}

impl InstanceFactory for Transaction<'_> {
    fn create_instance(
        &mut self,
        location: Point3<f64>,
        symbol: ElementId,
        host: ElementId,
        level: ElementId,
        structural_type: StructuralType,
    ) -> Result<ElementId> {
        Ok(self.create_family_instance(location, symbol, host, level, structural_type)?)
    }

    fn set_length(&mut self, instance: ElementId, name: &str, value: f64) -> Result<()> {
        Ok(self.set_parameter(instance, name, ParamValue::Double(value))?)
    }
}
