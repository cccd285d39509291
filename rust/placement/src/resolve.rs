// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement resolution.

use nalgebra::Point3;
use sleeve_model::ElementId;

use crate::conduit::{ConduitKind, ConduitRay};
use crate::dedup::Crossing;
use crate::error::Result;
use crate::query::SurfaceRef;

/// Wall that hosts an opening, with the level it is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WallHost {
    pub wall: ElementId,
    pub level: ElementId,
}

/// Maps a crossed surface to its wall in the primary document.
pub trait WallResolver {
    fn host_of(&self, surface: SurfaceRef) -> Result<WallHost>;
}

/// Everything needed to place one opening.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementInstruction {
    pub conduit: ElementId,
    pub conduit_kind: ConduitKind,
    pub location: Point3<f64>,
    pub host_wall: ElementId,
    pub host_level: ElementId,
    pub width: f64,
    pub height: f64,
}

/// Turns a crossing into an opening placed on the centerline, sized to the
/// conduit diameter.
pub fn resolve<R>(ray: &ConduitRay, crossing: &Crossing, resolver: &R) -> Result<PlacementInstruction>
where
    R: WallResolver + ?Sized,
{
    let host = resolver.host_of(crossing.surface)?;
    Ok(PlacementInstruction {
        conduit: ray.conduit,
        conduit_kind: ray.kind,
        location: ray.point_at(crossing.proximity),
        host_wall: host.wall,
        host_level: host.level,
        width: ray.diameter,
        height: ray.diameter,
    })
}
