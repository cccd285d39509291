// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Directional search for wall surfaces.

use nalgebra::{Point3, Unit, Vector3};
use smallvec::SmallVec;
use sleeve_model::ElementId;

use crate::conduit::ConduitRay;
use crate::error::Result;

/// Identity of a crossed wall.
///
/// `linked_element` is [`ElementId::INVALID`] for walls of the searched
/// document. For walls reached through a link, `element` is the link
/// instance and `linked_element` the wall inside the linked document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceRef {
    pub element: ElementId,
    pub linked_element: ElementId,
}

impl SurfaceRef {
    pub fn new(element: ElementId, linked_element: ElementId) -> Self {
        Self {
            element,
            linked_element,
        }
    }

    /// Reference to an element of the searched document itself.
    pub fn local(element: ElementId) -> Self {
        Self::new(element, ElementId::INVALID)
    }

    pub fn is_linked(&self) -> bool {
        self.linked_element.is_valid()
    }
}

impl std::fmt::Display for SurfaceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_linked() {
            write!(f, "{}/{}", self.element, self.linked_element)
        } else {
            write!(f, "{}", self.element)
        }
    }
}

/// One surface crossing reported by a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionCandidate {
    /// Distance from the ray origin.
    pub proximity: f64,
    pub surface: SurfaceRef,
}

/// Candidates of one ray; walls usually give two.
pub type Candidates = SmallVec<[IntersectionCandidate; 4]>;

/// Scene search restricted to wall surfaces.
///
/// `find` reports every crossing ahead of `origin` with no distance limit,
/// in any order.
pub trait DirectionalSearchIndex {
    fn find(
        &self,
        origin: &Point3<f64>,
        direction: &Unit<Vector3<f64>>,
    ) -> Result<Vec<IntersectionCandidate>>;
}

/// Candidates along `ray` no further than its centerline length.
pub fn find_within<I>(index: &I, ray: &ConduitRay) -> Result<(usize, Candidates)>
where
    I: DirectionalSearchIndex + ?Sized,
{
    let raw = index.find(&ray.origin, &ray.direction)?;
    let total = raw.len();
    let within = raw
        .into_iter()
        .filter(|c| c.proximity <= ray.max_distance)
        .collect();
    Ok((total, within))
}
