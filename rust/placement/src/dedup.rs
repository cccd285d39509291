// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Crossing deduplication.
//!
//! A ray through a wall crosses its two faces, and walls with more faces in
//! the way give more hits. All hits sharing a [`SurfaceRef`] collapse into a
//! single crossing; the first one in input order is kept.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::query::{IntersectionCandidate, SurfaceRef};

/// A wall crossed by a conduit ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub surface: SurfaceRef,
    pub proximity: f64,
}

impl From<IntersectionCandidate> for Crossing {
    fn from(candidate: IntersectionCandidate) -> Self {
        Self {
            surface: candidate.surface,
            proximity: candidate.proximity,
        }
    }
}

/// One crossing per distinct surface identity, in first-seen order.
pub fn dedupe<I>(candidates: I) -> SmallVec<[Crossing; 2]>
where
    I: IntoIterator<Item = IntersectionCandidate>,
{
    let mut seen = FxHashSet::default();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.surface))
        .map(Crossing::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleeve_model::ElementId;

    fn candidate(proximity: f64, element: i64, linked: i64) -> IntersectionCandidate {
        IntersectionCandidate {
            proximity,
            surface: SurfaceRef::new(ElementId::new(element), ElementId::new(linked)),
        }
    }

    #[test]
    fn two_faces_of_one_wall_collapse() {
        let crossings = dedupe([candidate(3.9, 42, -1), candidate(4.1, 42, -1)]);
        assert_eq!(crossings.len(), 1);
        assert_eq!(crossings[0].proximity, 3.9);
    }

    #[test]
    fn many_hits_of_one_wall_collapse() {
        let crossings = dedupe([
            candidate(4.1, 42, -1),
            candidate(3.9, 42, -1),
            candidate(4.0, 42, -1),
            candidate(4.05, 42, -1),
        ]);
        assert_eq!(crossings.len(), 1);
        assert_eq!(crossings[0].proximity, 4.1);
    }

    #[test]
    fn same_element_in_other_document_is_distinct() {
        let crossings = dedupe([candidate(2.0, 42, -1), candidate(5.0, 42, 17)]);
        assert_eq!(crossings.len(), 2);
        assert_ne!(crossings[0].surface, crossings[1].surface);
    }

    #[test]
    fn key_ignores_proximity_and_order() {
        let forward = dedupe([
            candidate(1.0, 1, -1),
            candidate(2.0, 2, -1),
            candidate(1.2, 1, -1),
            candidate(2.2, 2, -1),
        ]);
        let backward = dedupe([
            candidate(2.2, 2, -1),
            candidate(1.2, 1, -1),
            candidate(2.0, 2, -1),
            candidate(1.0, 1, -1),
        ]);

        let mut a: Vec<_> = forward.iter().map(|c| c.surface).collect();
        let mut b: Vec<_> = backward.iter().map(|c| c.surface).collect();
        a.sort_by_key(|s| (s.element, s.linked_element));
        b.sort_by_key(|s| (s.element, s.linked_element));
        assert_eq!(a, b);

        let again = dedupe(forward.iter().map(|c| IntersectionCandidate {
            proximity: c.proximity,
            surface: c.surface,
        }));
        assert_eq!(again, forward);
    }

    #[test]
    fn nothing_in_nothing_out() {
        assert!(dedupe(std::iter::empty()).is_empty());
    }
}
