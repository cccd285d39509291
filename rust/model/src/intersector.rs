// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reference intersector.
//!
//! Casts a ray from a point in a direction and reports every element face
//! it crosses, as seen in one 3D view of a document. Elements of linked
//! documents are only searched once
//! [`find_references_in_links`](ReferenceIntersector::find_references_in_links)
//! is turned on; they are positioned by their link instance.
//!
//! A ray through a wall crosses two faces, so one wall normally yields two
//! references; callers that want one result per wall group them by
//! (element, linked element).

use nalgebra::{Point3, Vector3};
use sleeve_geometry::{Ray, WallFace, WallSolid};

use crate::document::Document;
use crate::element::ElementClass;
use crate::error::{Error, Result};
use crate::keys::{DocumentKey, ElementId};
use crate::session::Session;

/// What a reference returned by the intersector points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReferenceTarget {
    /// The element only.
    #[default]
    Element,
    /// The element and the face that was crossed.
    Face,
}

/// Reference to geometry hit by a ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reference {
    /// Element in the searched document. For geometry reached through a
    /// link this is the link instance.
    pub element: ElementId,
    /// Element inside the linked document, or [`ElementId::INVALID`].
    pub linked_element: ElementId,
    /// Face crossed, for [`ReferenceTarget::Face`] searches.
    pub face: Option<WallFace>,
}

impl Reference {
    pub fn is_linked(&self) -> bool {
        self.linked_element.is_valid()
    }
}

/// A reference plus its distance from the ray origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceWithContext {
    pub proximity: f64,
    pub reference: Reference,
}

#[derive(Debug, Clone)]
struct SearchTarget {
    element: ElementId,
    linked_element: ElementId,
    solid: WallSolid,
}

/// Ray search over the walls visible in a 3D view.
///
/// Solids are built once at construction; [`find`](Self::find) is read-only
/// and can be called from several threads.
#[derive(Debug, Clone)]
pub struct ReferenceIntersector {
    target: ReferenceTarget,
    targets: Vec<SearchTarget>,
    search_links: bool,
}

impl ReferenceIntersector {
    /// Builds a search over `class` elements of `document` shown in `view`.
    ///
    /// Link instances visible in the view contribute the elements of their
    /// linked document if it is open in `session`; links to documents that
    /// are not open are skipped. Linked elements are not searched until
    /// [`find_references_in_links`](Self::find_references_in_links) is set.
    pub fn new(
        session: &Session,
        document: DocumentKey,
        class: ElementClass,
        target: ReferenceTarget,
        view: ElementId,
    ) -> Result<Self> {
        if class != ElementClass::Wall {
            return Err(Error::UnsupportedFilter(class));
        }

        let doc = session.document(document)?;
        let view_element = doc.element(view)?;
        let view_data = view_element.as_view3d().ok_or(Error::WrongClass {
            id: view,
            expected: ElementClass::View3D,
            found: view_element.class(),
        })?;
        if view_data.is_template {
            return Err(Error::TemplateView(view));
        }

        let mut targets = Vec::new();

        for wall in doc.collect(ElementClass::Wall) {
            if !view_data.is_visible(wall.id) {
                continue;
            }
            targets.push(SearchTarget {
                element: wall.id,
                linked_element: ElementId::INVALID,
                solid: doc.wall_solid(wall.id)?,
            });
        }

        for link in doc.collect(ElementClass::LinkInstance) {
            if !view_data.is_visible(link.id) {
                continue;
            }
            let Some(link_data) = link.as_link_instance() else {
                continue;
            };
            let Some(linked) = session
                .find_document_by_exact_title(&link_data.linked_title)
                .and_then(|k| session.get(k))
            else {
                tracing::warn!(
                    link = %link.id,
                    title = %link_data.linked_title,
                    "Linked document is not open, skipping"
                );
                continue;
            };
            Self::collect_linked(&mut targets, link.id, linked, &link_data.transform)?;
        }

        tracing::debug!(
            document = %doc.title(),
            view = %view,
            targets = targets.len(),
            "Reference intersector built"
        );

        Ok(Self {
            target,
            targets,
            search_links: false,
        })
    }

    /// Whether elements of linked documents are searched. Off by default.
    pub fn find_references_in_links(mut self, enabled: bool) -> Self {
        self.search_links = enabled;
        self
    }

    pub fn searches_links(&self) -> bool {
        self.search_links
    }

    fn active_targets(&self) -> impl Iterator<Item = &SearchTarget> {
        self.targets
            .iter()
            .filter(move |t| self.search_links || !t.linked_element.is_valid())
    }

    fn collect_linked(
        targets: &mut Vec<SearchTarget>,
        link: ElementId,
        linked: &Document,
        transform: &nalgebra::Isometry3<f64>,
    ) -> Result<()> {
        for wall in linked.collect(ElementClass::Wall) {
            targets.push(SearchTarget {
                element: link,
                linked_element: wall.id,
                solid: linked.wall_solid(wall.id)?.transformed(transform),
            });
        }
        Ok(())
    }

    /// Number of element solids searched.
    pub fn target_count(&self) -> usize {
        self.active_targets().count()
    }

    /// Every face crossing ahead of `origin` along `direction`, nearest first.
    pub fn find(
        &self,
        origin: &Point3<f64>,
        direction: &Vector3<f64>,
    ) -> Result<Vec<ReferenceWithContext>> {
        let ray = Ray::new(*origin, *direction)?;
        let mut hits = Vec::new();

        for target in self.active_targets() {
            for hit in target.solid.intersect_ray(&ray) {
                hits.push(ReferenceWithContext {
                    proximity: hit.t,
                    reference: Reference {
                        element: target.element,
                        linked_element: target.linked_element,
                        face: match self.target {
                            ReferenceTarget::Element => None,
                            ReferenceTarget::Face => Some(hit.face),
                        },
                    },
                });
            }
        }

        hits.sort_by(|a, b| a.proximity.total_cmp(&b.proximity));
        Ok(hits)
    }
}
