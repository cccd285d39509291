// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Documents: ordered element tables with id allocation.

use std::collections::BTreeMap;

use sleeve_geometry::WallSolid;

use crate::element::{Category, Element, ElementClass, ElementKind, Level, Wall};
use crate::error::{Error, Result};
use crate::keys::ElementId;
use crate::transaction::Transaction;

/// A building-model document.
///
/// Elements are kept in id order, so collectors return them in creation
/// order. Reads are free; edits after construction go through
/// [`Document::start_transaction`].
#[derive(Debug, Clone)]
pub struct Document {
    title: String,
    pub(crate) elements: BTreeMap<ElementId, Element>,
    pub(crate) next_id: i64,
}

impl Document {
    /// Creates an empty document.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Adds an element with the next free id.
    pub fn insert(&mut self, name: impl Into<String>, kind: ElementKind) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            id,
            Element {
                id,
                name: name.into(),
                kind,
            },
        );
        id
    }

    /// Adds an element under a given id, as when loading a saved model.
    pub fn insert_with_id(
        &mut self,
        id: ElementId,
        name: impl Into<String>,
        kind: ElementKind,
    ) -> Result<()> {
        if !id.is_valid() || self.elements.contains_key(&id) {
            return Err(Error::DuplicateElement(id));
        }
        self.next_id = self.next_id.max(id.value() + 1);
        self.elements.insert(
            id,
            Element {
                id,
                name: name.into(),
                kind,
            },
        );
        Ok(())
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    /// Element by id, or [`Error::NotFound`].
    pub fn element(&self, id: ElementId) -> Result<&Element> {
        self.get(id).ok_or(Error::NotFound(id))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements in id order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// All elements of one class, in id order.
    pub fn collect(&self, class: ElementClass) -> impl Iterator<Item = &Element> {
        self.elements.values().filter(move |e| e.class() == class)
    }

    pub fn count(&self, class: ElementClass) -> usize {
        self.collect(class).count()
    }

    pub fn wall(&self, id: ElementId) -> Result<&Wall> {
        let element = self.element(id)?;
        element.as_wall().ok_or(Error::WrongClass {
            id,
            expected: ElementClass::Wall,
            found: element.class(),
        })
    }

    pub fn level(&self, id: ElementId) -> Result<&Level> {
        let element = self.element(id)?;
        element.as_level().ok_or(Error::WrongClass {
            id,
            expected: ElementClass::Level,
            found: element.class(),
        })
    }

    /// The level a wall stands on, checked to exist.
    pub fn level_of(&self, wall: ElementId) -> Result<ElementId> {
        let level = self.wall(wall)?.level;
        self.level(level)?;
        Ok(level)
    }

    /// Solid of a wall, placed on its level.
    pub fn wall_solid(&self, id: ElementId) -> Result<WallSolid> {
        let wall = self.wall(id)?;
        let level = self.level(wall.level)?;
        Ok(wall.solid(level.elevation)?)
    }

    /// First family symbol of `category` whose family is named `family_name`.
    ///
    /// Matches the family name, not the type name.
    pub fn find_family_symbol(&self, category: Category, family_name: &str) -> Option<ElementId> {
        self.collect(ElementClass::FamilySymbol)
            .find(|e| {
                e.as_family_symbol()
                    .map(|s| s.category == category && s.family_name == family_name)
                    .unwrap_or(false)
            })
            .map(|e| e.id)
    }

    /// First 3D view that is not a view template.
    pub fn find_3d_view(&self) -> Option<ElementId> {
        self.collect(ElementClass::View3D)
            .find(|e| e.as_view3d().map(|v| !v.is_template).unwrap_or(false))
            .map(|e| e.id)
    }

    /// Opens an edit transaction. Changes are discarded unless it is committed.
    pub fn start_transaction(&mut self, name: impl Into<String>) -> Transaction<'_> {
        Transaction::start(self, name.into())
    }
}
