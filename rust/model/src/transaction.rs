// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Edit transactions.
//!
//! A [`Transaction`] borrows its document mutably for its whole lifetime, so
//! all edits made through it are serialized. Dropping a transaction that was
//! not committed restores the element table captured at start.

use std::collections::BTreeMap;

use nalgebra::Point3;

use crate::document::Document;
use crate::element::{Element, ElementClass, ElementKind, FamilyInstance, StructuralType};
use crate::error::{Error, Result};
use crate::keys::ElementId;
use crate::parameters::{self, ParamValue};

struct Snapshot {
    elements: BTreeMap<ElementId, Element>,
    next_id: i64,
}

/// Scoped edit of one document.
pub struct Transaction<'d> {
    doc: &'d mut Document,
    name: String,
    snapshot: Option<Snapshot>,
    created: usize,
}

impl<'d> Transaction<'d> {
    pub(crate) fn start(doc: &'d mut Document, name: String) -> Self {
        tracing::debug!(document = %doc.title(), transaction = %name, "Transaction started");
        let snapshot = Snapshot {
            elements: doc.elements.clone(),
            next_id: doc.next_id,
        };
        Self {
            doc,
            name,
            snapshot: Some(snapshot),
            created: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read access to the document being edited.
    pub fn document(&self) -> &Document {
        &*self.doc
    }

    /// Number of elements created so far.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Activates a family symbol. Returns `false` if it was already active.
    pub fn activate_symbol(&mut self, symbol: ElementId) -> Result<bool> {
        let element = self.doc.get_mut(symbol).ok_or(Error::NotFound(symbol))?;
        let found = element.class();
        let symbol_data = element.as_family_symbol_mut().ok_or(Error::WrongClass {
            id: symbol,
            expected: ElementClass::FamilySymbol,
            found,
        })?;

        if symbol_data.is_active {
            return Ok(false);
        }
        symbol_data.is_active = true;
        tracing::debug!(symbol = %symbol, "Family symbol activated");
        Ok(true)
    }

    /// Places a hosted instance of an active family symbol.
    ///
    /// The new instance gets a copy of the symbol's instance parameters.
    pub fn create_family_instance(
        &mut self,
        location: Point3<f64>,
        symbol: ElementId,
        host: ElementId,
        level: ElementId,
        structural_type: StructuralType,
    ) -> Result<ElementId> {
        let symbol_element = self.doc.element(symbol)?;
        let symbol_data = symbol_element.as_family_symbol().ok_or(Error::WrongClass {
            id: symbol,
            expected: ElementClass::FamilySymbol,
            found: symbol_element.class(),
        })?;
        if !symbol_data.is_active {
            return Err(Error::InactiveSymbol(symbol));
        }
        let name = symbol_element.name.clone();
        let parameters = symbol_data.parameters.clone();

        self.doc.wall(host)?;
        self.doc.level(level)?;

        let id = self.doc.insert(
            name,
            ElementKind::FamilyInstance(FamilyInstance {
                symbol,
                location,
                host,
                level,
                structural_type,
                parameters,
            }),
        );
        self.created += 1;
        Ok(id)
    }

    /// Sets an instance parameter by display name.
    pub fn set_parameter(&mut self, instance: ElementId, name: &str, value: ParamValue) -> Result<()> {
        let element = self.doc.get_mut(instance).ok_or(Error::NotFound(instance))?;
        let found = element.class();
        let instance_data = element.as_family_instance_mut().ok_or(Error::WrongClass {
            id: instance,
            expected: ElementClass::FamilyInstance,
            found,
        })?;
        parameters::set_parameter(&mut instance_data.parameters, name, value)
    }

    /// Keeps all changes.
    pub fn commit(mut self) {
        self.snapshot = None;
        tracing::debug!(
            document = %self.doc.title(),
            transaction = %self.name,
            created = self.created,
            "Transaction committed"
        );
    }

    /// Discards all changes.
    pub fn rollback(self) {
        drop(self);
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.doc.elements = snapshot.elements;
            self.doc.next_id = snapshot.next_id;
            tracing::warn!(
                document = %self.doc.title(),
                transaction = %self.name,
                discarded = self.created,
                "Transaction rolled back"
            );
        }
    }
}
