// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Sleeve Model
//!
//! In-memory host for building-model documents.
//!
//! A [`Session`] owns the open [`Document`]s. Each document is an ordered
//! table of [`Element`]s (levels, walls, ducts, pipes, 3D views, family
//! symbols and instances, link instances) addressed by [`ElementId`].
//! Documents are read freely; changes go through a [`Transaction`], which
//! rolls back unless committed.
//!
//! The [`ReferenceIntersector`] casts rays against the walls visible in a 3D
//! view, including walls of linked documents, and reports every face crossed.

pub mod document;
pub mod element;
pub mod error;
pub mod intersector;
pub mod keys;
pub mod parameters;
pub mod serialization;
pub mod session;
pub mod transaction;

pub use document::Document;
pub use element::{
    Category, Element, ElementClass, ElementKind, FamilyInstance, FamilySymbol, Level,
    LinkInstance, MepCurve, StructuralType, View3D, Wall,
};
pub use error::{Error, Result};
pub use intersector::{Reference, ReferenceIntersector, ReferenceTarget, ReferenceWithContext};
pub use keys::{DocumentKey, ElementId};
pub use parameters::{ParamValue, Parameters};
pub use serialization::ProjectSnapshot;
pub use session::Session;
pub use transaction::Transaction;
