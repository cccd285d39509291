// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model operations.

use crate::element::ElementClass;
use crate::keys::ElementId;

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or editing a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced element does not exist in the document.
    #[error("element {0} not found")]
    NotFound(ElementId),

    /// An element exists but is of another class than required.
    #[error("element {id} is a {found}, expected a {expected}")]
    WrongClass {
        id: ElementId,
        expected: ElementClass,
        found: ElementClass,
    },

    /// Two elements share the same id.
    #[error("duplicate element id {0}")]
    DuplicateElement(ElementId),

    /// A document key does not belong to the session.
    #[error("document not found in session")]
    DocumentNotFound,

    /// Ray searches need a view that is not a template.
    #[error("view {0} is a view template")]
    TemplateView(ElementId),

    /// The element class has no geometry the intersector can search.
    #[error("no searchable geometry for element class {0}")]
    UnsupportedFilter(ElementClass),

    /// Family symbols must be activated before instances are placed.
    #[error("family symbol {0} is not active")]
    InactiveSymbol(ElementId),

    /// No parameter with this display name on the element.
    #[error("parameter '{0}' not found")]
    ParameterNotFound(String),

    /// A parameter was set with a value of another storage type.
    #[error("parameter '{name}' stores {expected}, got {found}")]
    ParameterType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Element geometry could not be built.
    #[error("geometry error: {0}")]
    Geometry(#[from] sleeve_geometry::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
