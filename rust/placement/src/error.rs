// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for opening placement.

use sleeve_model::ElementId;

use crate::query::SurfaceRef;

/// Result type alias for placement operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while planning or placing openings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No open document matches the collaborator title.
    #[error("no open document title contains '{0}'")]
    MissingCollaboratorDocument(String),

    /// The opening family type is not loaded in the primary document.
    #[error("family type '{0}' not found")]
    MissingFamilyType(String),

    /// The primary document has no 3D view to search in.
    #[error("no non-template 3D view in '{0}'")]
    MissingView(String),

    /// There is no active document to place openings into.
    #[error("no active document")]
    NoActiveDocument,

    /// The opening family type lacks a size parameter.
    #[error("family type '{family}' has no numeric parameter '{name}'")]
    MissingParameter { family: String, name: String },

    /// Only straight centerlines can be traced.
    #[error("conduit {0} has a curved centerline")]
    NonLinearCenterline(ElementId),

    /// Centerline endpoints coincide.
    #[error("conduit {0} has a zero-length centerline")]
    DegenerateCenterline(ElementId),

    #[error("conduit {conduit} has invalid diameter {diameter}")]
    InvalidDiameter { conduit: ElementId, diameter: f64 },

    /// The crossed surface does not belong to a wall of the primary document.
    #[error("no wall for reference {0}")]
    UnresolvedWall(SurfaceRef),

    /// The wall has no valid level.
    #[error("wall {0} has no level")]
    UnresolvedLevel(ElementId),

    /// The crossed wall lives in a linked document and cannot host an opening.
    #[error("reference {0} is a wall of a linked document")]
    LinkedHost(SurfaceRef),

    /// Host model error.
    #[error("model error: {0}")]
    Model(#[from] sleeve_model::Error),
}

impl Error {
    /// Whether the error is a precondition failure that cancels the command
    /// before anything is changed.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::MissingCollaboratorDocument(_)
                | Error::MissingFamilyType(_)
                | Error::MissingView(_)
        )
    }
}
