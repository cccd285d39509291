// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host services used when openings are written back.

use nalgebra::Point3;
use sleeve_model::{ElementId, StructuralType};

use crate::error::Result;

/// Creates opening instances inside an open edit scope.
pub trait InstanceFactory {
    fn create_instance(
        &mut self,
        location: Point3<f64>,
        symbol: ElementId,
        host: ElementId,
        level: ElementId,
        structural_type: StructuralType,
    ) -> Result<ElementId>;

    /// Writes a length parameter by display name.
    fn set_length(&mut self, instance: ElementId, name: &str, value: f64) -> Result<()>;
}

/// User-facing notices.
pub trait Diagnostics {
    fn notify(&self, title: &str, message: &str);
}

/// Diagnostics that only log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn notify(&self, title: &str, message: &str) {
        tracing::warn!(title, "{}", message);
    }
}
