// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Width and height parameters of the opening family.

use serde::{Deserialize, Serialize};
use sleeve_model::{ElementId, FamilySymbol, ParamValue};

use crate::error::{Error, Result};
use crate::host::InstanceFactory;
use crate::resolve::PlacementInstruction;

/// Display names of the opening size parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeParameters {
    pub width: String,
    pub height: String,
}

impl Default for SizeParameters {
    fn default() -> Self {
        Self {
            width: "Width".to_string(),
            height: "Height".to_string(),
        }
    }
}

impl SizeParameters {
    pub fn new(width: impl Into<String>, height: impl Into<String>) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
        }
    }

    /// Checks that the family type declares both parameters as lengths.
    pub fn validate(&self, symbol: &FamilySymbol) -> Result<()> {
        for name in [&self.width, &self.height] {
            match symbol.parameters.get(name.as_str()) {
                Some(ParamValue::Double(_)) => {}
                _ => {
                    return Err(Error::MissingParameter {
                        family: symbol.family_name.clone(),
                        name: name.clone(),
                    })
                }
            }
        }
        Ok(())
    }

    /// Sizes a placed opening.
    pub fn apply<F>(&self, factory: &mut F, instance: ElementId, instruction: &PlacementInstruction) -> Result<()>
    where
        F: InstanceFactory + ?Sized,
    {
        factory.set_length(instance, &self.width, instruction.width)?;
        factory.set_length(instance, &self.height, instruction.height)
    }
}
