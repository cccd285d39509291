// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable summary of a command run.

use serde::{Deserialize, Serialize};
use sleeve_model::ElementId;

use crate::batch::BatchStats;
use crate::command::{CommandOutcome, CommandResult};
use crate::conduit::ConduitKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementReport {
    pub result: CommandResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub stats: BatchStats,
    pub openings: Vec<OpeningRecord>,
}

/// One planned opening. `instance` is set once the opening exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<ElementId>,
    pub conduit: ElementId,
    pub conduit_kind: ConduitKind,
    pub location: [f64; 3],
    pub host_wall: ElementId,
    pub host_level: ElementId,
    pub width: f64,
    pub height: f64,
}

impl CommandOutcome {
    pub fn report(&self) -> PlacementReport {
        let (stats, openings) = match &self.plan {
            Some(plan) => (
                plan.stats,
                plan.instructions
                    .iter()
                    .enumerate()
                    .map(|(i, instruction)| OpeningRecord {
                        instance: self.created.get(i).copied(),
                        conduit: instruction.conduit,
                        conduit_kind: instruction.conduit_kind,
                        location: [
                            instruction.location.x,
                            instruction.location.y,
                            instruction.location.z,
                        ],
                        host_wall: instruction.host_wall,
                        host_level: instruction.host_level,
                        width: instruction.width,
                        height: instruction.height,
                    })
                    .collect(),
            ),
            None => (BatchStats::default(), Vec::new()),
        };

        PlacementReport {
            result: self.result,
            message: self.error.as_ref().map(|e| e.to_string()),
            stats,
            openings,
        }
    }
}
