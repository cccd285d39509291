// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The "add openings" command.
//!
//! Runs against the active document of a session: every duct and pipe of the
//! collaborator document is traced through the walls visible in the first 3D
//! view, and one opening instance is placed per crossed wall.
//!
//! Stages:
//! 1. Preconditions (collaborator document, opening family type, 3D view).
//!    A failure cancels the command before anything changes.
//! 2. The opening type is activated in its own transaction.
//! 3. Openings are planned without touching the document, and the size
//!    parameters of the type are checked.
//! 4. All openings are created in one transaction. Any error rolls the whole
//!    batch back.
//!
//! A dry run stops after planning: nothing is activated or created.

use serde::{Deserialize, Serialize};
use sleeve_model::{
    Category, Document, DocumentKey, ElementClass, ElementId, ReferenceIntersector,
    ReferenceTarget, Session, StructuralType,
};

use crate::adapter::{DocumentConduits, DocumentWalls};
use crate::batch::{BatchPlan, BatchPlanner, PlannerOptions};
use crate::error::{Error, Result};
use crate::host::{Diagnostics, InstanceFactory};
use crate::params::SizeParameters;
use crate::resolve::PlacementInstruction;

const ACTIVATE_TRANSACTION: &str = "Activate opening type";
const PLACE_TRANSACTION: &str = "Place openings";

/// Command settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandConfig {
    /// Part of the collaborator document title.
    pub collaborator_title: String,
    /// Family name of the opening type.
    pub family_name: String,
    pub category: Category,
    pub size: SizeParameters,
    pub planner: PlannerOptions,
    /// Also trace walls of linked documents. Their crossings are reported
    /// in the plan statistics but get no opening.
    pub search_links: bool,
    /// Plan and validate only; the document is left untouched.
    pub dry_run: bool,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            collaborator_title: "ОВК".to_string(),
            family_name: "Отверстие".to_string(),
            category: Category::GenericModel,
            size: SizeParameters::default(),
            planner: PlannerOptions::default(),
            search_links: false,
            dry_run: false,
        }
    }
}

/// How the command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandResult {
    Succeeded,
    Cancelled,
    Failed,
}

impl CommandResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandResult::Succeeded => "succeeded",
            CommandResult::Cancelled => "cancelled",
            CommandResult::Failed => "failed",
        }
    }
}

impl std::fmt::Display for CommandResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one command run.
#[derive(Debug)]
pub struct CommandOutcome {
    pub result: CommandResult,
    /// The plan, if planning got that far.
    pub plan: Option<BatchPlan>,
    /// Openings created, in plan order. Empty unless the command succeeded
    /// and was not a dry run.
    pub created: Vec<ElementId>,
    pub error: Option<Error>,
}

/// Elements the command works with, found during the precondition checks.
#[derive(Debug, Clone, Copy)]
struct Targets {
    primary: DocumentKey,
    collaborator: DocumentKey,
    symbol: ElementId,
    view: ElementId,
}

/// Places openings where collaborator ducts and pipes cross walls.
#[derive(Debug, Clone, Default)]
pub struct AddOpenings {
    config: CommandConfig,
}

impl AddOpenings {
    pub fn new(config: CommandConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CommandConfig {
        &self.config
    }

    pub fn execute(&self, session: &mut Session, diagnostics: &dyn Diagnostics) -> CommandOutcome {
        tracing::info!(
            collaborator = %self.config.collaborator_title,
            family = %self.config.family_name,
            parallel = self.config.planner.parallel,
            search_links = self.config.search_links,
            dry_run = self.config.dry_run,
            "Placing openings"
        );

        let targets = match self.check_preconditions(session) {
            Ok(targets) => targets,
            Err(err) => return Self::failure(err, None, diagnostics),
        };

        let plan = match self.prepare(session, &targets) {
            Ok(plan) => plan,
            Err(err) => return Self::failure(err, None, diagnostics),
        };

        if self.config.dry_run {
            tracing::info!(openings = plan.len(), "Dry run, openings planned only");
            return CommandOutcome {
                result: CommandResult::Succeeded,
                plan: Some(plan),
                created: Vec::new(),
                error: None,
            };
        }

        match self.apply(session, &targets, &plan) {
            Ok(created) => {
                tracing::info!(openings = created.len(), "Openings placed");
                CommandOutcome {
                    result: CommandResult::Succeeded,
                    plan: Some(plan),
                    created,
                    error: None,
                }
            }
            Err(err) => Self::failure(err, Some(plan), diagnostics),
        }
    }

    fn check_preconditions(&self, session: &Session) -> Result<Targets> {
        let collaborator = session
            .find_document_by_title(&self.config.collaborator_title)
            .ok_or_else(|| Error::MissingCollaboratorDocument(self.config.collaborator_title.clone()))?;
        let primary = session.active().ok_or(Error::NoActiveDocument)?;
        let doc = session.document(primary)?;

        let symbol = doc
            .find_family_symbol(self.config.category, &self.config.family_name)
            .ok_or_else(|| Error::MissingFamilyType(self.config.family_name.clone()))?;
        let view = doc
            .find_3d_view()
            .ok_or_else(|| Error::MissingView(doc.title().to_string()))?;

        Ok(Targets {
            primary,
            collaborator,
            symbol,
            view,
        })
    }

    fn prepare(&self, session: &mut Session, targets: &Targets) -> Result<BatchPlan> {
        let index = ReferenceIntersector::new(
            session,
            targets.primary,
            ElementClass::Wall,
            ReferenceTarget::Element,
            targets.view,
        )?
        .find_references_in_links(self.config.search_links);

        if !self.config.dry_run {
            let doc = session.document_mut(targets.primary)?;
            let mut tx = doc.start_transaction(ACTIVATE_TRANSACTION);
            tx.activate_symbol(targets.symbol)?;
            tx.commit();
        }

        let primary = session.document(targets.primary)?;
        let collaborator = session.document(targets.collaborator)?;
        let walls = DocumentWalls::new(primary);
        let plan = BatchPlanner::new(&index, &walls)
            .with_options(self.config.planner)
            .plan(&DocumentConduits::new(collaborator))?;

        validate_size(primary, targets.symbol, &self.config.size)?;

        Ok(plan)
    }

    fn apply(&self, session: &mut Session, targets: &Targets, plan: &BatchPlan) -> Result<Vec<ElementId>> {
        let doc = session.document_mut(targets.primary)?;
        let mut tx = doc.start_transaction(PLACE_TRANSACTION);
        let created = place_openings(&mut tx, targets.symbol, &plan.instructions, &self.config.size)?;
        tx.commit();
        Ok(created)
    }

    fn failure(err: Error, plan: Option<BatchPlan>, diagnostics: &dyn Diagnostics) -> CommandOutcome {
        let result = if err.is_precondition() {
            CommandResult::Cancelled
        } else {
            CommandResult::Failed
        };
        tracing::error!(error = %err, result = %result, "Openings not placed");
        diagnostics.notify("Openings", &err.to_string());
        CommandOutcome {
            result,
            plan,
            created: Vec::new(),
            error: Some(err),
        }
    }
}

/// Checks that `symbol` is a family type carrying both size parameters.
fn validate_size(doc: &Document, symbol: ElementId, size: &SizeParameters) -> Result<()> {
    let element = doc.element(symbol)?;
    let symbol_data = element
        .as_family_symbol()
        .ok_or(sleeve_model::Error::WrongClass {
            id: symbol,
            expected: ElementClass::FamilySymbol,
            found: element.class(),
        })?;
    size.validate(symbol_data)
}

/// Creates and sizes one opening per instruction, in order.
pub fn place_openings<F>(
    factory: &mut F,
    symbol: ElementId,
    instructions: &[PlacementInstruction],
    size: &SizeParameters,
) -> Result<Vec<ElementId>>
where
    F: InstanceFactory + ?Sized,
{
    let mut created = Vec::with_capacity(instructions.len());
    for instruction in instructions {
        let instance = factory.create_instance(
            instruction.location,
            symbol,
            instruction.host_wall,
            instruction.host_level,
            StructuralType::NonStructural,
        )?;
        size.apply(factory, instance, instruction)?;
        tracing::debug!(
            instance = %instance,
            conduit = %instruction.conduit,
            wall = %instruction.host_wall,
            "Opening placed"
        );
        created.push(instance);
    }
    Ok(created)
}
