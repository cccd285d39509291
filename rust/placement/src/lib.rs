// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Sleeve Placement
//!
//! Finds where duct and pipe centerlines of one document pierce the walls of
//! another, and places an opening at each crossing.
//!
//! ## Pipeline
//!
//! For every conduit (ducts first, then pipes):
//!
//! 1. [`ConduitRay::from_conduit`] turns the straight centerline into a ray
//!    limited to the centerline length.
//! 2. [`find_within`] asks a [`DirectionalSearchIndex`] for wall crossings
//!    and keeps those within range.
//! 3. [`dedupe`] keeps one crossing per wall identity ([`SurfaceRef`]).
//!    Crossings of walls in linked documents are counted and skipped.
//! 4. [`resolve`] maps each crossing to a [`PlacementInstruction`] through a
//!    [`WallResolver`].
//!
//! [`BatchPlanner`] runs the pipeline for a whole document and returns a
//! [`BatchPlan`]. [`AddOpenings`] wraps planning and placement against a
//! [`sleeve_model::Session`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use sleeve_model::Session;
//! use sleeve_placement::{AddOpenings, CommandConfig, LogDiagnostics};
//!
//! let mut session = Session::from_json(&std::fs::read_to_string("project.json")?)?;
//! let outcome = AddOpenings::new(CommandConfig::default()).execute(&mut session, &LogDiagnostics);
//! println!("{} openings", outcome.created.len());
//! ```

pub mod adapter;
pub mod batch;
pub mod command;
pub mod conduit;
pub mod dedup;
pub mod error;
pub mod host;
pub mod params;
pub mod query;
pub mod report;
pub mod resolve;

pub use adapter::{DocumentConduits, DocumentWalls};
pub use batch::{BatchPlan, BatchPlanner, BatchStats, ConduitCollector, PlannerOptions};
pub use command::{place_openings, AddOpenings, CommandConfig, CommandOutcome, CommandResult};
pub use conduit::{Conduit, ConduitKind, ConduitRay};
pub use dedup::{dedupe, Crossing};
pub use error::{Error, Result};
pub use host::{Diagnostics, InstanceFactory, LogDiagnostics};
pub use params::SizeParameters;
pub use query::{find_within, Candidates, DirectionalSearchIndex, IntersectionCandidate, SurfaceRef};
pub use report::{OpeningRecord, PlacementReport};
pub use resolve::{resolve, PlacementInstruction, WallHost, WallResolver};
