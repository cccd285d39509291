// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Runner configuration loaded from environment variables.

use sleeve_placement::{CommandConfig, PlannerOptions, SizeParameters};

/// Runner configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Part of the title of the document holding ducts and pipes.
    pub collaborator_title: String,
    /// Family name of the opening type.
    pub family_name: String,
    /// Display name of the opening width parameter.
    pub width_param: String,
    /// Display name of the opening height parameter.
    pub height_param: String,
    /// Plan conduits in parallel.
    pub parallel: bool,
    /// Trace walls of linked documents too.
    pub search_links: bool,
    /// Number of worker threads for parallel planning.
    pub worker_threads: usize,
    /// Log as JSON lines instead of pretty output.
    pub json_logs: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = CommandConfig::default();
        Self {
            collaborator_title: std::env::var("SLEEVE_COLLABORATOR_TITLE")
                .unwrap_or(defaults.collaborator_title),
            family_name: std::env::var("SLEEVE_FAMILY_NAME").unwrap_or(defaults.family_name),
            width_param: std::env::var("SLEEVE_WIDTH_PARAM").unwrap_or(defaults.size.width),
            height_param: std::env::var("SLEEVE_HEIGHT_PARAM").unwrap_or(defaults.size.height),
            parallel: std::env::var("SLEEVE_PARALLEL")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(false),
            search_links: std::env::var("SLEEVE_SEARCH_LINKS")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(false),
            worker_threads: std::env::var("SLEEVE_WORKER_THREADS")
                .unwrap_or_else(|_| num_cpus::get().to_string())
                .parse()
                .unwrap_or_else(|_| num_cpus::get()),
            json_logs: std::env::var("SLEEVE_LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    /// Settings for the placement command.
    pub fn command_config(&self) -> CommandConfig {
        CommandConfig {
            collaborator_title: self.collaborator_title.clone(),
            family_name: self.family_name.clone(),
            size: SizeParameters::new(&self.width_param, &self.height_param),
            planner: PlannerOptions {
                parallel: self.parallel,
            },
            search_links: self.search_links,
            ..CommandConfig::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
