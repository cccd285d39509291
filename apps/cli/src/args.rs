// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command-line arguments.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("missing project file")]
    MissingProject,
    #[error("option {0} needs a value")]
    MissingValue(String),
    #[error("unknown option: {0}")]
    UnknownOption(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Run(Args),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub project: PathBuf,
    /// Where to write the updated project. Defaults to the input file.
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    pub parallel: bool,
    pub dry_run: bool,
}

const USAGE: &str = "\
Place wall openings where ducts and pipes cross walls

Usage: sleeve <project.json> [options]

Options:
  -o, --output <path>  Write the updated project here (default: overwrite input)
  --report <path>      Write a JSON placement report
  --parallel           Plan conduits on all worker threads
  --dry-run            Plan only; no opening is created and nothing is written
  -h, --help           Show this message

Environment:
  SLEEVE_COLLABORATOR_TITLE  Part of the MEP document title (default: ОВК)
  SLEEVE_FAMILY_NAME         Opening family name (default: Отверстие)
  SLEEVE_WIDTH_PARAM         Width parameter name (default: Width)
  SLEEVE_HEIGHT_PARAM        Height parameter name (default: Height)
  SLEEVE_PARALLEL            Plan in parallel (default: false)
  SLEEVE_SEARCH_LINKS        Trace walls of linked documents (default: false)
  SLEEVE_WORKER_THREADS      Worker threads (default: CPU count)
  SLEEVE_LOG_FORMAT          Log format, pretty or json (default: pretty)
  RUST_LOG                   Log filter (default: info)";

pub fn print_usage() {
    eprintln!("{}", USAGE);
}

/// Parses arguments, program name excluded.
pub fn parse<I>(args: I) -> Result<Command, ArgsError>
where
    I: IntoIterator<Item = String>,
{
    let mut project = None;
    let mut output = None;
    let mut report = None;
    let mut parallel = false;
    let mut dry_run = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--output" | "-o" => {
                output = Some(PathBuf::from(args.next().ok_or_else(|| ArgsError::MissingValue(arg.clone()))?));
            }
            "--report" => {
                report = Some(PathBuf::from(args.next().ok_or_else(|| ArgsError::MissingValue(arg.clone()))?));
            }
            "--parallel" => parallel = true,
            "--dry-run" => dry_run = true,
            other if other.starts_with('-') => {
                return Err(ArgsError::UnknownOption(other.to_string()))
            }
            _ if project.is_none() => project = Some(PathBuf::from(&arg)),
            other => return Err(ArgsError::UnknownOption(other.to_string())),
        }
    }

    let project = project.ok_or(ArgsError::MissingProject)?;
    Ok(Command::Run(Args {
        output: output.unwrap_or_else(|| project.clone()),
        project,
        report,
        parallel,
        dry_run,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Command, ArgsError> {
        parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn project_only() {
        let Command::Run(run) = args(&["house.json"]).unwrap() else {
            panic!("expected a run");
        };
        assert_eq!(run.project, PathBuf::from("house.json"));
        assert_eq!(run.output, run.project);
        assert!(run.report.is_none());
        assert!(!run.parallel);
    }

    #[test]
    fn all_options() {
        let Command::Run(run) =
            args(&["house.json", "--output", "out.json", "--report", "r.json", "--parallel", "--dry-run"])
                .unwrap()
        else {
            panic!("expected a run");
        };
        assert_eq!(run.output, PathBuf::from("out.json"));
        assert_eq!(run.report, Some(PathBuf::from("r.json")));
        assert!(run.parallel);
        assert!(run.dry_run);
    }

    #[test]
    fn short_output_option_is_listed() {
        let Command::Run(run) = args(&["house.json", "-o", "out.json"]).unwrap() else {
            panic!("expected a run");
        };
        assert_eq!(run.output, PathBuf::from("out.json"));
        assert!(USAGE.contains("-o, --output <path>"));
        assert!(USAGE.contains("--dry-run"));
    }

    #[test]
    fn errors() {
        assert_eq!(args(&[]), Err(ArgsError::MissingProject));
        assert_eq!(args(&["--help", "x"]), Ok(Command::Help));
        assert_eq!(
            args(&["a.json", "--output"]),
            Err(ArgsError::MissingValue("--output".into()))
        );
        assert_eq!(
            args(&["a.json", "--fast"]),
            Err(ArgsError::UnknownOption("--fast".into()))
        );
        assert_eq!(
            args(&["a.json", "b.json"]),
            Err(ArgsError::UnknownOption("b.json".into()))
        );
    }
}
