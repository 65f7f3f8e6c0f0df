// Numbench - Numerical micro-benchmark harness
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Numbench CLI library for command-line parsing and execution.
//!
//! The binary runs the built-in calibration suite. Projects with their own
//! suites build a [`Registry`] and hand it to [`run_with_registry`] from a
//! `main` of their own:
//!
//! ```no_run
//! use numbench::{BenchmarkEntry, BenchmarkGroup, BenchmarkModule, Fixture, Registry};
//! use std::process::ExitCode;
//!
//! fn main() -> ExitCode {
//!     let registry = Registry::new().group(BenchmarkGroup::new("noop").module(
//!         BenchmarkModule::new("noop_naive", || {
//!             Ok(vec![BenchmarkEntry::infallible("noop", |_: &Fixture<()>| ())])
//!         }),
//!     ));
//!     numbench_cli::run_with_registry(&registry)
//! }
//! ```
//!
//! # Commands
//!
//! - **run**: Run benchmarks (or reuse the snapshot) and write reports
//! - **report**: Render reports from an existing snapshot
//! - **list**: List groups and modules without loading them
//! - **completion**: Generate shell completion scripts
//!
//! # Exit status
//!
//! `0` on success, including runs where individual benchmarks failed to load
//! or run. `1` on configuration errors, fail-fast failures and I/O errors.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

use clap::{ArgAction, Parser};
use numbench::Registry;
use std::ffi::OsString;
use std::process::ExitCode;

use crate::cli::Commands;

/// Numbench - numerical micro-benchmark harness
#[derive(Parser, Debug)]
#[command(name = "numbench")]
#[command(author, version, about = "Numbench - numerical micro-benchmark harness", long_about = None)]
pub struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Installs logging and executes the command.
    pub fn execute(self, registry: &Registry) -> ExitCode {
        logging::init(self.verbose, self.quiet);

        match self.command.execute(registry) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        }
    }
}

/// Parses the process arguments and runs them against `registry`.
pub fn run_with_registry(registry: &Registry) -> ExitCode {
    Cli::parse().execute(registry)
}

/// Parses `args` (including the binary name) and runs them against `registry`.
pub fn run_from<I, T>(args: I, registry: &Registry) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => cli.execute(registry),
        Err(e) => {
            let _ = e.print();
            if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use numbench::{BenchmarkEntry, BenchmarkGroup, BenchmarkModule, Fixture, LoadError};
    use std::path::Path;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_arguments() {
        let cli = Cli::try_parse_from([
            "numbench", "-vv", "run", "-g", "calibration", "-b", "spin", "--runs", "3",
            "--warmup", "ratio:2.5", "--speedup-baseline", "fastest", "--format", "md,console",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);

        let Commands::Bench(cli::BenchCommands::Run(args)) = cli.command else {
            panic!("expected run command");
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.groups, vec!["calibration"]);
        assert_eq!(config.backends, vec!["spin"]);
        assert_eq!(config.n_runs, 3);
        assert_eq!(config.warmup, numbench::WarmupStrategy::TimingRatio(2.5));
        assert_eq!(config.speedup_baseline, numbench::SpeedupBaseline::Fastest);
        assert_eq!(
            config.export_formats,
            vec![numbench::ExportFormat::Markdown, numbench::ExportFormat::Console]
        );
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["numbench", "run"]).unwrap();
        let Commands::Bench(cli::BenchCommands::Run(args)) = cli.command else {
            panic!("expected run command");
        };
        let config = args.to_config().unwrap();
        assert_eq!(config, numbench::BenchConfig::default());
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let cli =
            Cli::try_parse_from(["numbench", "run", "--slow-threshold=-1"]).unwrap();
        let Commands::Bench(cli::BenchCommands::Run(args)) = cli.command else {
            panic!("expected run command");
        };
        assert!(args.to_config().is_err());
    }

    #[test]
    fn test_bad_warmup_rejected_by_parser() {
        assert!(Cli::try_parse_from(["numbench", "run", "--warmup", "sometimes"]).is_err());
    }

    // ===== Exit status against custom registries =====

    fn run_args(dir: &Path, extra: &[&str]) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["numbench", "-q", "run", "--runs", "1", "--format", "html"]
            .iter()
            .map(OsString::from)
            .collect();
        args.extend(extra.iter().map(OsString::from));
        args.push("-o".into());
        args.push(dir.as_os_str().to_owned());
        args
    }

    fn assert_exit(actual: ExitCode, expected: ExitCode) {
        assert_eq!(format!("{:?}", actual), format!("{:?}", expected));
    }

    fn unloadable_registry() -> Registry {
        Registry::new().group(BenchmarkGroup::<()>::new("h").module(BenchmarkModule::new(
            "h_opencl",
            || Err(LoadError::missing_dependency("pyopencl")),
        )))
    }

    fn diverging_registry() -> Registry {
        Registry::new().group(BenchmarkGroup::new("newton").module(BenchmarkModule::new(
            "newton_naive",
            || {
                Ok(vec![
                    BenchmarkEntry::infallible("step", |_: &Fixture<()>| 1.0f64),
                    BenchmarkEntry::new("diverge", |_: &Fixture<()>| {
                        Err::<f64, _>("iteration diverged")
                    }),
                ])
            },
        )))
    }

    #[test]
    fn test_import_failure_exits_successfully() {
        let dir = tempfile::tempdir().unwrap();
        let code = run_from(run_args(dir.path(), &[]), &unloadable_registry());
        assert_exit(code, ExitCode::SUCCESS);

        let snapshot = std::fs::read_to_string(dir.path().join("benchmark_results.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
        let group = &value["benchmark_results"][0];
        assert_eq!(group["records"].as_array().unwrap().len(), 0);
        assert_eq!(group["import_errors"][0]["name"], "h_opencl");
    }

    #[test]
    fn test_runtime_failure_exit_status() {
        let tolerant = tempfile::tempdir().unwrap();
        let code = run_from(run_args(tolerant.path(), &[]), &diverging_registry());
        assert_exit(code, ExitCode::SUCCESS);

        let strict = tempfile::tempdir().unwrap();
        let code = run_from(run_args(strict.path(), &["--fail-fast"]), &diverging_registry());
        assert_exit(code, ExitCode::FAILURE);
        assert!(!strict.path().join("benchmark_results.json").exists());
    }

    #[test]
    fn test_unknown_group_exits_with_failure() {
        let dir = tempfile::tempdir().unwrap();
        let code = run_from(run_args(dir.path(), &["-g", "g"]), &unloadable_registry());
        assert_exit(code, ExitCode::FAILURE);
    }
}
