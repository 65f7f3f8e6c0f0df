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

//! Benchmark commands: run a registry, re-render a snapshot, list suites.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Subcommand};
use numbench::core::config::{DEFAULT_OUTPUT_DIR, DEFAULT_RUNS, DEFAULT_SOURCE_ROOT};
use numbench::{BenchConfig, ExportFormat, Registry, ReportLinks, SpeedupBaseline, WarmupStrategy};

use crate::commands;
use crate::error::CliError;

/// Benchmark commands.
#[derive(Subcommand, Debug)]
pub enum BenchCommands {
    /// Run benchmarks and write reports
    ///
    /// Reuses the snapshot in the output directory when one exists, unless
    /// --force is given.
    Run(RunArgs),

    /// Render reports from an existing snapshot without running anything
    Report(ReportArgs),

    /// List groups and modules
    List(ListArgs),
}

impl BenchCommands {
    /// Execute the benchmark command.
    pub fn execute(self, registry: &Registry) -> Result<(), CliError> {
        match self {
            BenchCommands::Run(args) => commands::run(registry, &args.to_config()?),
            BenchCommands::Report(args) => commands::report(&args.to_config()),
            BenchCommands::List(args) => commands::list(registry, &args.to_config(), args.json),
        }
    }
}

/// Output options shared by `run` and `report`.
#[derive(Args, Debug, Clone)]
pub struct ReportOptions {
    /// Directory for the snapshot and reports
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Report formats (html, markdown, console)
    #[arg(long, value_delimiter = ',', default_value = "html,console")]
    pub format: Vec<ExportFormat>,

    /// Root that group source links point into
    #[arg(long, value_name = "URL", default_value = DEFAULT_SOURCE_ROOT)]
    pub source_root: String,

    /// Repository link shown in the report navigation
    #[arg(long, value_name = "URL")]
    pub repository_url: Option<String>,

    /// About link shown in the report navigation
    #[arg(long, value_name = "URL")]
    pub about_url: Option<String>,
}

impl ReportOptions {
    fn apply(&self, config: BenchConfig) -> BenchConfig {
        config
            .with_output_dir(&self.output_dir)
            .with_export_formats(self.format.clone())
            .with_source_root(&self.source_root)
            .with_links(ReportLinks {
                repository: self.repository_url.clone(),
                about: self.about_url.clone(),
            })
    }
}

/// Arguments of `numbench run`.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Only run this group (repeatable)
    #[arg(short, long = "group", value_name = "GROUP")]
    pub groups: Vec<String>,

    /// Only run modules with this backend suffix (repeatable)
    #[arg(short, long = "backend", value_name = "BACKEND")]
    pub backends: Vec<String>,

    /// Ignore and overwrite an existing snapshot
    #[arg(long)]
    pub force: bool,

    /// Abort on the first benchmark failure
    #[arg(long)]
    pub fail_fast: bool,

    /// Timed calls per benchmark
    #[arg(long, value_name = "N", default_value_t = DEFAULT_RUNS)]
    pub runs: usize,

    /// Stop sampling once a call takes longer than this many seconds
    #[arg(long, value_name = "SECS", default_value_t = 10.0)]
    pub slow_threshold: f64,

    /// Seed for fixture factories
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Warm-up strategy (by-backend, always, ratio:R)
    #[arg(long, value_name = "STRATEGY", default_value = "by-backend")]
    pub warmup: WarmupStrategy,

    /// Speedup baseline (slowest, fastest)
    #[arg(long, value_name = "BASELINE", default_value = "slowest")]
    pub speedup_baseline: SpeedupBaseline,

    #[command(flatten)]
    pub output: ReportOptions,
}

impl RunArgs {
    /// Builds the harness configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the slow threshold is not a finite, non-negative number.
    pub fn to_config(&self) -> Result<BenchConfig, CliError> {
        let threshold = Duration::try_from_secs_f64(self.slow_threshold).map_err(|_| {
            CliError::invalid_input(format!(
                "slow threshold must be a non-negative number of seconds, got {}",
                self.slow_threshold
            ))
        })?;

        let mut config = BenchConfig::default()
            .with_runs(self.runs)
            .with_slow_threshold(threshold)
            .with_seed(self.seed)
            .with_warmup(self.warmup)
            .with_speedup_baseline(self.speedup_baseline)
            .with_force(self.force)
            .with_fail_fast(self.fail_fast);
        for group in &self.groups {
            config = config.with_group(group);
        }
        for backend in &self.backends {
            config = config.with_backend(backend);
        }
        Ok(self.output.apply(config))
    }
}

/// Arguments of `numbench report`.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub output: ReportOptions,
}

impl ReportArgs {
    /// Builds the harness configuration.
    pub fn to_config(&self) -> BenchConfig {
        self.output.apply(BenchConfig::default())
    }
}

/// Arguments of `numbench list`.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Only list this group (repeatable)
    #[arg(short, long = "group", value_name = "GROUP")]
    pub groups: Vec<String>,

    /// Only list modules with this backend suffix (repeatable)
    #[arg(short, long = "backend", value_name = "BACKEND")]
    pub backends: Vec<String>,

    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// Builds the harness configuration.
    pub fn to_config(&self) -> BenchConfig {
        let mut config = BenchConfig::default();
        for group in &self.groups {
            config = config.with_group(group);
        }
        for backend in &self.backends {
            config = config.with_backend(backend);
        }
        config
    }
}
