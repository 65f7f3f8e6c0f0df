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

//! Centralized harness configuration.
//!
//! Provides run settings (repetitions, warm-up policy, slow threshold, seed),
//! selection filters, output locations and export settings.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::core::entry::BackendKind;
use crate::error::{BenchError, Result};

/// Default number of timed calls per entry, cold call included.
pub const DEFAULT_RUNS: usize = 5;

/// Default slow threshold: entries slower than this are not re-sampled.
pub const DEFAULT_SLOW_THRESHOLD: Duration = Duration::from_secs(10);

/// Default output directory for the snapshot and reports.
pub const DEFAULT_OUTPUT_DIR: &str = "report";

/// Default root of benchmark sources used for report links.
pub const DEFAULT_SOURCE_ROOT: &str = "suites";

/// Snapshot file name inside the output directory.
pub const SNAPSHOT_FILE: &str = "benchmark_results.json";

/// HTML report file name inside the output directory.
pub const HTML_REPORT_FILE: &str = "index.html";

/// Markdown report file name inside the output directory.
pub const MARKDOWN_REPORT_FILE: &str = "report.md";

/// Export format options for benchmark reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Static HTML page.
    Html,
    /// Markdown document.
    Markdown,
    /// Summary tables logged to the terminal.
    Console,
}

impl ExportFormat {
    /// Returns the format name as accepted on the command line.
    pub fn as_str(&self) -> &str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Console => "console",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "html" => Ok(ExportFormat::Html),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "console" => Ok(ExportFormat::Console),
            other => Err(BenchError::invalid_config(
                "format",
                format!("unknown export format '{}'", other),
            )),
        }
    }
}

/// Decides whether an entry is sampled again after its cold call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum WarmupStrategy {
    /// Plain reference code is timed once; every other backend is sampled.
    #[default]
    ByBackend,
    /// Take one warm sample; keep sampling only if `cold / warm >= ratio`.
    TimingRatio(f64),
    /// Always sample.
    Always,
}

impl WarmupStrategy {
    /// Whether warm samples should be taken for `backend` at all.
    pub fn samples(&self, backend: BackendKind) -> bool {
        match self {
            WarmupStrategy::ByBackend => backend != BackendKind::Plain,
            WarmupStrategy::TimingRatio(_) | WarmupStrategy::Always => true,
        }
    }
}

impl fmt::Display for WarmupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarmupStrategy::ByBackend => f.write_str("by-backend"),
            WarmupStrategy::TimingRatio(ratio) => write!(f, "ratio:{}", ratio),
            WarmupStrategy::Always => f.write_str("always"),
        }
    }
}

impl FromStr for WarmupStrategy {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s {
            "by-backend" => Ok(WarmupStrategy::ByBackend),
            "always" => Ok(WarmupStrategy::Always),
            _ => {
                let ratio = s
                    .strip_prefix("ratio:")
                    .and_then(|r| r.parse::<f64>().ok())
                    .ok_or_else(|| {
                        BenchError::invalid_config(
                            "warmup",
                            format!("expected by-backend, always or ratio:R, got '{}'", s),
                        )
                    })?;
                Ok(WarmupStrategy::TimingRatio(ratio))
            }
        }
    }
}

/// Which warm time speedups are measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SpeedupBaseline {
    /// Slowest entry of the group; every speedup is at least 1.
    #[default]
    Slowest,
    /// Fastest entry of the group; every speedup is at most 1.
    Fastest,
}

impl fmt::Display for SpeedupBaseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedupBaseline::Slowest => f.write_str("slowest"),
            SpeedupBaseline::Fastest => f.write_str("fastest"),
        }
    }
}

impl FromStr for SpeedupBaseline {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "slowest" => Ok(SpeedupBaseline::Slowest),
            "fastest" => Ok(SpeedupBaseline::Fastest),
            other => Err(BenchError::invalid_config(
                "speedup_baseline",
                format!("expected slowest or fastest, got '{}'", other),
            )),
        }
    }
}

/// Links rendered in the report navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportLinks {
    /// Project repository.
    pub repository: Option<String>,
    /// About page.
    pub about: Option<String>,
}

/// Sampling settings handed to the timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerSettings {
    /// Total timed calls, cold call included.
    pub n_runs: usize,
    /// Sampling stops once a call takes longer than this.
    pub slow_threshold: Duration,
    /// Warm-up policy.
    pub warmup: WarmupStrategy,
}

/// Centralized harness configuration.
///
/// # Example
///
/// ```no_run
/// use numbench::core::config::{BenchConfig, ExportFormat, WarmupStrategy};
///
/// let config = BenchConfig::default()
///     .with_runs(10)
///     .with_warmup(WarmupStrategy::Always)
///     .with_group("pairwise")
///     .with_export_format(ExportFormat::Markdown);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Timed calls per entry, cold call included.
    pub n_runs: usize,
    /// Sampling stops once a call takes longer than this.
    pub slow_threshold: Duration,
    /// Warm-up policy.
    pub warmup: WarmupStrategy,
    /// Speedup reference point.
    pub speedup_baseline: SpeedupBaseline,
    /// Seed handed to fixture factories.
    pub seed: u64,
    /// Abort on the first runtime failure.
    pub fail_fast: bool,
    /// Re-run even when a snapshot exists.
    pub force: bool,
    /// Directory receiving the snapshot and reports.
    pub output_dir: PathBuf,
    /// Group names to run; empty means all.
    pub groups: Vec<String>,
    /// Backend suffixes to run; empty means all.
    pub backends: Vec<String>,
    /// Report formats written after a run.
    pub export_formats: Vec<ExportFormat>,
    /// Root of the benchmark sources, used to build source links.
    pub source_root: String,
    /// Navigation links.
    pub links: ReportLinks,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            n_runs: DEFAULT_RUNS,
            slow_threshold: DEFAULT_SLOW_THRESHOLD,
            warmup: WarmupStrategy::default(),
            speedup_baseline: SpeedupBaseline::default(),
            seed: 0,
            fail_fast: false,
            force: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            groups: Vec::new(),
            backends: Vec::new(),
            export_formats: vec![ExportFormat::Html, ExportFormat::Console],
            source_root: DEFAULT_SOURCE_ROOT.to_string(),
            links: ReportLinks::default(),
        }
    }
}

impl BenchConfig {
    /// Sets the number of timed calls per entry.
    pub fn with_runs(mut self, n_runs: usize) -> Self {
        self.n_runs = n_runs;
        self
    }

    /// Sets the slow threshold.
    pub fn with_slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_threshold = threshold;
        self
    }

    /// Sets the warm-up policy.
    pub fn with_warmup(mut self, warmup: WarmupStrategy) -> Self {
        self.warmup = warmup;
        self
    }

    /// Sets the speedup reference point.
    pub fn with_speedup_baseline(mut self, baseline: SpeedupBaseline) -> Self {
        self.speedup_baseline = baseline;
        self
    }

    /// Sets the fixture seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables fail-fast mode.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Forces a re-run even when a snapshot exists.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Sets the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Restricts the run to a group (may be called repeatedly).
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Restricts the run to a backend suffix (may be called repeatedly).
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backends.push(backend.into());
        self
    }

    /// Adds an export format.
    pub fn with_export_format(mut self, format: ExportFormat) -> Self {
        if !self.export_formats.contains(&format) {
            self.export_formats.push(format);
        }
        self
    }

    /// Sets all export formats.
    pub fn with_export_formats(mut self, formats: Vec<ExportFormat>) -> Self {
        self.export_formats = formats;
        self
    }

    /// Sets the root used for source links.
    pub fn with_source_root(mut self, root: impl Into<String>) -> Self {
        self.source_root = root.into();
        self
    }

    /// Sets the navigation links.
    pub fn with_links(mut self, links: ReportLinks) -> Self {
        self.links = links;
        self
    }

    /// Returns whether a specific export format is enabled.
    pub fn has_format(&self, format: ExportFormat) -> bool {
        self.export_formats.contains(&format)
    }

    /// Whether a group passes the group filter.
    pub fn selects_group(&self, name: &str) -> bool {
        self.groups.is_empty() || self.groups.iter().any(|g| g == name)
    }

    /// Whether a backend suffix passes the backend filter.
    pub fn selects_backend(&self, backend: &str) -> bool {
        self.backends.is_empty() || self.backends.iter().any(|b| b == backend)
    }

    /// Path of the JSON snapshot.
    pub fn snapshot_path(&self) -> PathBuf {
        self.output_dir.join(SNAPSHOT_FILE)
    }

    /// Path of the HTML report.
    pub fn html_path(&self) -> PathBuf {
        self.output_dir.join(HTML_REPORT_FILE)
    }

    /// Path of the Markdown report.
    pub fn markdown_path(&self) -> PathBuf {
        self.output_dir.join(MARKDOWN_REPORT_FILE)
    }

    /// Source link for a group.
    pub fn group_source_url(&self, group: &str) -> String {
        let root = Path::new(&self.source_root).join(group);
        root.to_string_lossy().replace('\\', "/")
    }

    /// Settings for the timer.
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            n_runs: self.n_runs,
            slow_threshold: self.slow_threshold,
            warmup: self.warmup,
        }
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.n_runs == 0 {
            return Err(BenchError::invalid_config("n_runs", "must be at least 1"));
        }
        if self.slow_threshold.is_zero() {
            return Err(BenchError::invalid_config(
                "slow_threshold",
                "must be greater than zero",
            ));
        }
        if let WarmupStrategy::TimingRatio(ratio) = self.warmup {
            if !ratio.is_finite() || ratio <= 1.0 {
                return Err(BenchError::invalid_config(
                    "warmup",
                    format!("timing ratio must be a finite number above 1, got {}", ratio),
                ));
            }
        }
        Ok(())
    }
}
