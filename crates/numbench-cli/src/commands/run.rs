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

//! Run command - execute the registry and export reports

use colored::Colorize;
use numbench::reporters::export_all;
use numbench::{load_or_run, BenchConfig, Registry};

use super::print_written;
use crate::error::CliError;

/// Runs the selected benchmarks, or reuses the snapshot, and writes reports.
///
/// Import and runtime failures of individual benchmarks are part of the
/// report and do not fail the command unless fail-fast is set.
///
/// # Errors
///
/// Returns `Err` on configuration errors, fail-fast failures and I/O errors.
pub fn run(registry: &Registry, config: &BenchConfig) -> Result<(), CliError> {
    let data = load_or_run(registry, config)?;
    let written = export_all(&data, config)?;

    let mut paths = vec![config.snapshot_path()];
    paths.extend(written);
    print_written(&paths);

    let errors = data.error_count();
    if errors > 0 {
        eprintln!(
            "{} {} benchmark(s) or module(s) failed; see the report for details",
            "!".yellow().bold(),
            errors
        );
    }
    Ok(())
}
