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

//! CLI command definitions and argument parsing.
//!
//! # Organization
//!
//! - [`bench`]: Commands that run, render or list benchmarks
//! - [`utility`]: Utility commands (completion)

mod bench;
mod utility;

use clap::Subcommand;
use numbench::Registry;

use crate::error::CliError;

pub use bench::{BenchCommands, ListArgs, ReportArgs, ReportOptions, RunArgs};
pub use utility::UtilityCommands;

/// Top-level CLI commands enum.
///
/// ```text
/// Commands
/// ├── Bench (run, report, list)
/// └── Utility (completion)
/// ```
#[derive(Subcommand, Debug)]
pub enum Commands {
    // Benchmark commands - flattened to appear at top level
    #[command(flatten)]
    Bench(BenchCommands),

    // Utility commands - flattened to appear at top level
    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command against `registry`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - The configuration or registry is invalid
    /// - A benchmark fails in fail-fast mode
    /// - A snapshot or report cannot be read or written
    pub fn execute(self, registry: &Registry) -> Result<(), CliError> {
        match self {
            Commands::Bench(cmd) => cmd.execute(registry),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }
}
