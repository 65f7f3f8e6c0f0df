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

//! CLI command implementations

mod completion;
mod list;
mod report;
mod run;

pub use completion::{generate_completion, installation_instructions};
pub use list::{list, render_listing, ListedGroup, ListedModule};
pub use report::report;
pub use run::run;

use colored::Colorize;
use std::path::PathBuf;

/// Prints the files a command wrote, one per line.
fn print_written(paths: &[PathBuf]) {
    for path in paths {
        eprintln!("{} {}", "✓".green().bold(), path.display());
    }
}
