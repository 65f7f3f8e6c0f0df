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

//! Report command - render reports from a saved snapshot

use numbench::reporters::{export_all, load_snapshot};
use numbench::BenchConfig;

use super::print_written;
use crate::error::CliError;

/// Renders every configured format from the snapshot in the output directory.
///
/// Never executes a benchmark.
///
/// # Errors
///
/// Returns [`CliError::MissingSnapshot`] when no snapshot exists, and `Err`
/// when the snapshot cannot be decoded or a report cannot be written.
pub fn report(config: &BenchConfig) -> Result<(), CliError> {
    let path = config.snapshot_path();
    if !path.exists() {
        return Err(CliError::MissingSnapshot(path));
    }

    let data = load_snapshot(&path)?;
    let written = export_all(&data, config)?;
    print_written(&written);
    Ok(())
}
