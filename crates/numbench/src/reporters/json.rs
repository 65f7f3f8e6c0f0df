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

//! JSON snapshot persistence.

use crate::error::{BenchError, Result};
use crate::report::BenchData;
use std::fs;
use std::path::Path;

/// Saves benchmark data as pretty JSON, creating parent directories.
///
/// # Arguments
///
/// * `data` - The benchmark data to persist
/// * `path` - Snapshot file path
pub fn save_snapshot(data: &BenchData, path: &Path) -> Result<()> {
    let json = data.to_json().map_err(|e| BenchError::Snapshot {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| BenchError::io_error(parent, e))?;
    }
    fs::write(path, json).map_err(|e| BenchError::io_error(path, e))?;
    Ok(())
}

/// Loads benchmark data saved by [`save_snapshot`].
pub fn load_snapshot(path: &Path) -> Result<BenchData> {
    let json = fs::read_to_string(path).map_err(|e| BenchError::io_error(path, e))?;
    BenchData::from_json(&json).map_err(|e| BenchError::Snapshot {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
