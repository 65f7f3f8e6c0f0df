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

//! Re-rendering reports from a saved snapshot.
//!
//! Nothing is executed: the snapshot written by an earlier run is loaded and
//! rendered again, so reports can be regenerated after changing links or
//! formats.
//!
//! Run with:
//! ```bash
//! cargo run --package numbench --example replay_report -- report/benchmark_results.json
//! ```

use std::env;
use std::path::PathBuf;
use std::process;

use numbench::reporters::{console, load_snapshot, render_markdown};
use numbench::ReportLinks;

fn main() {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("report/benchmark_results.json"));

    let data = match load_snapshot(&path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Cannot replay {}: {}", path.display(), e);
            process::exit(1);
        }
    };

    let links = ReportLinks {
        repository: Some("https://example.org/numbench".to_string()),
        about: None,
    };
    print!("{}", render_markdown(&data, &links));
    console::print_summary(&data);
}
