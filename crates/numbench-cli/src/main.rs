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

//! Numbench Command Line Interface
//!
//! Runs the built-in calibration suite.
//!
//! # Examples
//!
//! ```bash
//! # Run everything, reusing report/benchmark_results.json if present
//! numbench run
//!
//! # Re-run one backend with more samples
//! numbench run -b rayon --runs 10 --force
//!
//! # Regenerate the HTML report from the saved snapshot
//! numbench report
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    numbench_cli::run_with_registry(&numbench::calibration::registry())
}
