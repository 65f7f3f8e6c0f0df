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

//! Ranking and summary statistics.
//!
//! Ranking is a post-pass over a group's records: records keep their
//! discovery order and only their `rank` and `speedup` fields are set.

use crate::core::config::SpeedupBaseline;
use crate::report::{GroupResult, MeasurementRecord};

/// Assigns ranks and speedups to the records of one group.
///
/// Records with a warm time are stable-sorted by ascending warm time and
/// ranked `1..=n`, so ties keep discovery order. Speedup is
/// `baseline / warm_time`, where the baseline is the slowest or fastest warm
/// time of the group. Records without a positive warm time get no speedup.
pub fn rank_records(records: &mut [MeasurementRecord], baseline: SpeedupBaseline) {
    let mut order: Vec<usize> = (0..records.len())
        .filter(|&i| records[i].warm_time.is_some())
        .collect();
    order.sort_by(|&a, &b| {
        let wa = records[a].warm_time.unwrap_or(f64::INFINITY);
        let wb = records[b].warm_time.unwrap_or(f64::INFINITY);
        wa.total_cmp(&wb)
    });

    for record in records.iter_mut() {
        record.rank = None;
        record.speedup = None;
    }

    let reference = match baseline {
        SpeedupBaseline::Slowest => order.last(),
        SpeedupBaseline::Fastest => order.first(),
    }
    .and_then(|&i| records[i].warm_time);

    for (position, &index) in order.iter().enumerate() {
        let record = &mut records[index];
        record.rank = Some(position + 1);
        record.speedup = match (reference, record.warm_time) {
            (Some(base), Some(warm)) if warm > 0.0 => Some(base / warm),
            _ => None,
        };
    }
}

/// Summary of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    /// Group name.
    pub group_name: String,
    /// Number of measured entries.
    pub measured: usize,
    /// Entries that failed at runtime.
    pub runtime_failures: usize,
    /// Modules that failed to load.
    pub import_failures: usize,
    /// Rank 1 entry.
    pub fastest: Option<String>,
    /// Last-ranked entry.
    pub slowest: Option<String>,
    /// Ratio between the slowest and fastest warm time.
    pub spread: Option<f64>,
    /// Sum of cold times and warm samples, in seconds.
    pub total_time: f64,
}

/// Summarizes a ranked group.
pub fn summarize(group: &GroupResult) -> GroupSummary {
    let ranked = group.ranked();
    let fastest = ranked.first();
    let slowest = ranked.last();

    let spread = match (
        fastest.and_then(|r| r.warm_time),
        slowest.and_then(|r| r.warm_time),
    ) {
        (Some(fast), Some(slow)) if fast > 0.0 => Some(slow / fast),
        _ => None,
    };

    let total_time = group
        .records
        .iter()
        .map(|r| {
            let warm: f64 = if r.cold_only {
                0.0
            } else {
                r.all_warm_times.iter().sum()
            };
            r.cold_time.unwrap_or(0.0) + warm
        })
        .sum();

    GroupSummary {
        group_name: group.group_name.clone(),
        measured: group.records.len(),
        runtime_failures: group.runtime_errors.len(),
        import_failures: group.import_errors.len(),
        fastest: fastest.map(|r| r.name.clone()),
        slowest: slowest.map(|r| r.name.clone()),
        spread,
        total_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, warm: Option<f64>) -> MeasurementRecord {
        MeasurementRecord {
            cold_time: warm,
            warm_time: warm,
            all_warm_times: warm.into_iter().collect(),
            ..MeasurementRecord::new(name, "src", "jit")
        }
    }

    #[test]
    fn test_rank_against_slowest() {
        let mut records = vec![record("slow", Some(0.1)), record("fast", Some(0.01))];
        rank_records(&mut records, SpeedupBaseline::Slowest);

        assert_eq!(records[0].name, "slow");
        assert_eq!(records[0].rank, Some(2));
        assert_eq!(records[1].rank, Some(1));
        assert!((records[0].speedup.unwrap() - 1.0).abs() < 1e-12);
        assert!((records[1].speedup.unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_rank_against_fastest() {
        let mut records = vec![record("slow", Some(0.1)), record("fast", Some(0.01))];
        rank_records(&mut records, SpeedupBaseline::Fastest);

        assert!((records[1].speedup.unwrap() - 1.0).abs() < 1e-12);
        assert!((records[0].speedup.unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let mut records = vec![
            record("a", Some(0.5)),
            record("b", Some(0.2)),
            record("c", Some(0.5)),
        ];
        rank_records(&mut records, SpeedupBaseline::Slowest);

        assert_eq!(records[1].rank, Some(1));
        assert_eq!(records[0].rank, Some(2));
        assert_eq!(records[2].rank, Some(3));
    }

    #[test]
    fn test_unmeasured_records_are_not_ranked() {
        let mut records = vec![record("x", None), record("y", Some(0.3))];
        rank_records(&mut records, SpeedupBaseline::Slowest);

        assert_eq!(records[0].rank, None);
        assert_eq!(records[0].speedup, None);
        assert_eq!(records[1].rank, Some(1));
        assert_eq!(records[1].speedup, Some(1.0));
    }

    #[test]
    fn test_zero_warm_time_has_no_speedup() {
        let mut records = vec![record("instant", Some(0.0)), record("y", Some(0.3))];
        rank_records(&mut records, SpeedupBaseline::Slowest);

        assert_eq!(records[0].rank, Some(1));
        assert_eq!(records[0].speedup, None);
    }

    #[test]
    fn test_summarize() {
        let mut group = GroupResult::new("g", "src/g");
        group.records = vec![record("slow", Some(0.4)), record("fast", Some(0.1))];
        rank_records(&mut group.records, SpeedupBaseline::Slowest);

        let summary = summarize(&group);
        assert_eq!(summary.fastest.as_deref(), Some("fast"));
        assert_eq!(summary.slowest.as_deref(), Some("slow"));
        assert!((summary.spread.unwrap() - 4.0).abs() < 1e-9);
        assert!((summary.total_time - 1.0).abs() < 1e-9);
        assert_eq!(summary.measured, 2);
    }

    #[test]
    fn test_total_time_counts_cold_only_entries_once() {
        let mut group = GroupResult::new("g", "src/g");
        group.records = vec![
            MeasurementRecord {
                cold_only: true,
                ..record("plain", Some(0.25))
            },
            record("sampled_once", Some(0.5)),
        ];
        rank_records(&mut group.records, SpeedupBaseline::Slowest);

        // The sampled entry's single warm sample equals its cold time and
        // still counts.
        let summary = summarize(&group);
        assert!((summary.total_time - 1.25).abs() < 1e-9);
    }
}
