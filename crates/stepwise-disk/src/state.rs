//! Disk scheduling payloads and statistics.

use serde::{Deserialize, Serialize};
use stepwise_trace::Trace;

/// Snapshot of the disk arm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskState {
    /// Every head position so far, starting with the initial head.
    pub path: Vec<i64>,
    /// Current head position.
    pub head: i64,
    /// Cumulative head movement.
    pub distance: u64,
    /// Track the head moves to next.
    pub next: Option<i64>,
    /// Requests not yet served, in arrival order.
    pub pending: Vec<i64>,
}

/// Aggregate figures for a completed schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeekStats {
    /// Full head path including the start and any boundary stops.
    pub path: Vec<i64>,
    /// Sum of absolute differences between consecutive path entries.
    pub total_distance: u64,
    /// `total_distance / (path.len() - 1)`, or 0 for a single-entry path.
    pub average_seek: f64,
    /// Number of requests served.
    pub requests_served: usize,
}

impl SeekStats {
    /// Compute statistics for a head path.
    pub fn from_path(path: Vec<i64>, requests_served: usize) -> Self {
        let total_distance = path_distance(&path);
        let average_seek = if path.len() > 1 {
            total_distance as f64 / (path.len() - 1) as f64
        } else {
            0.0
        };
        Self {
            path,
            total_distance,
            average_seek,
            requests_served,
        }
    }
}

/// Sum of absolute consecutive differences.
pub fn path_distance(path: &[i64]) -> u64 {
    path.windows(2).map(|w| w[0].abs_diff(w[1])).sum()
}

/// A traced schedule together with its statistics.
#[derive(Debug, Clone)]
pub struct DiskRun {
    pub trace: Trace<DiskState>,
    pub stats: SeekStats,
}
