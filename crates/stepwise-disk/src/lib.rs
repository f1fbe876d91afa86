//! Stepwise Disk Scheduling
//!
//! Head-movement traces for the classic disk scheduling policies. Every
//! policy emits the same frame shape: the starting head, one frame per head
//! stop, and a closing summary. Boundary sweeps (SCAN, C-SCAN) and circular
//! returns (C-SCAN, C-LOOK) appear in the head path and count toward the
//! total distance.

mod request;
mod schedule;
mod state;

use serde::{Deserialize, Serialize};
use stepwise_trace::Result;

pub use request::{Direction, DiskRequest, MAX_REQUESTS, MAX_TRACKS};
pub use schedule::{c_look, c_scan, fcfs, look, scan, sstf};
pub use state::{path_distance, DiskRun, DiskState, SeekStats};

/// The scheduling policies available for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiskAlgorithm {
    Fcfs,
    Sstf,
    Scan,
    Look,
    CScan,
    CLook,
}

impl DiskAlgorithm {
    /// All variants in display order.
    pub const ALL: [DiskAlgorithm; 6] = [
        DiskAlgorithm::Fcfs,
        DiskAlgorithm::Sstf,
        DiskAlgorithm::Scan,
        DiskAlgorithm::Look,
        DiskAlgorithm::CScan,
        DiskAlgorithm::CLook,
    ];

    /// Whether the policy honors [`DiskRequest::direction`].
    pub fn uses_direction(self) -> bool {
        !matches!(self, DiskAlgorithm::Fcfs | DiskAlgorithm::Sstf)
    }

    /// Run this policy.
    pub fn run(self, req: &DiskRequest) -> Result<DiskRun> {
        match self {
            DiskAlgorithm::Fcfs => fcfs(req),
            DiskAlgorithm::Sstf => sstf(req),
            DiskAlgorithm::Scan => scan(req),
            DiskAlgorithm::Look => look(req),
            DiskAlgorithm::CScan => c_scan(req),
            DiskAlgorithm::CLook => c_look(req),
        }
    }
}
