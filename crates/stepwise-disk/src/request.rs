//! Disk scheduling input.

use serde::{Deserialize, Serialize};
use stepwise_trace::{Result, TraceError};

/// Largest supported number of tracks.
pub const MAX_TRACKS: i64 = 100_000;

/// Largest supported number of pending requests.
pub const MAX_REQUESTS: usize = 1000;

/// Initial sweep direction for SCAN-family algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward higher track numbers.
    #[default]
    #[serde(alias = "right")]
    Up,
    /// Toward track 0.
    #[serde(alias = "left")]
    Down,
}

impl Direction {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// A batch of pending track requests and the head's starting point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiskRequest {
    /// Pending tracks in arrival order.
    pub requests: Vec<i64>,
    /// Starting head position.
    pub head: i64,
    /// Tracks are numbered `0..track_count`.
    #[serde(default = "default_track_count")]
    pub track_count: i64,
    /// Initial sweep direction (SCAN family only).
    #[serde(default)]
    pub direction: Direction,
}

fn default_track_count() -> i64 {
    200
}

impl DiskRequest {
    /// Create a request batch sweeping upward.
    pub fn new(requests: Vec<i64>, head: i64, track_count: i64) -> Self {
        Self {
            requests,
            head,
            track_count,
            direction: Direction::Up,
        }
    }

    /// Set the sweep direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// The classic textbook queue: head at 53 on a 200-track disk.
    pub fn demo() -> Self {
        Self::new(vec![98, 183, 37, 122, 14, 124, 65, 67], 53, 200)
    }

    /// Highest valid track.
    pub fn last_track(&self) -> i64 {
        self.track_count - 1
    }

    /// Check bounds on tracks, head and every request.
    pub fn validate(&self) -> Result<()> {
        if self.track_count <= 0 || self.track_count > MAX_TRACKS {
            return Err(TraceError::InvalidInput(format!(
                "track count {} must be between 1 and {}",
                self.track_count, MAX_TRACKS
            )));
        }
        if self.requests.len() > MAX_REQUESTS {
            return Err(TraceError::InvalidInput(format!(
                "{} requests exceed the limit of {}",
                self.requests.len(),
                MAX_REQUESTS
            )));
        }
        self.check_track("head position", self.head)?;
        for (i, &track) in self.requests.iter().enumerate() {
            self.check_track(&format!("request {}", i), track)?;
        }
        Ok(())
    }

    fn check_track(&self, what: &str, track: i64) -> Result<()> {
        if track < 0 {
            return Err(TraceError::InvalidInput(format!(
                "{} is negative ({})",
                what, track
            )));
        }
        if track >= self.track_count {
            return Err(TraceError::InvalidInput(format!(
                "{} {} is beyond the last track {}",
                what,
                track,
                self.last_track()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_is_valid() {
        assert!(DiskRequest::demo().validate().is_ok());
    }

    #[test]
    fn negative_track_is_rejected() {
        let req = DiskRequest::new(vec![10, -4], 0, 50);
        let err = req.validate().unwrap_err();
        assert_eq!(err, TraceError::InvalidInput("request 1 is negative (-4)".into()));
    }

    #[test]
    fn out_of_range_head_is_rejected() {
        assert!(DiskRequest::new(vec![], 200, 200).validate().is_err());
        assert!(DiskRequest::new(vec![], 199, 200).validate().is_ok());
    }

    #[test]
    fn zero_tracks_is_rejected() {
        assert!(DiskRequest::new(vec![], 0, 0).validate().is_err());
    }

    #[test]
    fn direction_accepts_left_right_aliases() {
        let up: Direction = serde_json::from_str("\"right\"").unwrap();
        let down: Direction = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(up, Direction::Up);
        assert_eq!(down, Direction::Down);
        assert_eq!(up.reversed(), Direction::Down);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let req: DiskRequest = serde_json::from_str(r#"{"requests":[5],"head":1}"#).unwrap();
        assert_eq!(req.track_count, 200);
        assert_eq!(req.direction, Direction::Up);
    }

    #[test]
    fn misspelled_field_is_rejected() {
        let err = serde_json::from_str::<DiskRequest>(r#"{"requests":[5],"head":1,"directon":"down"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("directon"));
    }
}
