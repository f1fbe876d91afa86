//! Scheduling policies.
//!
//! Each policy first plans the ordered list of head stops, then [`record`]
//! replays the plan into frames so every policy shares the same frame shape:
//! one starting frame, one frame per stop, one summary frame.

use stepwise_trace::{Result, TraceBuilder};

use crate::request::{DiskRequest, Direction};
use crate::state::{DiskRun, DiskState, SeekStats};

/// One planned head movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    /// Serve a pending request; `wrapped` marks the first request after a
    /// circular return.
    Serve { track: i64, wrapped: bool },
    /// Sweep to the edge of the disk before reversing or wrapping.
    Boundary(i64),
    /// Circular return to the opposite edge without serving.
    Wrap(i64),
}

impl Stop {
    fn track(self) -> i64 {
        match self {
            Stop::Serve { track, .. } | Stop::Boundary(track) | Stop::Wrap(track) => track,
        }
    }

    fn serve(track: i64) -> Self {
        Stop::Serve { track, wrapped: false }
    }
}

/// Requests below the head (descending) and at-or-above it (ascending).
fn split(req: &DiskRequest) -> (Vec<i64>, Vec<i64>) {
    let mut sorted = req.requests.clone();
    sorted.sort_unstable();
    let (mut lower, upper): (Vec<i64>, Vec<i64>) = sorted.into_iter().partition(|&t| t < req.head);
    lower.reverse();
    (lower, upper)
}

fn edge(req: &DiskRequest, direction: Direction) -> i64 {
    match direction {
        Direction::Up => req.last_track(),
        Direction::Down => 0,
    }
}

/// Requests ahead of the head in `direction` (nearest first) and those behind
/// it (nearest first).
fn legs(req: &DiskRequest) -> (Vec<i64>, Vec<i64>) {
    let (lower, upper) = split(req);
    match req.direction {
        Direction::Up => (upper, lower),
        Direction::Down => (lower, upper),
    }
}

fn last_position(req: &DiskRequest, stops: &[Stop]) -> i64 {
    stops.last().map_or(req.head, |s| s.track())
}

/// Turn planned stops into a trace and statistics.
fn record(algorithm: &str, req: &DiskRequest, stops: &[Stop]) -> Result<DiskRun> {
    let mut state = DiskState {
        path: vec![req.head],
        head: req.head,
        distance: 0,
        next: stops.first().map(|s| s.track()),
        pending: req.requests.clone(),
    };
    let mut builder = TraceBuilder::new(algorithm);
    builder.snapshot(
        format!("Head at {}", req.head),
        format!("{} pending requests: {:?}", req.requests.len(), req.requests),
        &state,
    );

    let mut served = 0;
    for (i, stop) in stops.iter().enumerate() {
        let from = state.head;
        let to = stop.track();
        let step = from.abs_diff(to);

        state.head = to;
        state.distance += step;
        state.path.push(to);
        state.next = stops.get(i + 1).map(|s| s.track());

        let title = match *stop {
            Stop::Serve { wrapped: false, .. } => format!("Seek to {}", to),
            Stop::Serve { wrapped: true, .. } => format!("Wrap to {}", to),
            Stop::Boundary(_) => format!("Sweep to edge {}", to),
            Stop::Wrap(_) => format!("Return to edge {}", to),
        };
        if let Stop::Serve { .. } = stop {
            if let Some(pos) = state.pending.iter().position(|&t| t == to) {
                state.pending.remove(pos);
            }
            served += 1;
        }
        builder.snapshot(
            title,
            format!("{} → {}: moved {}, total {}", from, to, step, state.distance),
            &state,
        );
    }

    let stats = SeekStats::from_path(state.path.clone(), served);
    state.next = None;
    builder.snapshot(
        "Schedule complete",
        format!(
            "Total head movement {}, average seek {:.2}",
            stats.total_distance, stats.average_seek
        ),
        &state,
    );

    tracing::debug!(
        algorithm,
        total = stats.total_distance,
        served,
        "disk schedule traced"
    );
    Ok(DiskRun {
        trace: builder.finish()?,
        stats,
    })
}

/// First-come first-served: requests in arrival order.
pub fn fcfs(req: &DiskRequest) -> Result<DiskRun> {
    req.validate()?;
    let stops: Vec<_> = req.requests.iter().map(|&t| Stop::serve(t)).collect();
    record("fcfs", req, &stops)
}

/// Shortest seek time first: always the nearest pending request, ties going
/// to the earlier arrival.
pub fn sstf(req: &DiskRequest) -> Result<DiskRun> {
    req.validate()?;
    let mut pending = req.requests.clone();
    let mut head = req.head;
    let mut stops = Vec::with_capacity(pending.len());

    while let Some(pos) = pending
        .iter()
        .enumerate()
        .min_by_key(|&(i, &t)| (t.abs_diff(head), i))
        .map(|(i, _)| i)
    {
        let track = pending.remove(pos);
        stops.push(Stop::serve(track));
        head = track;
    }
    record("sstf", req, &stops)
}

/// Elevator: sweep to the disk edge in the configured direction, then
/// reverse. The edge stop is skipped when the sweep already ends there.
pub fn scan(req: &DiskRequest) -> Result<DiskRun> {
    req.validate()?;
    let (ahead, behind) = legs(req);
    let mut stops: Vec<_> = ahead.into_iter().map(Stop::serve).collect();

    let boundary = edge(req, req.direction);
    if last_position(req, &stops) != boundary {
        stops.push(Stop::Boundary(boundary));
    }
    stops.extend(behind.into_iter().map(Stop::serve));
    record("scan", req, &stops)
}

/// Like SCAN but reverses at the last request instead of the disk edge.
pub fn look(req: &DiskRequest) -> Result<DiskRun> {
    req.validate()?;
    let (ahead, behind) = legs(req);
    let stops: Vec<_> = ahead
        .into_iter()
        .chain(behind)
        .map(Stop::serve)
        .collect();
    record("look", req, &stops)
}

/// Circular SCAN: sweep to the edge, return to the opposite edge, and keep
/// serving in the same direction. The return counts toward head movement.
pub fn c_scan(req: &DiskRequest) -> Result<DiskRun> {
    req.validate()?;
    let (ahead, mut behind) = legs(req);
    let mut stops: Vec<_> = ahead.into_iter().map(Stop::serve).collect();

    let boundary = edge(req, req.direction);
    if last_position(req, &stops) != boundary {
        stops.push(Stop::Boundary(boundary));
    }
    if !behind.is_empty() {
        stops.push(Stop::Wrap(edge(req, req.direction.reversed())));
        // Continue in the original direction: farthest-behind first.
        behind.reverse();
        stops.extend(behind.into_iter().map(Stop::serve));
    }
    record("c_scan", req, &stops)
}

/// Circular LOOK: after the last request ahead, jump straight to the
/// farthest request behind and continue in the same direction.
pub fn c_look(req: &DiskRequest) -> Result<DiskRun> {
    req.validate()?;
    let (ahead, mut behind) = legs(req);
    let mut stops: Vec<_> = ahead.into_iter().map(Stop::serve).collect();

    behind.reverse();
    for (i, track) in behind.into_iter().enumerate() {
        stops.push(Stop::Serve { track, wrapped: i == 0 });
    }
    record("c_look", req, &stops)
}
