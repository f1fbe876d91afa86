//! Frames, traces and the builder that records them.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TraceError};

/// One immutable snapshot of algorithm state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame<P> {
    /// Short heading, e.g. "Compare 3 and 1".
    pub title: String,
    /// Longer human-readable explanation of the step.
    pub description: String,
    /// Algorithm-specific state, owned by this frame alone.
    pub payload: P,
}

impl<P> Frame<P> {
    /// Create a frame.
    pub fn new(title: impl Into<String>, description: impl Into<String>, payload: P) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            payload,
        }
    }
}

/// Read access to an indexable sequence of frames.
///
/// The playback controller only needs these two capabilities, so anything
/// that can count and index frames can be replayed.
pub trait FrameSource {
    /// Payload carried by each frame.
    type Payload;

    /// Number of frames available.
    fn frame_count(&self) -> usize;

    /// Frame at `index`, if in range.
    fn frame_at(&self, index: usize) -> Option<&Frame<Self::Payload>>;
}

/// The complete, ordered recording of one algorithm run.
///
/// A trace always holds at least one frame; [`TraceBuilder::finish`] refuses
/// to produce an empty one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace<P> {
    algorithm: String,
    frames: Vec<Frame<P>>,
}

impl<P> Trace<P> {
    /// Name of the algorithm that produced this trace.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`.
    pub fn get(&self, index: usize) -> Option<&Frame<P>> {
        self.frames.get(index)
    }

    /// All frames in order.
    pub fn frames(&self) -> &[Frame<P>] {
        &self.frames
    }

    /// Iterate over frames in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Frame<P>> {
        self.frames.iter()
    }

    /// The starting-state frame.
    pub fn first(&self) -> &Frame<P> {
        &self.frames[0]
    }

    /// The final frame.
    pub fn last(&self) -> &Frame<P> {
        &self.frames[self.frames.len() - 1]
    }

    /// Consume the trace and return its frames.
    pub fn into_frames(self) -> Vec<Frame<P>> {
        self.frames
    }

    /// Convert every payload, keeping titles and descriptions.
    pub fn map<Q>(self, mut f: impl FnMut(P) -> Q) -> Trace<Q> {
        Trace {
            algorithm: self.algorithm,
            frames: self
                .frames
                .into_iter()
                .map(|frame| Frame {
                    title: frame.title,
                    description: frame.description,
                    payload: f(frame.payload),
                })
                .collect(),
        }
    }

    /// Fallible variant of [`Trace::map`]; stops at the first error.
    pub fn try_map<Q, E>(
        self,
        mut f: impl FnMut(P) -> std::result::Result<Q, E>,
    ) -> std::result::Result<Trace<Q>, E> {
        let mut frames = Vec::with_capacity(self.frames.len());
        for frame in self.frames {
            frames.push(Frame {
                title: frame.title,
                description: frame.description,
                payload: f(frame.payload)?,
            });
        }
        Ok(Trace {
            algorithm: self.algorithm,
            frames,
        })
    }
}

impl<P> FrameSource for Trace<P> {
    type Payload = P;

    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn frame_at(&self, index: usize) -> Option<&Frame<P>> {
        self.frames.get(index)
    }
}

impl<'a, P> IntoIterator for &'a Trace<P> {
    type Item = &'a Frame<P>;
    type IntoIter = std::slice::Iter<'a, Frame<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Accumulates frames for a single algorithm run.
#[derive(Debug)]
pub struct TraceBuilder<P> {
    algorithm: String,
    frames: Vec<Frame<P>>,
}

impl<P> TraceBuilder<P> {
    /// Start recording a run of `algorithm`.
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            frames: Vec::new(),
        }
    }

    /// Record a frame that takes ownership of `payload`.
    pub fn push(&mut self, title: impl Into<String>, description: impl Into<String>, payload: P) {
        self.frames.push(Frame::new(title, description, payload));
    }

    /// Number of frames recorded so far.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Payload of the most recent frame.
    pub fn last_payload(&self) -> Option<&P> {
        self.frames.last().map(|f| &f.payload)
    }

    /// Finalize the trace.
    ///
    /// Fails with [`TraceError::EmptyTrace`] when no frame was recorded,
    /// which is always a bug in the calling tracer.
    pub fn finish(self) -> Result<Trace<P>> {
        if self.frames.is_empty() {
            tracing::error!(algorithm = %self.algorithm, "tracer recorded no frames");
            return Err(TraceError::EmptyTrace {
                algorithm: self.algorithm,
            });
        }
        tracing::debug!(
            algorithm = %self.algorithm,
            frames = self.frames.len(),
            "trace finished"
        );
        Ok(Trace {
            algorithm: self.algorithm,
            frames: self.frames,
        })
    }
}

impl<P: Clone> TraceBuilder<P> {
    /// Record a deep copy of `state`.
    ///
    /// Tracers keep mutating their working state after this call; the frame
    /// must not observe those later changes.
    pub fn snapshot(&mut self, title: impl Into<String>, description: impl Into<String>, state: &P) {
        self.push(title, description, state.clone());
    }
}
