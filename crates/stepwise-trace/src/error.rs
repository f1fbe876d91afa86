//! Error types for stepwise tracers.

use thiserror::Error;

/// Result type for trace construction.
pub type Result<T> = std::result::Result<T, TraceError>;

/// Errors that can occur while building a trace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// Parameters are malformed or outside the algorithm's domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A node id was referenced that the graph does not contain.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// No tracer is registered under this id.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// A tracer finished without recording a single frame.
    #[error("{algorithm} produced an empty trace")]
    EmptyTrace { algorithm: String },
}

impl TraceError {
    /// Shorthand for an [`TraceError::InvalidInput`] with a formatted reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        TraceError::InvalidInput(reason.into())
    }

    /// Whether this error was caused by the caller's parameters.
    ///
    /// `EmptyTrace` is the only internal failure; everything else is
    /// rejected before a single frame is built.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, TraceError::EmptyTrace { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_are_classified() {
        assert!(TraceError::invalid("bad").is_input_error());
        assert!(TraceError::UnknownNode("Z".into()).is_input_error());
        assert!(TraceError::UnknownAlgorithm("bogo".into()).is_input_error());
        assert!(!TraceError::EmptyTrace { algorithm: "x".into() }.is_input_error());
    }

    #[test]
    fn messages_name_the_cause() {
        let err = TraceError::UnknownNode("Q".into());
        assert_eq!(err.to_string(), "unknown node: Q");

        let err = TraceError::EmptyTrace { algorithm: "bfs".into() };
        assert_eq!(err.to_string(), "bfs produced an empty trace");
    }
}
