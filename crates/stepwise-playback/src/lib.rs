//! Stepwise Playback
//!
//! A cursor over any [`FrameSource`](stepwise_trace::FrameSource): step
//! forward and back, seek, and timed auto-play.
//!
//! ## Example
//!
//! ```
//! use stepwise_playback::Playback;
//! use stepwise_trace::TraceBuilder;
//!
//! let mut builder = TraceBuilder::new("demo");
//! for i in 0..5 {
//!     builder.push(format!("Step {}", i), "", i);
//! }
//! let mut playback = Playback::new(builder.finish().unwrap()).unwrap();
//!
//! playback.seek(10);
//! assert_eq!(playback.current_index(), 4);
//! playback.seek(0);
//! playback.step_backward();
//! assert_eq!(playback.current_index(), 0);
//! ```

pub mod autoplay;
pub mod config;
pub mod playback;

pub use autoplay::{AutoPlay, SharedPlayback};
pub use config::{PlaybackConfig, DEFAULT_BASE_MS};
pub use playback::{Playback, PlaybackSpeed, PlaybackState, PlaybackStatus};
