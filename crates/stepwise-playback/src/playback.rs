//! Playback controls for a recorded trace.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stepwise_trace::{Frame, FrameSource, Result, TraceError};

use crate::config::PlaybackConfig;

/// How fast auto-play advances relative to the base frame delay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackSpeed {
    /// Timer halted; manual stepping still works.
    Paused,
    QuarterSpeed,
    HalfSpeed,
    #[default]
    Normal,
    Double,
    Quadruple,
    TenX,
    /// No delay between ticks.
    Maximum,
}

impl PlaybackSpeed {
    /// Factor applied to the frame rate; `Maximum` is infinite.
    pub fn multiplier(&self) -> f64 {
        match self {
            PlaybackSpeed::Paused => 0.0,
            PlaybackSpeed::QuarterSpeed => 0.25,
            PlaybackSpeed::HalfSpeed => 0.5,
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::Double => 2.0,
            PlaybackSpeed::Quadruple => 4.0,
            PlaybackSpeed::TenX => 10.0,
            PlaybackSpeed::Maximum => f64::INFINITY,
        }
    }

    /// Delay between ticks, or `None` while paused.
    pub fn ms_per_frame(&self, base_ms: u64) -> Option<u64> {
        match self {
            PlaybackSpeed::Paused => None,
            PlaybackSpeed::Maximum => Some(0),
            speed => Some((base_ms as f64 / speed.multiplier()) as u64),
        }
    }
}

impl FromStr for PlaybackSpeed {
    type Err = TraceError;

    /// Accepts a multiplier (`0.5`, `2`, `10x`) or a name (`half`, `max`).
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        let key = normalized
            .strip_suffix('x')
            .filter(|n| n.parse::<f64>().is_ok())
            .unwrap_or(&normalized);
        let speed = match key {
            "0" | "paused" | "pause" => PlaybackSpeed::Paused,
            "0.25" | "quarter" => PlaybackSpeed::QuarterSpeed,
            "0.5" | "half" => PlaybackSpeed::HalfSpeed,
            "1" | "1.0" | "normal" => PlaybackSpeed::Normal,
            "2" | "double" => PlaybackSpeed::Double,
            "4" | "quadruple" => PlaybackSpeed::Quadruple,
            "10" | "ten" => PlaybackSpeed::TenX,
            "max" | "maximum" => PlaybackSpeed::Maximum,
            _ => {
                return Err(TraceError::InvalidInput(format!(
                    "'{}' is not a playback speed",
                    s
                )))
            }
        };
        Ok(speed)
    }
}

/// Where the controller is in its play/pause lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Freshly loaded or explicitly stopped.
    Stopped,
    /// The timer advances the cursor.
    Playing,
    Paused,
    /// Parked on the last frame without looping.
    Finished,
}

/// Playback controller over any [`FrameSource`].
///
/// The cursor always points at an existing frame: `0 <= index < len`.
/// Manual stepping stops at both ends; only [`Playback::tick`] wraps, and
/// only when looping is enabled.
#[derive(Debug)]
pub struct Playback<S> {
    source: S,
    current_frame: usize,
    state: PlaybackState,
    speed: PlaybackSpeed,
    loop_enabled: bool,
}

impl<S: FrameSource> Playback<S> {
    /// Create a new playback controller at frame 0, stopped.
    pub fn new(source: S) -> Result<Self> {
        if source.frame_count() == 0 {
            return Err(TraceError::invalid("cannot play back an empty frame source"));
        }
        Ok(Self {
            source,
            current_frame: 0,
            state: PlaybackState::Stopped,
            speed: PlaybackSpeed::Normal,
            loop_enabled: false,
        })
    }

    /// Create a controller with speed and looping taken from `config`.
    pub fn with_config(source: S, config: &PlaybackConfig) -> Result<Self> {
        let mut playback = Self::new(source)?;
        playback.speed = config.speed;
        playback.loop_enabled = config.loop_enabled;
        Ok(playback)
    }

    /// Cursor position, always a valid frame index.
    pub fn current_index(&self) -> usize {
        self.current_frame
    }

    /// The frame under the cursor.
    pub fn current_frame(&self) -> Option<&Frame<S::Payload>> {
        self.source.frame_at(self.current_frame)
    }

    pub fn total_frames(&self) -> usize {
        self.source.frame_count()
    }

    fn last_index(&self) -> usize {
        self.total_frames().saturating_sub(1)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Move the cursor, clamping to the last frame.
    pub fn seek(&mut self, frame: usize) {
        self.current_frame = frame.min(self.last_index());
        if self.state == PlaybackState::Finished && self.current_frame < self.last_index() {
            self.state = PlaybackState::Paused;
        }
    }

    /// Start playback from the cursor.
    ///
    /// Does not rewind: at the last frame without looping (or on a
    /// single-frame source) playback finishes immediately.
    pub fn play(&mut self) {
        let at_end = self.current_frame >= self.last_index();
        if self.total_frames() <= 1 || (at_end && !self.loop_enabled) {
            self.state = PlaybackState::Finished;
            return;
        }
        if self.speed == PlaybackSpeed::Paused {
            self.speed = PlaybackSpeed::Normal;
        }
        self.state = PlaybackState::Playing;
    }

    /// Pause playback.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Play if not playing, pause otherwise. The cursor never moves.
    pub fn toggle_play(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Halt and rewind to frame 0.
    pub fn stop(&mut self) {
        self.current_frame = 0;
        self.state = PlaybackState::Stopped;
    }

    /// Rewind to the first frame and play.
    pub fn replay(&mut self) {
        self.current_frame = 0;
        self.play();
    }

    /// Change speed. Setting `Paused` also pauses playback.
    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
        if matches!(speed, PlaybackSpeed::Paused) {
            self.pause();
        }
    }

    /// When enabled, [`Playback::tick`] wraps from the last frame to 0.
    pub fn set_loop(&mut self, enabled: bool) {
        self.loop_enabled = enabled;
    }

    /// Step forward one frame. No-op on the last frame.
    pub fn step_forward(&mut self) -> Option<&Frame<S::Payload>> {
        if self.current_frame >= self.last_index() {
            return None;
        }
        self.current_frame += 1;
        self.current_frame()
    }

    /// Step backward one frame. No-op on the first frame.
    pub fn step_backward(&mut self) -> Option<&Frame<S::Payload>> {
        if self.current_frame == 0 {
            return None;
        }
        self.current_frame -= 1;
        if self.state == PlaybackState::Finished {
            self.state = PlaybackState::Paused;
        }
        self.current_frame()
    }

    /// Timer hook: advance one frame while playing.
    ///
    /// Reaching the last frame finishes playback unless looping, in which
    /// case the cursor wraps to 0. Returns whether playback continues.
    pub fn tick(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        if self.current_frame < self.last_index() {
            self.current_frame += 1;
        } else if self.loop_enabled {
            self.current_frame = 0;
        }
        if self.current_frame == self.last_index() && !self.loop_enabled {
            self.state = PlaybackState::Finished;
        }
        tracing::trace!(frame = self.current_frame, state = ?self.state, "playback tick");
        self.is_playing()
    }

    /// Calculate progress as a fraction (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        match self.last_index() {
            0 => 1.0,
            last => self.current_frame as f64 / last as f64,
        }
    }

    /// Delay before the next tick at the current speed.
    pub fn ms_per_frame(&self, base_ms: u64) -> Option<u64> {
        self.speed.ms_per_frame(base_ms)
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus::from(self)
    }
}

/// Payload-independent snapshot of the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub current_frame: usize,
    pub total_frames: usize,
    pub state: PlaybackState,
    pub speed: PlaybackSpeed,
    pub progress: f64,
    pub loop_enabled: bool,
    /// Title of the frame under the cursor.
    pub title: String,
}

impl<S: FrameSource> From<&Playback<S>> for PlaybackStatus {
    fn from(playback: &Playback<S>) -> Self {
        Self {
            current_frame: playback.current_frame,
            total_frames: playback.total_frames(),
            state: playback.state,
            speed: playback.speed,
            progress: playback.progress(),
            loop_enabled: playback.loop_enabled,
            title: playback
                .current_frame()
                .map(|f| f.title.clone())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_trace::{Trace, TraceBuilder};

    fn make_trace(count: usize) -> Trace<usize> {
        let mut builder = TraceBuilder::new("count");
        for i in 0..count {
            builder.push(format!("Frame {}", i), "", i);
        }
        builder.finish().unwrap()
    }

    fn playback(count: usize) -> Playback<Trace<usize>> {
        Playback::new(make_trace(count)).unwrap()
    }

    #[test]
    fn playback_starts_at_zero() {
        let playback = playback(10);
        assert_eq!(playback.current_index(), 0);
        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert_eq!(playback.current_frame().map(|f| f.payload), Some(0));
    }

    #[test]
    fn seek_clamps_to_last_frame() {
        let mut playback = playback(5);
        playback.seek(10);
        assert_eq!(playback.current_index(), 4);
        playback.seek(2);
        assert_eq!(playback.current_index(), 2);
    }

    #[test]
    fn step_backward_at_start_is_noop() {
        let mut playback = playback(5);
        assert!(playback.step_backward().is_none());
        assert_eq!(playback.current_index(), 0);
    }

    #[test]
    fn step_forward_stops_at_end() {
        let mut playback = playback(3);
        assert_eq!(playback.step_forward().map(|f| f.payload), Some(1));
        assert_eq!(playback.step_forward().map(|f| f.payload), Some(2));
        assert!(playback.step_forward().is_none());
        assert_eq!(playback.current_index(), 2);
    }

    #[test]
    fn toggle_twice_returns_to_not_playing() {
        let mut playback = playback(5);
        playback.toggle_play();
        assert!(playback.is_playing());
        playback.toggle_play();
        assert!(!playback.is_playing());
        assert_eq!(playback.current_index(), 0);
    }

    #[test]
    fn tick_advances_and_finishes() {
        let mut playback = playback(3);
        playback.play();
        assert!(playback.tick());
        assert_eq!(playback.current_index(), 1);
        assert!(!playback.tick());
        assert_eq!(playback.current_index(), 2);
        assert_eq!(playback.state(), PlaybackState::Finished);
        assert!(!playback.tick());
        assert_eq!(playback.current_index(), 2);
    }

    #[test]
    fn tick_is_ignored_when_not_playing() {
        let mut playback = playback(3);
        assert!(!playback.tick());
        assert_eq!(playback.current_index(), 0);
    }

    #[test]
    fn loop_wraps_around() {
        let mut playback = playback(3);
        playback.set_loop(true);
        playback.play();
        playback.tick();
        playback.tick();
        assert_eq!(playback.current_index(), 2);
        assert!(playback.tick());
        assert_eq!(playback.current_index(), 0);
        assert_eq!(playback.state(), PlaybackState::Playing);
    }

    #[test]
    fn play_at_end_does_not_rewind() {
        let mut playback = playback(4);
        playback.seek(3);
        playback.play();
        assert_eq!(playback.state(), PlaybackState::Finished);
        assert_eq!(playback.current_index(), 3);

        playback.replay();
        assert_eq!(playback.current_index(), 0);
        assert!(playback.is_playing());
    }

    #[test]
    fn single_frame_never_plays() {
        let mut playback = playback(1);
        playback.toggle_play();
        assert!(!playback.is_playing());
        assert_eq!(playback.progress(), 1.0);
    }

    #[test]
    fn empty_source_is_rejected() {
        struct Empty;
        impl FrameSource for Empty {
            type Payload = ();
            fn frame_count(&self) -> usize {
                0
            }
            fn frame_at(&self, _: usize) -> Option<&Frame<()>> {
                None
            }
        }
        assert!(Playback::new(Empty).is_err());
    }

    #[test]
    fn paused_speed_pauses() {
        let mut playback = playback(5);
        playback.play();
        playback.set_speed(PlaybackSpeed::Paused);
        assert_eq!(playback.state(), PlaybackState::Paused);
        assert_eq!(playback.ms_per_frame(500), None);
        playback.play();
        assert_eq!(playback.speed(), PlaybackSpeed::Normal);
    }

    #[test]
    fn progress_calculation() {
        let mut playback = playback(5);
        assert_eq!(playback.progress(), 0.0);
        playback.seek(2);
        assert_eq!(playback.progress(), 0.5);
        playback.seek(4);
        assert_eq!(playback.progress(), 1.0);
    }

    #[test]
    fn speed_multipliers() {
        assert_eq!(PlaybackSpeed::Paused.multiplier(), 0.0);
        assert_eq!(PlaybackSpeed::Normal.multiplier(), 1.0);
        assert_eq!(PlaybackSpeed::Double.ms_per_frame(500), Some(250));
        assert_eq!(PlaybackSpeed::QuarterSpeed.ms_per_frame(500), Some(2000));
        assert!(PlaybackSpeed::Maximum.multiplier().is_infinite());
    }

    #[test]
    fn speed_parses_numbers_and_names() {
        assert_eq!("2x".parse::<PlaybackSpeed>().unwrap(), PlaybackSpeed::Double);
        assert_eq!("0.25".parse::<PlaybackSpeed>().unwrap(), PlaybackSpeed::QuarterSpeed);
        assert_eq!(" MAX ".parse::<PlaybackSpeed>().unwrap(), PlaybackSpeed::Maximum);
        assert!("3".parse::<PlaybackSpeed>().is_err());
    }

    #[test]
    fn status_conversion() {
        let mut playback = playback(10);
        playback.seek(3);
        playback.set_speed(PlaybackSpeed::Double);

        let status: PlaybackStatus = (&playback).into();
        assert_eq!(status.current_frame, 3);
        assert_eq!(status.total_frames, 10);
        assert_eq!(status.speed, PlaybackSpeed::Double);
        assert_eq!(status.title, "Frame 3");

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["state"], "stopped");
    }
}
