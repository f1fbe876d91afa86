//! A single viewer's playback session.
//!
//! Switching algorithms cancels the running auto-play task before the new
//! trace is built, and every load gets its own shared playback, so a timer
//! left over from the previous trace can never move the new cursor.

use std::sync::Arc;

use serde_json::Value;
use stepwise_playback::{AutoPlay, Playback, PlaybackConfig, PlaybackSpeed, PlaybackStatus, SharedPlayback};
use stepwise_trace::{Frame, Trace, TraceError};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::algorithm::AlgorithmId;
use crate::registry::build_trace;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error("Payload serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No algorithm loaded")]
    NothingLoaded,
}

pub type Result<T> = std::result::Result<T, SessionError>;

struct Loaded {
    algorithm: AlgorithmId,
    playback: SharedPlayback<Trace<Value>>,
}

/// Owns the current trace, its cursor and the auto-play timer.
pub struct Session {
    config: PlaybackConfig,
    current: Option<Loaded>,
    autoplay: AutoPlay,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

impl Session {
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            current: None,
            autoplay: AutoPlay::default(),
        }
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Algorithm currently loaded, if any.
    pub fn algorithm(&self) -> Option<AlgorithmId> {
        self.current.as_ref().map(|loaded| loaded.algorithm)
    }

    /// Replace the loaded trace.
    ///
    /// The new cursor starts at frame 0, stopped. If the build fails the
    /// previous trace stays loaded, paused where it was.
    pub async fn load(&mut self, algorithm: AlgorithmId, params: &Value) -> Result<PlaybackStatus> {
        self.autoplay.cancel().await;

        let playback = match self.build(algorithm, params) {
            Ok(playback) => playback,
            Err(e) => {
                warn!(%algorithm, error = %e, "load failed, keeping previous trace");
                if let Some(loaded) = &self.current {
                    loaded.playback.lock().await.pause();
                }
                return Err(e);
            }
        };

        let status = playback.status();
        info!(%algorithm, frames = status.total_frames, "trace loaded");
        self.current = Some(Loaded {
            algorithm,
            playback: Arc::new(Mutex::new(playback)),
        });
        Ok(status)
    }

    fn build(&self, algorithm: AlgorithmId, params: &Value) -> Result<Playback<Trace<Value>>> {
        let json = build_trace(algorithm, params)?.into_json()?;
        debug!(%algorithm, frames = json.len(), "trace erased to json");
        Ok(Playback::with_config(json, &self.config)?)
    }

    fn loaded(&self) -> Result<&Loaded> {
        self.current.as_ref().ok_or(SessionError::NothingLoaded)
    }

    /// Start auto-play from the cursor.
    pub async fn play(&mut self) -> Result<PlaybackStatus> {
        self.autoplay.cancel().await;
        let playback = self.loaded()?.playback.clone();
        self.autoplay = AutoPlay::start(playback.clone(), self.config.base_ms).await;
        let status = playback.lock().await.status();
        Ok(status)
    }

    pub async fn pause(&mut self) -> Result<PlaybackStatus> {
        self.autoplay.cancel().await;
        self.with_playback(|pb| pb.pause()).await
    }

    pub async fn toggle_play(&mut self) -> Result<PlaybackStatus> {
        if self.is_playing().await {
            self.pause().await
        } else {
            self.play().await
        }
    }

    /// Rewind to frame 0 and auto-play.
    pub async fn replay(&mut self) -> Result<PlaybackStatus> {
        self.autoplay.cancel().await;
        self.with_playback(|pb| pb.stop()).await?;
        self.play().await
    }

    pub async fn step_forward(&mut self) -> Result<PlaybackStatus> {
        self.autoplay.cancel().await;
        self.with_playback(|pb| {
            pb.pause();
            pb.step_forward();
        })
        .await
    }

    pub async fn step_backward(&mut self) -> Result<PlaybackStatus> {
        self.autoplay.cancel().await;
        self.with_playback(|pb| {
            pb.pause();
            pb.step_backward();
        })
        .await
    }

    pub async fn seek(&mut self, frame: usize) -> Result<PlaybackStatus> {
        self.autoplay.cancel().await;
        self.with_playback(|pb| {
            pb.pause();
            pb.seek(frame);
        })
        .await
    }

    /// Change speed; a running timer picks it up on its next delay.
    pub async fn set_speed(&mut self, speed: PlaybackSpeed) -> Result<PlaybackStatus> {
        self.config.speed = speed;
        if speed == PlaybackSpeed::Paused {
            self.autoplay.cancel().await;
        }
        self.with_playback(|pb| pb.set_speed(speed)).await
    }

    pub async fn set_loop(&mut self, enabled: bool) -> Result<PlaybackStatus> {
        self.config.loop_enabled = enabled;
        self.with_playback(|pb| pb.set_loop(enabled)).await
    }

    pub async fn status(&self) -> Result<PlaybackStatus> {
        let loaded = self.loaded()?;
        let status = loaded.playback.lock().await.status();
        Ok(status)
    }

    pub async fn is_playing(&self) -> bool {
        match &self.current {
            Some(loaded) => loaded.playback.lock().await.is_playing(),
            None => false,
        }
    }

    /// Copy of the frame under the cursor.
    pub async fn current_frame(&self) -> Result<Frame<Value>> {
        let loaded = self.loaded()?;
        let pb = loaded.playback.lock().await;
        pb.current_frame()
            .cloned()
            .ok_or(SessionError::NothingLoaded)
    }

    /// Copy of any frame of the loaded trace.
    pub async fn frame_at(&self, index: usize) -> Result<Option<Frame<Value>>> {
        let loaded = self.loaded()?;
        let pb = loaded.playback.lock().await;
        Ok(pb.source().get(index).cloned())
    }

    /// Wait until auto-play ends on its own.
    pub async fn wait(&mut self) {
        self.autoplay.join().await;
    }

    async fn with_playback(
        &self,
        f: impl FnOnce(&mut Playback<Trace<Value>>),
    ) -> Result<PlaybackStatus> {
        let loaded = self.loaded()?;
        let mut pb = loaded.playback.lock().await;
        f(&mut *pb);
        Ok(pb.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use stepwise_playback::PlaybackState;

    fn fast() -> PlaybackConfig {
        PlaybackConfig {
            base_ms: 100,
            ..PlaybackConfig::default()
        }
    }

    #[tokio::test]
    async fn nothing_loaded() {
        let mut session = Session::default();
        assert!(matches!(session.play().await, Err(SessionError::NothingLoaded)));
        assert!(matches!(session.status().await, Err(SessionError::NothingLoaded)));
        assert!(!session.is_playing().await);
    }

    #[tokio::test]
    async fn load_starts_stopped_at_zero() {
        let mut session = Session::new(fast());
        let status = session.load(AlgorithmId::Factorial, &json!({ "n": 3 })).await.unwrap();
        assert_eq!(status.current_frame, 0);
        assert_eq!(status.state, PlaybackState::Stopped);
        assert_eq!(session.algorithm(), Some(AlgorithmId::Factorial));
        let frame = session.current_frame().await.unwrap();
        assert_eq!(frame.payload["stack"], json!([]));
    }

    #[tokio::test(start_paused = true)]
    async fn auto_play_runs_to_the_end() {
        let mut session = Session::new(fast());
        let status = session.load(AlgorithmId::BubbleSort, &json!({ "array": [2, 1] })).await.unwrap();
        let total = status.total_frames;

        session.play().await.unwrap();
        session.wait().await;

        let status = session.status().await.unwrap();
        assert_eq!(status.current_frame, total - 1);
        assert_eq!(status.state, PlaybackState::Finished);
    }

    #[tokio::test(start_paused = true)]
    async fn switching_cancels_the_old_timer() {
        let mut session = Session::new(fast());
        session.load(AlgorithmId::QuickSort, &Value::Null).await.unwrap();
        session.play().await.unwrap();
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(session.status().await.unwrap().current_frame >= 2);

        session.load(AlgorithmId::Stack, &Value::Null).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1_000)).await;

        let status = session.status().await.unwrap();
        assert_eq!(status.current_frame, 0);
        assert_eq!(status.state, PlaybackState::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_step_pauses_auto_play() {
        let mut session = Session::new(fast());
        session.load(AlgorithmId::Fcfs, &Value::Null).await.unwrap();
        session.play().await.unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;

        let status = session.step_forward().await.unwrap();
        assert_eq!(status.state, PlaybackState::Paused);
        let at = status.current_frame;

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert_eq!(session.status().await.unwrap().current_frame, at);
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_trace() {
        let mut session = Session::new(fast());
        session.load(AlgorithmId::Bst, &Value::Null).await.unwrap();
        session.seek(2).await.unwrap();

        let err = session
            .load(AlgorithmId::Factorial, &json!({ "n": 99 }))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Trace(ref e) if e.is_input_error()));
        assert_eq!(session.algorithm(), Some(AlgorithmId::Bst));
        assert_eq!(session.status().await.unwrap().current_frame, 2);
    }

    #[tokio::test]
    async fn seek_clamps_and_frame_at_reads_any_frame() {
        let mut session = Session::new(fast());
        let total = session.load(AlgorithmId::Encapsulation, &Value::Null).await.unwrap().total_frames;
        let status = session.seek(usize::MAX).await.unwrap();
        assert_eq!(status.current_frame, total - 1);
        assert!(session.frame_at(0).await.unwrap().is_some());
        assert!(session.frame_at(total).await.unwrap().is_none());
    }
}
