//! Timed auto-play.

use std::sync::Arc;
use std::time::Duration;

use stepwise_trace::FrameSource;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::playback::Playback;

/// Shared controller handle driven by [`AutoPlay`].
pub type SharedPlayback<S> = Arc<Mutex<Playback<S>>>;

/// A background task that ticks a shared [`Playback`].
///
/// The task sleeps for the controller's current frame delay (so speed changes
/// apply from the next tick), then calls [`Playback::tick`] and exits once
/// playback stops. Dropping an `AutoPlay` aborts the task; [`AutoPlay::cancel`]
/// additionally waits until the task is gone.
#[derive(Debug, Default)]
pub struct AutoPlay {
    handle: Option<JoinHandle<()>>,
}

impl AutoPlay {
    /// Start playback on `playback` and spawn the ticking task.
    ///
    /// If playback cannot start (last frame reached, single frame, or a paused
    /// speed) no task is spawned.
    pub async fn start<S>(playback: SharedPlayback<S>, base_ms: u64) -> Self
    where
        S: FrameSource + Send + 'static,
    {
        {
            let mut pb = playback.lock().await;
            pb.play();
            if !pb.is_playing() {
                debug!(state = ?pb.state(), "auto-play not started");
                return Self::default();
            }
        }

        let handle = tokio::spawn(async move {
            loop {
                let delay = match playback.lock().await.ms_per_frame(base_ms) {
                    Some(ms) => Duration::from_millis(ms.max(1)),
                    None => break,
                };
                tokio::time::sleep(delay).await;
                if !playback.lock().await.tick() {
                    break;
                }
            }
            debug!("auto-play finished");
        });
        Self {
            handle: Some(handle),
        }
    }

    /// Whether the ticking task is still alive.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the task and wait for it to exit. Safe to call repeatedly.
    pub async fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            // A cancelled JoinError is the expected outcome.
            let _ = handle.await;
            debug!("auto-play cancelled");
        }
    }

    /// Wait for the task to finish on its own.
    pub async fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for AutoPlay {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
