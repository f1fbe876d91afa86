//! Playback configuration.

use tracing::warn;

use crate::playback::PlaybackSpeed;

/// Default delay between auto-play frames at normal speed.
pub const DEFAULT_BASE_MS: u64 = 500;

/// Configuration for auto-play.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// Milliseconds per frame at 1x speed
    pub base_ms: u64,

    /// Initial speed
    pub speed: PlaybackSpeed,

    /// Wrap to the first frame after the last
    pub loop_enabled: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_ms: DEFAULT_BASE_MS,
            speed: PlaybackSpeed::Normal,
            loop_enabled: false,
        }
    }
}

impl PlaybackConfig {
    /// Create config from environment variables with sensible defaults.
    ///
    /// Reads `STEPWISE_BASE_MS`, `STEPWISE_SPEED` and `STEPWISE_LOOP`.
    /// Unparseable values are logged and replaced by the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let base_ms = match lookup("STEPWISE_BASE_MS").map(|v| v.trim().parse::<u64>()) {
            Some(Ok(ms)) if ms > 0 => ms,
            Some(_) => {
                warn!("Invalid STEPWISE_BASE_MS, using {}", defaults.base_ms);
                defaults.base_ms
            }
            None => defaults.base_ms,
        };

        let speed = match lookup("STEPWISE_SPEED").map(|v| v.parse::<PlaybackSpeed>()) {
            Some(Ok(speed)) => speed,
            Some(Err(e)) => {
                warn!("Invalid STEPWISE_SPEED ({}), using {:?}", e, defaults.speed);
                defaults.speed
            }
            None => defaults.speed,
        };

        let loop_enabled = match lookup("STEPWISE_LOOP").map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
            Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
            Some(v) => {
                warn!("Invalid STEPWISE_LOOP '{}', using {}", v, defaults.loop_enabled);
                defaults.loop_enabled
            }
            None => defaults.loop_enabled,
        };

        Self {
            base_ms,
            speed,
            loop_enabled,
        }
    }

    /// Delay between frames at the configured speed.
    pub fn ms_per_frame(&self) -> Option<u64> {
        self.speed.ms_per_frame(self.base_ms)
    }
}
