//! Session configuration.
//!
//! A round is parameterized by its image list and a handful of durations and
//! rewards. Defaults reproduce the classic board: 6 images (12 cards), a 60
//! second countdown, a 2 second preview, a 1 second mismatch reveal, and 5
//! points per matched pair.

use serde::{Deserialize, Serialize};

use super::card::ImageId;

/// Default countdown length in seconds.
pub const DEFAULT_ROUND_SECONDS: u32 = 60;
/// Default preview interval in milliseconds.
pub const DEFAULT_PREVIEW_MS: u64 = 2000;
/// Default mismatch reveal delay in milliseconds.
pub const DEFAULT_MISMATCH_DELAY_MS: u64 = 1000;
/// Countdown tick interval in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 1000;
/// Default points awarded per matched pair.
pub const DEFAULT_MATCH_REWARD: u32 = 5;
/// Default ambient track played once at round start.
pub const DEFAULT_AUDIO_CLIP: &str = "song.mp3";

/// Immutable parameters for a session.
///
/// Build via [`SessionConfigBuilder`]:
///
/// ```
/// use splitcards::core::SessionConfig;
///
/// let config = SessionConfig::builder(["a.png", "b.png", "c.png"])
///     .round_seconds(30)
///     .match_reward(10)
///     .build();
///
/// assert_eq!(config.deck_size(), 6);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Distinct revealed-face images; the deck holds two cards per entry.
    pub images: Vec<ImageId>,

    /// Countdown starting value in seconds.
    pub round_seconds: u32,

    /// How long all cards stay revealed before play begins.
    pub preview_ms: u64,

    /// How long a mismatched pair stays revealed before flipping back.
    pub mismatch_delay_ms: u64,

    /// Countdown tick interval.
    pub tick_ms: u64,

    /// Points added to the score per successful match.
    pub match_reward: u32,

    /// Ambient clip handed to the audio sink at round start.
    /// `None` disables the playback call entirely.
    pub audio_clip: Option<String>,

    /// Countdown value below which the snapshot reports urgency.
    pub urgency_threshold: u32,
}

impl SessionConfig {
    /// Start building a config from the distinct image list.
    #[must_use]
    pub fn builder<I, S>(images: I) -> SessionConfigBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<ImageId>,
    {
        SessionConfigBuilder::new(images)
    }

    /// Number of cards the deck builder will produce (2 per image).
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.images.len() * 2
    }
}

/// Builder for [`SessionConfig`].
pub struct SessionConfigBuilder {
    images: Vec<ImageId>,
    round_seconds: u32,
    preview_ms: u64,
    mismatch_delay_ms: u64,
    tick_ms: u64,
    match_reward: u32,
    audio_clip: Option<String>,
    urgency_threshold: u32,
}

impl SessionConfigBuilder {
    pub fn new<I, S>(images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ImageId>,
    {
        Self {
            images: images.into_iter().map(Into::into).collect(),
            round_seconds: DEFAULT_ROUND_SECONDS,
            preview_ms: DEFAULT_PREVIEW_MS,
            mismatch_delay_ms: DEFAULT_MISMATCH_DELAY_MS,
            tick_ms: DEFAULT_TICK_MS,
            match_reward: DEFAULT_MATCH_REWARD,
            audio_clip: Some(DEFAULT_AUDIO_CLIP.to_string()),
            urgency_threshold: 10,
        }
    }

    pub fn round_seconds(mut self, seconds: u32) -> Self {
        assert!(seconds > 0, "Round must last at least one second");
        self.round_seconds = seconds;
        self
    }

    pub fn preview_ms(mut self, ms: u64) -> Self {
        self.preview_ms = ms;
        self
    }

    pub fn mismatch_delay_ms(mut self, ms: u64) -> Self {
        self.mismatch_delay_ms = ms;
        self
    }

    pub fn tick_ms(mut self, ms: u64) -> Self {
        assert!(ms > 0, "Tick interval must be nonzero");
        self.tick_ms = ms;
        self
    }

    pub fn match_reward(mut self, points: u32) -> Self {
        self.match_reward = points;
        self
    }

    pub fn audio_clip(mut self, clip: Option<String>) -> Self {
        self.audio_clip = clip;
        self
    }

    pub fn urgency_threshold(mut self, seconds: u32) -> Self {
        self.urgency_threshold = seconds;
        self
    }

    /// Finish the build.
    ///
    /// Panics if the image list is empty - a deck with no pairs can never
    /// be won and is always a caller bug.
    #[must_use]
    pub fn build(self) -> SessionConfig {
        assert!(!self.images.is_empty(), "Need at least one image");
        SessionConfig {
            images: self.images,
            round_seconds: self.round_seconds,
            preview_ms: self.preview_ms,
            mismatch_delay_ms: self.mismatch_delay_ms,
            tick_ms: self.tick_ms,
            match_reward: self.match_reward,
            audio_clip: self.audio_clip,
            urgency_threshold: self.urgency_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_board() {
        let config = SessionConfig::builder(["a", "b", "c", "d", "e", "f"]).build();
        assert_eq!(config.deck_size(), 12);
        assert_eq!(config.round_seconds, 60);
        assert_eq!(config.preview_ms, 2000);
        assert_eq!(config.mismatch_delay_ms, 1000);
        assert_eq!(config.match_reward, 5);
        assert_eq!(config.audio_clip.as_deref(), Some("song.mp3"));
    }

    #[test]
    #[should_panic(expected = "at least one image")]
    fn test_empty_image_list_rejected() {
        let _ = SessionConfig::builder(Vec::<ImageId>::new()).build();
    }
}
