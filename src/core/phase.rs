//! Session lifecycle phases.
//!
//! Transitions are monotonic within a round:
//!
//! ```text
//! NotStarted -> Previewing -> Playing -> { Won | Lost }
//! ```
//!
//! The only way back is an explicit restart, which discards the whole
//! session state and begins a fresh round.

use serde::{Deserialize, Serialize};

/// Where the session is in its round lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No round running; the deck has not been built.
    #[default]
    NotStarted,
    /// All cards shown face-up for the fixed preview interval.
    Previewing,
    /// Player input is live.
    Playing,
    /// Every pair matched before the countdown ran out.
    Won,
    /// Countdown reached zero with at least one unmatched card.
    Lost,
}

impl Phase {
    /// True for `Won` and `Lost`.
    ///
    /// Terminal phases freeze all mutation except restart.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }

    /// True while card clicks are consequential.
    ///
    /// Clicks during the preview (or before start) are ignored rather than
    /// queued - the engine does not rely on the UI to suppress them.
    #[must_use]
    pub const fn accepts_clicks(self) -> bool {
        matches!(self, Phase::Playing)
    }

    /// True while the countdown is running.
    #[must_use]
    pub const fn countdown_active(self) -> bool {
        matches!(self, Phase::Previewing | Phase::Playing)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::NotStarted => "not-started",
            Phase::Previewing => "previewing",
            Phase::Playing => "playing",
            Phase::Won => "won",
            Phase::Lost => "lost",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_phases() {
        assert!(Phase::Won.is_terminal());
        assert!(Phase::Lost.is_terminal());
        assert!(!Phase::Playing.is_terminal());
        assert!(!Phase::Previewing.is_terminal());
        assert!(!Phase::NotStarted.is_terminal());
    }

    #[test]
    fn test_only_playing_accepts_clicks() {
        assert!(Phase::Playing.accepts_clicks());
        assert!(!Phase::Previewing.accepts_clicks());
        assert!(!Phase::NotStarted.accepts_clicks());
        assert!(!Phase::Won.accepts_clicks());
    }
}
