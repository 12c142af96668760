//! Observable session snapshots.
//!
//! The presentation layer is an external collaborator: it never touches
//! `SessionState` directly. After every mutation the engine re-emits a
//! [`SessionSnapshot`], a plain serializable value the host can render or
//! ship across a bridge.

use serde::Serialize;

use crate::core::{ImageId, Phase, SessionConfig, SessionState};

/// One card as the presentation layer sees it.
///
/// `pair_id` is deliberately absent: revealing it would let a renderer leak
/// the solution of face-down cards. The image reference is only meaningful
/// while the card is flipped or matched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardView {
    /// Revealed-face asset reference.
    pub image: ImageId,
    /// Face currently shown (player flip or preview).
    pub is_flipped: bool,
    /// Pair resolved; stays revealed for the rest of the round.
    pub is_matched: bool,
}

/// Observable state of the session, re-emitted after every mutation.
#[derive(Clone, Debug, Serialize)]
pub struct SessionSnapshot {
    /// Seconds remaining on the countdown.
    pub countdown_seconds: u32,

    /// Progress bar value in `0.0..=100.0`, derived from the countdown.
    pub progress_percent: f32,

    /// Points earned this round.
    pub score: u32,

    /// Lifecycle phase.
    pub phase: Phase,

    /// Countdown is below the urgency threshold (the classic red-timer cue).
    pub is_urgent: bool,

    /// All cards in board order.
    pub cards: Vec<CardView>,
}

impl SessionSnapshot {
    /// Project the owned state into its observable form.
    #[must_use]
    pub fn capture(state: &SessionState, config: &SessionConfig) -> Self {
        Self {
            countdown_seconds: state.countdown_seconds,
            progress_percent: state.progress_percent(config.round_seconds),
            score: state.score,
            phase: state.phase,
            is_urgent: state.phase.countdown_active()
                && state.countdown_seconds < config.urgency_threshold,
            cards: state
                .deck
                .iter()
                .map(|card| CardView {
                    image: card.image.clone(),
                    is_flipped: card.is_flipped,
                    is_matched: card.is_matched,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, PairId, SessionRng};
    use crate::deck::build_deck_unchecked;
    use im::Vector;

    #[test]
    fn test_capture_projects_state() {
        let config = SessionConfig::builder(["x", "y"]).build();
        let mut rng = SessionRng::new(5);
        let deck = build_deck_unchecked(&config, &mut rng);
        let state = SessionState::begin_preview(deck, config.round_seconds);

        let snap = SessionSnapshot::capture(&state, &config);
        assert_eq!(snap.cards.len(), 4);
        assert_eq!(snap.countdown_seconds, 60);
        assert!((snap.progress_percent - 100.0).abs() < f32::EPSILON);
        assert!(!snap.is_urgent);
        assert!(snap.cards.iter().all(|c| c.is_flipped));
    }

    #[test]
    fn test_urgency_flag_uses_threshold() {
        let config = SessionConfig::builder(["x"]).build();
        let deck: Vector<Card> = [Card::new(PairId::new(0), "x".into())].into_iter().collect();
        let mut state = SessionState::begin_preview(deck, config.round_seconds);
        state.end_preview();

        state.countdown_seconds = 10;
        assert!(!SessionSnapshot::capture(&state, &config).is_urgent);

        state.countdown_seconds = 9;
        assert!(SessionSnapshot::capture(&state, &config).is_urgent);
    }
}
