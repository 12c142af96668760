//! Session state and its transition functions.
//!
//! `SessionState` is the single owned value behind a round: the deck, the
//! current selection, the countdown, the score, and the lifecycle phase.
//! Nothing outside the engine mutates it; the presentation layer sees only
//! snapshots.
//!
//! ## Immutable deck updates
//!
//! The deck is an `im::Vector<Card>` and every transition produces updated
//! `Card` values through `Vector::update` rather than mutating elements in
//! place. Pending delayed tasks (the mismatch flip-back) therefore never
//! alias live cards, and snapshots taken between transitions stay valid.
//!
//! ## Invariants
//!
//! - The selection never holds more than 2 positions.
//! - `is_matched` is never cleared within a round.
//! - `score` only increases, by `match_reward` per resolved pair.
//! - The countdown holds at 0 once exhausted.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Card;
use super::phase::Phase;

/// Positions of the currently flipped, unresolved cards (0..=2 entries).
pub type Selection = SmallVec<[usize; 2]>;

/// Why a click was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickRejection {
    /// No round is accepting input (not started, previewing, or over).
    NotPlaying,
    /// Position is outside the deck.
    OutOfRange,
    /// Two cards are already awaiting resolution.
    SelectionFull,
    /// The card is already face-up.
    AlreadyFaceUp,
    /// The card's pair was already resolved.
    AlreadyMatched,
}

impl std::fmt::Display for ClickRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            ClickRejection::NotPlaying => "not playing",
            ClickRejection::OutOfRange => "out of range",
            ClickRejection::SelectionFull => "selection full",
            ClickRejection::AlreadyFaceUp => "already face-up",
            ClickRejection::AlreadyMatched => "already matched",
        };
        write!(f, "{reason}")
    }
}

/// What a click did to the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Click was a no-op; state unchanged.
    Rejected(ClickRejection),
    /// First card of a pair flipped; awaiting a second.
    Flipped,
    /// Second card completed a pair; both marked matched, score increased,
    /// selection cleared synchronously.
    Matched { first: usize, second: usize },
    /// Second card did not match; both stay revealed until the engine's
    /// flip-back task fires. The selection stays full meanwhile.
    Mismatched { first: usize, second: usize },
}

/// Complete state of one round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionState {
    /// Shuffled deck; order fixed after construction (clicks address by
    /// position). Empty until a round starts.
    pub deck: Vector<Card>,

    /// Flipped cards awaiting resolution.
    pub selection: Selection,

    /// Seconds remaining; holds at 0.
    pub countdown_seconds: u32,

    /// Points earned this round.
    pub score: u32,

    /// Lifecycle phase.
    pub phase: Phase,
}

impl SessionState {
    /// Idle state before any round has been started.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            deck: Vector::new(),
            selection: Selection::new(),
            countdown_seconds: 0,
            score: 0,
            phase: Phase::NotStarted,
        }
    }

    /// Enter the preview: install a freshly built deck with every card
    /// revealed, reset the countdown and score.
    #[must_use]
    pub fn begin_preview(deck: Vector<Card>, round_seconds: u32) -> Self {
        let revealed = deck.iter().map(|card| card.flipped(true)).collect();
        Self {
            deck: revealed,
            selection: Selection::new(),
            countdown_seconds: round_seconds,
            score: 0,
            phase: Phase::Previewing,
        }
    }

    /// End the preview: hide every card again and open play.
    pub fn end_preview(&mut self) {
        debug_assert_eq!(self.phase, Phase::Previewing);
        self.deck = self.deck.iter().map(|card| card.flipped(false)).collect();
        self.phase = Phase::Playing;
    }

    /// Apply one card click.
    ///
    /// This is the whole match-engine decision table; the caller only has to
    /// act on the outcome (schedule a flip-back, probe for a win).
    pub fn apply_click(&mut self, position: usize, match_reward: u32) -> ClickOutcome {
        if !self.phase.accepts_clicks() {
            return ClickOutcome::Rejected(ClickRejection::NotPlaying);
        }
        if position >= self.deck.len() {
            return ClickOutcome::Rejected(ClickRejection::OutOfRange);
        }
        if self.selection.len() >= 2 {
            return ClickOutcome::Rejected(ClickRejection::SelectionFull);
        }

        let card = &self.deck[position];
        if card.is_matched {
            return ClickOutcome::Rejected(ClickRejection::AlreadyMatched);
        }
        if card.is_flipped {
            return ClickOutcome::Rejected(ClickRejection::AlreadyFaceUp);
        }

        let flipped = card.flipped(true);
        self.deck = self.deck.update(position, flipped);
        self.selection.push(position);

        if self.selection.len() < 2 {
            return ClickOutcome::Flipped;
        }

        let first = self.selection[0];
        let second = self.selection[1];

        if self.deck[first].pair_id == self.deck[second].pair_id {
            self.deck = self
                .deck
                .update(first, self.deck[first].matched())
                .update(second, self.deck[second].matched());
            self.score += match_reward;
            self.selection.clear();
            ClickOutcome::Matched { first, second }
        } else {
            // Selection stays full until the flip-back task resolves it,
            // which is what rejects further clicks in the meantime.
            ClickOutcome::Mismatched { first, second }
        }
    }

    /// Resolve a mismatched pair: hide both cards together and free the
    /// selection. Both flips happen in this one transition.
    pub fn flip_back(&mut self, first: usize, second: usize) {
        self.deck = self
            .deck
            .update(first, self.deck[first].flipped(false))
            .update(second, self.deck[second].flipped(false));
        self.selection.clear();
    }

    /// One countdown tick. Returns the new value; holds at 0.
    pub fn tick(&mut self) -> u32 {
        if self.phase.countdown_active() {
            self.countdown_seconds = self.countdown_seconds.saturating_sub(1);
        }
        self.countdown_seconds
    }

    /// True when every card is matched. An unbuilt (empty) deck never
    /// counts as won.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        !self.deck.is_empty() && self.deck.iter().all(|card| card.is_matched)
    }

    /// Number of resolved pairs so far.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.deck.iter().filter(|card| card.is_matched).count() / 2
    }

    /// Progress bar value derived from the countdown.
    ///
    /// Computed from the integer countdown each time instead of accumulating
    /// an independent float, so it can never drift from the timer.
    #[must_use]
    pub fn progress_percent(&self, round_seconds: u32) -> f32 {
        if round_seconds == 0 {
            return 0.0;
        }
        self.countdown_seconds as f32 * 100.0 / round_seconds as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{ImageId, PairId};

    fn two_pair_deck() -> Vector<Card> {
        // pair 0 at positions 0,2 - pair 1 at positions 1,3
        [0u32, 1, 0, 1]
            .iter()
            .map(|&p| Card::new(PairId::new(p), ImageId::new(format!("img-{p}"))))
            .collect()
    }

    fn playing_state() -> SessionState {
        let mut state = SessionState::begin_preview(two_pair_deck(), 60);
        state.end_preview();
        state
    }

    #[test]
    fn test_preview_reveals_then_hides() {
        let mut state = SessionState::begin_preview(two_pair_deck(), 60);
        assert!(state.deck.iter().all(|c| c.is_flipped));
        assert_eq!(state.phase, Phase::Previewing);
        assert_eq!(state.countdown_seconds, 60);

        state.end_preview();
        assert!(state.deck.iter().all(|c| !c.is_flipped));
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_match_resolves_synchronously() {
        let mut state = playing_state();
        assert_eq!(state.apply_click(0, 5), ClickOutcome::Flipped);
        assert_eq!(
            state.apply_click(2, 5),
            ClickOutcome::Matched { first: 0, second: 2 }
        );

        assert!(state.deck[0].is_matched && state.deck[2].is_matched);
        assert_eq!(state.score, 5);
        assert!(state.selection.is_empty(), "no delay on a match");
    }

    #[test]
    fn test_mismatch_keeps_selection_full() {
        let mut state = playing_state();
        state.apply_click(0, 5);
        assert_eq!(
            state.apply_click(1, 5),
            ClickOutcome::Mismatched { first: 0, second: 1 }
        );

        assert_eq!(state.selection.len(), 2);
        assert_eq!(state.score, 0);
        assert_eq!(
            state.apply_click(3, 5),
            ClickOutcome::Rejected(ClickRejection::SelectionFull)
        );

        state.flip_back(0, 1);
        assert!(!state.deck[0].is_flipped && !state.deck[1].is_flipped);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn test_click_rejections() {
        let mut state = playing_state();
        assert_eq!(
            state.apply_click(99, 5),
            ClickOutcome::Rejected(ClickRejection::OutOfRange)
        );

        state.apply_click(0, 5);
        assert_eq!(
            state.apply_click(0, 5),
            ClickOutcome::Rejected(ClickRejection::AlreadyFaceUp)
        );

        state.apply_click(2, 5); // match pair 0
        assert_eq!(
            state.apply_click(0, 5),
            ClickOutcome::Rejected(ClickRejection::AlreadyMatched)
        );
    }

    #[test]
    fn test_clicks_rejected_outside_playing() {
        let mut previewing = SessionState::begin_preview(two_pair_deck(), 60);
        assert_eq!(
            previewing.apply_click(0, 5),
            ClickOutcome::Rejected(ClickRejection::NotPlaying)
        );

        let mut idle = SessionState::idle();
        assert_eq!(
            idle.apply_click(0, 5),
            ClickOutcome::Rejected(ClickRejection::NotPlaying)
        );
    }

    #[test]
    fn test_countdown_holds_at_zero() {
        let mut state = playing_state();
        state.countdown_seconds = 1;
        assert_eq!(state.tick(), 0);
        assert_eq!(state.tick(), 0);
    }

    #[test]
    fn test_empty_deck_is_never_all_matched() {
        assert!(!SessionState::idle().all_matched());
    }

    #[test]
    fn test_progress_tracks_countdown_exactly() {
        let mut state = playing_state();
        assert!((state.progress_percent(60) - 100.0).abs() < f32::EPSILON);

        state.countdown_seconds = 30;
        assert!((state.progress_percent(60) - 50.0).abs() < f32::EPSILON);

        state.countdown_seconds = 0;
        assert_eq!(state.progress_percent(60), 0.0);
    }
}
