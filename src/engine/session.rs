//! The game session: the single owner of all round state.
//!
//! `GameSession` ties the three concerns together:
//!
//! - the **deck builder** (`crate::deck`), invoked at start/restart;
//! - the **timer driver**, a self-rescheduling tick task on the owned
//!   [`TaskScheduler`];
//! - the **match engine**, the click state machine in
//!   [`SessionState::apply_click`].
//!
//! ## Event model
//!
//! Inbound: [`GameSession::start`], [`GameSession::card_clicked`],
//! [`GameSession::restart`], plus [`GameSession::advance`] through which the
//! host delivers elapsed time. All mutations run as discrete, non-overlapping
//! steps on the caller's thread; nothing blocks.
//!
//! Outbound: after every mutation the session re-emits a
//! [`SessionSnapshot`] to the registered observer. Hosts may also pull with
//! [`GameSession::snapshot`].
//!
//! ## Driving time
//!
//! ```
//! use std::time::Duration;
//! use splitcards::{GameSession, Phase, SessionConfig};
//!
//! let config = SessionConfig::builder(["a.png", "b.png"]).build();
//! let mut session = GameSession::with_seed(config, 42);
//!
//! session.start().unwrap();
//! assert_eq!(session.phase(), Phase::Previewing);
//!
//! // 2 s preview elapses, play opens
//! session.advance(Duration::from_millis(2000));
//! assert_eq!(session.phase(), Phase::Playing);
//! ```

use std::time::Duration;

use log::{debug, error, info, warn};

use crate::collab::{AssetSource, AudioSink, NoopAudio, ReadyAssets};
use crate::core::{ClickOutcome, Phase, SessionConfig, SessionRng, SessionState};
use crate::deck::build_deck;
use crate::error::StartError;
use crate::snapshot::SessionSnapshot;

use super::scheduler::{TaskKind, TaskScheduler};

type Observer = Box<dyn FnMut(&SessionSnapshot)>;

/// One memory-matching game session.
///
/// Owns the deck, the session state, and every scheduled callback. No
/// external writer can reach the state; collaborators are injected, and the
/// presentation layer only ever sees snapshots.
pub struct GameSession {
    config: SessionConfig,
    rng: SessionRng,
    state: SessionState,
    scheduler: TaskScheduler,
    assets: Box<dyn AssetSource>,
    audio: Box<dyn AudioSink>,
    observer: Option<Observer>,
}

impl GameSession {
    /// Create a session with an entropy-seeded shuffle.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self::with_rng(config, SessionRng::from_entropy())
    }

    /// Create a session with a fixed seed (reproducible shuffles).
    #[must_use]
    pub fn with_seed(config: SessionConfig, seed: u64) -> Self {
        Self::with_rng(config, SessionRng::new(seed))
    }

    fn with_rng(config: SessionConfig, rng: SessionRng) -> Self {
        Self {
            config,
            rng,
            state: SessionState::idle(),
            scheduler: TaskScheduler::new(),
            assets: Box::new(ReadyAssets),
            audio: Box::new(NoopAudio),
            observer: None,
        }
    }

    /// Install the image-loading collaborator.
    pub fn set_asset_source(&mut self, assets: Box<dyn AssetSource>) {
        self.assets = assets;
    }

    /// Install the audio collaborator.
    pub fn set_audio_sink(&mut self, audio: Box<dyn AudioSink>) {
        self.audio = audio;
    }

    /// Register the snapshot observer, called after every mutation.
    pub fn set_observer(&mut self, observer: impl FnMut(&SessionSnapshot) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    // === Inbound events ===

    /// Start the round: build and preview the deck, begin the countdown,
    /// trigger ambient audio.
    ///
    /// Errs (and leaves the session in `NotStarted`) if any image asset
    /// cannot be fetched - no deck with broken faces is ever exposed.
    /// Ignored if a round is already underway; use [`GameSession::restart`]
    /// to rebuild.
    pub fn start(&mut self) -> Result<(), StartError> {
        if self.state.phase != Phase::NotStarted {
            debug!("start ignored: session is {}", self.state.phase);
            return Ok(());
        }

        let mut round_rng = self.rng.fork();
        let deck = match build_deck(&self.config, &mut round_rng, self.assets.as_mut()) {
            Ok(deck) => deck,
            Err(err) => {
                error!("round setup aborted: {err}");
                return Err(err);
            }
        };

        self.state = SessionState::begin_preview(deck, self.config.round_seconds);
        self.scheduler
            .schedule_after(self.config.preview_ms, TaskKind::PreviewEnd);
        self.scheduler
            .schedule_after(self.config.tick_ms, TaskKind::Tick);
        self.play_ambient_audio();

        info!(
            "round started: {} cards, {} seconds",
            self.state.deck.len(),
            self.config.round_seconds
        );
        self.emit();
        Ok(())
    }

    /// Handle a click on the card at `position`.
    ///
    /// Out-of-range positions, repeat flips, matched cards, clicks while two
    /// cards await resolution, and clicks outside `Playing` are all silent
    /// no-ops.
    pub fn card_clicked(&mut self, position: usize) {
        match self
            .state
            .apply_click(position, self.config.match_reward)
        {
            ClickOutcome::Rejected(reason) => {
                debug!("click at {position} ignored: {reason}");
            }
            ClickOutcome::Flipped => {
                self.emit();
            }
            ClickOutcome::Matched { first, second } => {
                debug!("pair matched at {first}/{second}, score {}", self.state.score);
                self.check_round_end();
                self.emit();
            }
            ClickOutcome::Mismatched { first, second } => {
                self.scheduler.schedule_after(
                    self.config.mismatch_delay_ms,
                    TaskKind::FlipBack { first, second },
                );
                self.emit();
            }
        }
    }

    /// Discard the whole session state and deck, cancel every outstanding
    /// scheduled task, and start a fresh round with a reshuffled deck.
    pub fn restart(&mut self) -> Result<(), StartError> {
        self.scheduler.cancel_all();
        self.state = SessionState::idle();
        info!("session restarted");
        self.emit();
        self.start()
    }

    /// Deliver elapsed wall time.
    ///
    /// Due tasks (preview end, ticks, flip-backs) run one at a time in due
    /// order; a task scheduled while another runs is relative to the instant
    /// its parent ran, so a 1 s tick stays a 1 s cadence however coarsely
    /// the host drives this.
    pub fn advance(&mut self, elapsed: Duration) {
        let target = self
            .scheduler
            .now_ms()
            .saturating_add(elapsed.as_millis() as u64);
        while let Some(kind) = self.scheduler.pop_due(target) {
            self.run_task(kind);
        }
        self.scheduler.advance_to(target);
    }

    // === Observation ===

    /// Current observable state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.state, &self.config)
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Seconds left on the countdown.
    #[must_use]
    pub fn countdown_seconds(&self) -> u32 {
        self.state.countdown_seconds
    }

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// How long until the next scheduled task, if any. Lets a host sleep
    /// instead of polling [`GameSession::advance`].
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline_ms().map(Duration::from_millis)
    }

    // === Scheduled task handling ===

    fn run_task(&mut self, kind: TaskKind) {
        match kind {
            TaskKind::PreviewEnd => {
                if self.state.phase != Phase::Previewing {
                    return;
                }
                self.state.end_preview();
                debug!("preview over, play is live");
                // A preview longer than the round can exhaust the countdown
                // before play ever opens.
                self.check_round_end();
                self.emit();
            }
            TaskKind::Tick => {
                if !self.state.phase.countdown_active() {
                    return;
                }
                let remaining = self.state.tick();
                if remaining > 0 {
                    self.scheduler
                        .schedule_after(self.config.tick_ms, TaskKind::Tick);
                }
                self.check_round_end();
                self.emit();
            }
            TaskKind::FlipBack { first, second } => {
                // Both cards of the pair hide in this one step, never
                // independently.
                self.state.flip_back(first, second);
                debug!("mismatched pair at {first}/{second} flipped back");
                self.emit();
            }
        }
    }

    /// Terminal-condition probe, run whenever the countdown or the deck
    /// changes while playing.
    fn check_round_end(&mut self) {
        if self.state.phase != Phase::Playing {
            return;
        }

        if self.state.countdown_seconds == 0 && !self.state.all_matched() {
            self.state.phase = Phase::Lost;
            self.scheduler.cancel_all();
            info!(
                "round lost: time expired with {} pairs matched, score {}",
                self.state.matched_pairs(),
                self.state.score
            );
        } else if self.state.all_matched() {
            self.state.phase = Phase::Won;
            self.scheduler.cancel_all();
            info!(
                "round won with {} seconds left, score {}",
                self.state.countdown_seconds, self.state.score
            );
        }
    }

    fn play_ambient_audio(&mut self) {
        let Some(clip) = self.config.audio_clip.clone() else {
            return;
        };
        // Playback failure never blocks or ends the round.
        if let Err(err) = self.audio.play(&clip) {
            warn!("audio play failed: {err:#}");
        }
    }

    fn emit(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            let snapshot = SessionSnapshot::capture(&self.state, &self.config);
            observer(&snapshot);
        }
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("phase", &self.state.phase)
            .field("score", &self.state.score)
            .field("countdown_seconds", &self.state.countdown_seconds)
            .field("deck_len", &self.state.deck.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        let config = SessionConfig::builder(["a", "b"]).build();
        GameSession::with_seed(config, 7)
    }

    #[test]
    fn test_start_enters_preview_with_cards_revealed() {
        let mut session = session();
        session.start().unwrap();

        let snap = session.snapshot();
        assert_eq!(snap.phase, Phase::Previewing);
        assert_eq!(snap.cards.len(), 4);
        assert!(snap.cards.iter().all(|c| c.is_flipped));
    }

    #[test]
    fn test_start_is_idempotent_while_running(){
        let mut session = session();
        session.start().unwrap();
        session.advance(Duration::from_millis(2500));
        let before = session.snapshot();

        session.start().unwrap();
        let after = session.snapshot();
        assert_eq!(before.phase, after.phase);
        assert_eq!(before.countdown_seconds, after.countdown_seconds);
    }

    #[test]
    fn test_countdown_runs_during_preview() {
        // The original starts the timer on Start, not on preview end.
        let mut session = session();
        session.start().unwrap();
        session.advance(Duration::from_millis(1000));
        assert_eq!(session.countdown_seconds(), 59);
        assert_eq!(session.phase(), Phase::Previewing);
    }

    #[test]
    fn test_next_deadline_reports_upcoming_task() {
        let mut session = session();
        assert_eq!(session.next_deadline(), None);
        session.start().unwrap();
        // Tick at 1000 ms, preview end at 2000 ms
        assert_eq!(session.next_deadline(), Some(Duration::from_millis(1000)));
    }
}
