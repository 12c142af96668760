//! # splitcards
//!
//! Core engine for a timed memory-matching card game: a 60 second round in
//! which the player flips paired cards, scores for matches, and ends in a
//! won or lost state. Presentation-free: a host feeds inbound events and
//! renders the snapshots the session emits.
//!
//! ## Design Principles
//!
//! 1. **Single owner**: all round state lives in one `GameSession`. The
//!    presentation layer subscribes to snapshots; nothing outside the
//!    session mutates a card.
//!
//! 2. **Explicit time**: every delay (preview, countdown tick, mismatch
//!    flip-back) is a task on a session-owned virtual-clock scheduler. The
//!    host delivers elapsed time via `advance`; round end cancels the whole
//!    outstanding group, so stale callbacks never touch a rebuilt deck.
//!
//! 3. **Immutable transitions**: the deck is an `im` persistent vector and
//!    every transition produces new card values, never aliased in-place
//!    mutation.
//!
//! 4. **Deterministic**: shuffles come from a seeded, per-round-forked
//!    ChaCha8 RNG; the same seed replays the same rounds.
//!
//! ## Modules
//!
//! - `core`: cards, phases, configuration, RNG, session state
//! - `deck`: deck builder (asset-checked, uniformly shuffled)
//! - `engine`: the scheduler and the `GameSession` event loop
//! - `collab`: host-injected asset and audio collaborators
//! - `snapshot`: the observable state projection
//! - `error`: round-setup errors
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use splitcards::{GameSession, Phase, SessionConfig};
//!
//! let config = SessionConfig::builder([
//!     "bear.png", "cat.png", "dog.png", "fox.png", "owl.png", "wolf.png",
//! ])
//! .build();
//!
//! let mut session = GameSession::with_seed(config, 42);
//! session.start().unwrap();
//!
//! // Preview: all 12 cards face-up for 2 seconds
//! assert_eq!(session.phase(), Phase::Previewing);
//! session.advance(Duration::from_secs(2));
//! assert_eq!(session.phase(), Phase::Playing);
//!
//! // Flip two cards; snapshots tell the host what to draw
//! session.card_clicked(0);
//! session.card_clicked(1);
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.cards.len(), 12);
//! ```

pub mod collab;
pub mod core;
pub mod deck;
pub mod engine;
pub mod error;
pub mod snapshot;

// Re-export the public surface
pub use crate::collab::{AssetSource, AudioSink, NoopAudio, ReadyAssets};
pub use crate::core::{
    Card, ClickOutcome, ClickRejection, ImageId, PairId, Phase, Selection, SessionConfig,
    SessionConfigBuilder, SessionRng, SessionState,
};
pub use crate::deck::build_deck;
pub use crate::engine::{GameSession, TaskKind, TaskScheduler};
pub use crate::error::StartError;
pub use crate::snapshot::{CardView, SessionSnapshot};
