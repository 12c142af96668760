//! Core session types: cards, phases, state, RNG, configuration.
//!
//! This module contains the data model and pure transition functions.
//! Scheduling, collaborators, and the event-handling engine live in
//! `crate::engine`.

pub mod card;
pub mod config;
pub mod phase;
pub mod rng;
pub mod state;

pub use card::{Card, ImageId, PairId};
pub use config::{SessionConfig, SessionConfigBuilder};
pub use phase::Phase;
pub use rng::SessionRng;
pub use state::{ClickOutcome, ClickRejection, Selection, SessionState};
