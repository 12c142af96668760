//! Card identity and per-round card state.
//!
//! Every card on the board depicts one image from the session's fixed image
//! list. Exactly two cards share a `PairId`; resolving both is a match.
//!
//! ## Usage
//!
//! ```
//! use splitcards::core::{Card, ImageId, PairId};
//!
//! let card = Card::new(PairId::new(3), ImageId::new("cat.png"));
//! assert!(!card.is_flipped);
//! assert!(!card.is_matched);
//!
//! let up = card.flipped(true);
//! assert!(up.is_flipped);
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identifier shared by exactly two cards depicting the same image.
///
/// Pair ids are dense indices into the session's image list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairId(pub u32);

impl PairId {
    /// Create a new pair ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PairId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pair({})", self.0)
    }
}

/// Reference to a revealed-face image asset.
///
/// The engine never interprets the reference - it is handed to the
/// `AssetSource` collaborator for fetching and to the host for rendering.
/// Cheap to clone (shared string).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(Arc<str>);

impl ImageId {
    /// Create an image reference.
    #[must_use]
    pub fn new(reference: impl Into<Arc<str>>) -> Self {
        Self(reference.into())
    }

    /// The raw reference string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ImageId {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

impl From<String> for ImageId {
    fn from(reference: String) -> Self {
        Self::new(reference)
    }
}

/// A single card in the deck.
///
/// Cards are immutable values: state transitions produce updated copies via
/// [`Card::flipped`] and [`Card::matched`] rather than mutating in place, so
/// pending delayed tasks never observe a half-applied transition.
///
/// Invariant: once `is_matched` is true it stays true (and the card stays
/// face-up) for the remainder of the round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Which image pair this card belongs to.
    pub pair_id: PairId,

    /// The revealed-face asset.
    pub image: ImageId,

    /// True while the face is shown (player flip or initial preview).
    pub is_flipped: bool,

    /// True once this card's pair has been resolved.
    pub is_matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(pair_id: PairId, image: ImageId) -> Self {
        Self {
            pair_id,
            image,
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Copy of this card with `is_flipped` set.
    ///
    /// Matched cards stay face-up regardless of the requested value.
    #[must_use]
    pub fn flipped(&self, face_up: bool) -> Self {
        Self {
            is_flipped: face_up || self.is_matched,
            ..self.clone()
        }
    }

    /// Copy of this card marked as matched (and therefore face-up).
    #[must_use]
    pub fn matched(&self) -> Self {
        Self {
            is_flipped: true,
            is_matched: true,
            ..self.clone()
        }
    }
}
