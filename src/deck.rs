//! Deck construction.
//!
//! Given the session's distinct image list, build a deck of `2N` cards, two
//! per image, uniformly shuffled (Fisher-Yates via the session RNG). Every
//! image is resolved through the `AssetSource` before any card referencing
//! it exists, so the rest of the system never holds a broken face.

use im::Vector;
use log::debug;

use crate::collab::AssetSource;
use crate::core::{Card, PairId, SessionConfig, SessionRng};
use crate::error::StartError;

/// Build a shuffled deck for one round.
///
/// Fetches each distinct image exactly once; the first failure aborts with
/// [`StartError::Asset`] and no deck is produced.
///
/// The returned cards are all face-down and unmatched. `pair_id` values are
/// dense indices into `config.images`, each appearing exactly twice.
pub fn build_deck(
    config: &SessionConfig,
    rng: &mut SessionRng,
    assets: &mut dyn AssetSource,
) -> Result<Vector<Card>, StartError> {
    for image in &config.images {
        assets.fetch(image).map_err(|source| StartError::Asset {
            image: image.clone(),
            source,
        })?;
    }

    let mut cards: Vec<Card> = Vec::with_capacity(config.deck_size());
    for (index, image) in config.images.iter().enumerate() {
        let pair_id = PairId::new(index as u32);
        cards.push(Card::new(pair_id, image.clone()));
        cards.push(Card::new(pair_id, image.clone()));
    }

    rng.shuffle(&mut cards);
    debug!("built deck of {} cards from {} images", cards.len(), config.images.len());

    Ok(cards.into_iter().collect())
}

/// Convenience for hosts that already have their assets resident.
pub fn build_deck_unchecked(config: &SessionConfig, rng: &mut SessionRng) -> Vector<Card> {
    let mut ready = crate::collab::ReadyAssets;
    build_deck(config, rng, &mut ready).unwrap_or_else(|_| unreachable!("ReadyAssets never fails"))
}
