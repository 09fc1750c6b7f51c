//! Shuffling and dealing.

use rand::seq::SliceRandom;
use rand::Rng;

use super::cards_types::{Card, Rank, Suit};
use super::rules::HAND_SIZE;

/// The full 40-card deck in canonical order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(40);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Deal two disjoint 3-card hands from a freshly shuffled deck.
///
/// The RNG is injected so tests can seed it; the rest of the deck is
/// discarded (two-player Truco never draws).
pub fn deal_hands<R: Rng>(rng: &mut R) -> (Vec<Card>, Vec<Card>) {
    let mut deck = full_deck();
    deck.shuffle(rng);
    (deck[..HAND_SIZE].to_vec(), deck[HAND_SIZE..2 * HAND_SIZE].to_vec())
}
