//! Card strength scalars: truco hand-ranking and envido scoring.

use super::cards_types::{Card, Rank, Suit};

/// Truco strength of a card, 1 (weakest) to 14 (1 of espadas).
///
/// Equal values are legal and mean the trick is parda (drawn).
pub fn truco_rank(card: Card) -> u8 {
    match (card.rank, card.suit) {
        (Rank::Uno, Suit::Espada) => 14,
        (Rank::Uno, Suit::Basto) => 13,
        (Rank::Siete, Suit::Espada) => 12,
        (Rank::Siete, Suit::Oro) => 11,
        (Rank::Tres, _) => 10,
        (Rank::Dos, _) => 9,
        (Rank::Uno, _) => 8,
        (Rank::Rey, _) => 7,
        (Rank::Caballo, _) => 6,
        (Rank::Sota, _) => 5,
        (Rank::Siete, _) => 4,
        (Rank::Seis, _) => 3,
        (Rank::Cinco, _) => 2,
        (Rank::Cuatro, _) => 1,
    }
}

/// Envido contribution of a single card: face cards count 0, the rest their number.
pub fn envido_rank(card: Card) -> u8 {
    match card.rank {
        Rank::Sota | Rank::Caballo | Rank::Rey => 0,
        rank => rank.face_value(),
    }
}

/// Envido score over an arbitrary set of a player's cards (held and thrown).
///
/// Two or more of one suit score 20 plus the two highest envido ranks of that
/// suit; otherwise the best single card counts. Order of `cards` is irrelevant.
pub fn envido_value(cards: &[Card]) -> u8 {
    let mut best = 0u8;
    for suit in Suit::ALL {
        let mut ranks: Vec<u8> = cards
            .iter()
            .filter(|c| c.suit == suit)
            .map(|c| envido_rank(*c))
            .collect();
        if ranks.is_empty() {
            continue;
        }
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let score = if ranks.len() >= 2 {
            20 + ranks[0] + ranks[1]
        } else {
            ranks[0]
        };
        best = best.max(score);
    }
    best
}
