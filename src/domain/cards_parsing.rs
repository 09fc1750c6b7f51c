//! Card parsing from compact string tokens (e.g. "1E", "7O", "12B").

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, Rank, Suit};
use super::errors::DomainError;

impl Suit {
    fn letter(self) -> char {
        match self {
            Suit::Espada => 'E',
            Suit::Basto => 'B',
            Suit::Oro => 'O',
            Suit::Copa => 'C',
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.face_value(), self.suit.letter())
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || DomainError::ParseCard(s.to_string());
        if s.len() < 2 || s.len() > 3 {
            return Err(bad());
        }
        let (num, suit_ch) = s.split_at(s.len() - 1);
        let rank = match num.parse::<u8>().map_err(|_| bad())? {
            1 => Rank::Uno,
            2 => Rank::Dos,
            3 => Rank::Tres,
            4 => Rank::Cuatro,
            5 => Rank::Cinco,
            6 => Rank::Seis,
            7 => Rank::Siete,
            10 => Rank::Sota,
            11 => Rank::Caballo,
            12 => Rank::Rey,
            _ => return Err(bad()),
        };
        let suit = match suit_ch {
            "E" => Suit::Espada,
            "B" => Suit::Basto,
            "O" => Suit::Oro,
            "C" => Suit::Copa,
            _ => return Err(bad()),
        };
        Ok(Card { suit, rank })
    }
}

/// Parse a batch of card tokens, failing on the first invalid one.
pub fn parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
