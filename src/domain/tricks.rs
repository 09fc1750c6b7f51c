//! Trick comparison and round resolution.

use std::collections::HashMap;

use super::cards_logic::truco_rank;
use super::cards_types::Card;
use super::state::PlayerId;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TrickOutcome {
    Won(PlayerId),
    Parda,
}

/// Outcome of a single completed trick.
pub fn trick_outcome(a: (PlayerId, Card), b: (PlayerId, Card)) -> TrickOutcome {
    use std::cmp::Ordering;
    match truco_rank(a.1).cmp(&truco_rank(b.1)) {
        Ordering::Greater => TrickOutcome::Won(a.0),
        Ordering::Less => TrickOutcome::Won(b.0),
        Ordering::Equal => TrickOutcome::Parda,
    }
}

/// Round winner, or `None` while the round is still undecided.
///
/// Best of three tricks. Parda after a won trick goes to the prior winner;
/// a won segunda after a parda primera takes the round; an all-parda round
/// goes to the mano.
pub fn round_winner(
    mano: PlayerId,
    players: (PlayerId, PlayerId),
    thrown: &HashMap<PlayerId, Vec<Card>>,
) -> Option<PlayerId> {
    let (a, b) = players;
    let empty = Vec::new();
    let thrown_a = thrown.get(&a).unwrap_or(&empty);
    let thrown_b = thrown.get(&b).unwrap_or(&empty);
    let completed = thrown_a.len().min(thrown_b.len());

    let outcomes: Vec<TrickOutcome> = (0..completed)
        .map(|i| trick_outcome((a, thrown_a[i]), (b, thrown_b[i])))
        .collect();
    decide(mano, &outcomes)
}

fn decide(mano: PlayerId, outcomes: &[TrickOutcome]) -> Option<PlayerId> {
    use TrickOutcome::*;
    if outcomes.len() < 2 {
        return None;
    }
    let third = outcomes.get(2);
    match (outcomes[0], outcomes[1]) {
        (Won(a), Won(b)) if a == b => Some(a),
        (Won(a), Parda) => Some(a),
        (Parda, Won(a)) => Some(a),
        // Split tricks: the third decides, parda falls back to the primera.
        (Won(a), Won(_)) => match third {
            None => None,
            Some(Won(c)) => Some(*c),
            Some(Parda) => Some(a),
        },
        // Two pardas: the third decides, all parda goes to the mano.
        (Parda, Parda) => match third {
            None => None,
            Some(Won(c)) => Some(*c),
            Some(Parda) => Some(mano),
        },
    }
}
