//! Domain layer: the pure, deterministic Truco state machine.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod envido;
pub mod errors;
pub mod events;
pub mod game;
pub mod rules;
pub mod state;
pub mod tricks;
pub mod truco;


#[cfg(test)]
mod tests_envido;
#[cfg(test)]
mod tests_props;
#[cfg(test)]
mod tests_truco;

// Re-exports for ergonomics
pub use cards_logic::{envido_value, truco_rank};
pub use cards_types::{Card, Rank, Suit};
pub use dealing::deal_hands;
pub use envido::EnvidoCall;
pub use errors::DomainError;
pub use events::GameEvent;
pub use game::{Game, Player};
pub use state::PlayerId;
pub use truco::TrucoCall;
