use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Closed enumeration of rule violations a transition can reject with.
///
/// A rejected transition leaves the game untouched and emits no event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    NotYourTurn,
    WaitingResponse,
    InvalidCard,
    InvalidStep,
    InvalidEnvidoCall,
    InvalidTrucoCall,
    NotWaitingResponse,
    GameAlreadyStarted,
    GameNotStarted,
    GameFull,
    AlreadyJoined,
    GameFinished,
    GameNotFinished,
    GameNotFound,
    ParseCard(String),
}

impl DomainError {
    /// Stable wire code, SCREAMING_SNAKE_CASE.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::NotYourTurn => "NOT_YOUR_TURN",
            DomainError::WaitingResponse => "WAITING_RESPONSE",
            DomainError::InvalidCard => "INVALID_CARD",
            DomainError::InvalidStep => "INVALID_STEP",
            DomainError::InvalidEnvidoCall => "INVALID_ENVIDO_CALL",
            DomainError::InvalidTrucoCall => "INVALID_TRUCO_CALL",
            DomainError::NotWaitingResponse => "NOT_WAITING_RESPONSE",
            DomainError::GameAlreadyStarted => "GAME_ALREADY_STARTED",
            DomainError::GameNotStarted => "GAME_NOT_STARTED",
            DomainError::GameFull => "GAME_FULL",
            DomainError::AlreadyJoined => "ALREADY_JOINED",
            DomainError::GameFinished => "GAME_FINISHED",
            DomainError::GameNotFinished => "GAME_NOT_FINISHED",
            DomainError::GameNotFound => "GAME_NOT_FOUND",
            DomainError::ParseCard(_) => "PARSE_CARD",
        }
    }
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::NotYourTurn => write!(f, "not your turn"),
            DomainError::WaitingResponse => write!(f, "a call is awaiting a response"),
            DomainError::InvalidCard => write!(f, "card not in hand"),
            DomainError::InvalidStep => write!(f, "envido is only available before the first card"),
            DomainError::InvalidEnvidoCall => write!(f, "invalid envido call"),
            DomainError::InvalidTrucoCall => write!(f, "invalid truco call"),
            DomainError::NotWaitingResponse => write!(f, "no call is awaiting a response"),
            DomainError::GameAlreadyStarted => write!(f, "game already started"),
            DomainError::GameNotStarted => write!(f, "game not started"),
            DomainError::GameFull => write!(f, "game already has two players"),
            DomainError::AlreadyJoined => write!(f, "user is already in the game"),
            DomainError::GameFinished => write!(f, "game is finished"),
            DomainError::GameNotFinished => write!(f, "game is not finished"),
            DomainError::GameNotFound => write!(f, "game not found"),
            DomainError::ParseCard(s) => write!(f, "parse card: {s}"),
        }
    }
}

impl Error for DomainError {}
