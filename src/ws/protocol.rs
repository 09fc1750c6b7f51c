//! Wire protocol between clients and the server.

use serde::{Deserialize, Serialize};

use crate::domain::{Card, EnvidoCall, GameEvent, Player, PlayerId, TrucoCall};
use crate::repos::games::GameSummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMsg {
    #[serde(rename_all = "camelCase")]
    RegisterConnection { user_id: PlayerId },
    GamesList,
    #[serde(rename_all = "camelCase")]
    CreateGame { user_id: PlayerId, name: String },
    #[serde(rename_all = "camelCase")]
    JoinGame { user_id: PlayerId, game_id: i64, name: String },
    #[serde(rename_all = "camelCase")]
    ThrowCard { user_id: PlayerId, game_id: i64, card: Card },
    #[serde(rename_all = "camelCase")]
    Envido { user_id: PlayerId, game_id: i64, call: EnvidoCall },
    #[serde(rename_all = "camelCase")]
    AnswerEnvido { user_id: PlayerId, game_id: i64, accepted: bool },
    #[serde(rename_all = "camelCase")]
    Truco { user_id: PlayerId, game_id: i64, call: TrucoCall },
    #[serde(rename_all = "camelCase")]
    AnswerTruco { user_id: PlayerId, game_id: i64, accepted: bool },
    #[serde(rename_all = "camelCase")]
    ToDeck { user_id: PlayerId, game_id: i64 },
    #[serde(rename_all = "camelCase")]
    PlayAgain { user_id: PlayerId, game_id: i64 },
    #[serde(rename_all = "camelCase")]
    NoPlayAgain { user_id: PlayerId, game_id: i64 },
}

impl ClientMsg {
    /// Message tag, echoed back on errors so clients can key the failure to
    /// the request that caused it.
    pub fn request_name(&self) -> &'static str {
        match self {
            ClientMsg::RegisterConnection { .. } => "register-connection",
            ClientMsg::GamesList => "games-list",
            ClientMsg::CreateGame { .. } => "create-game",
            ClientMsg::JoinGame { .. } => "join-game",
            ClientMsg::ThrowCard { .. } => "throw-card",
            ClientMsg::Envido { .. } => "envido",
            ClientMsg::AnswerEnvido { .. } => "answer-envido",
            ClientMsg::Truco { .. } => "truco",
            ClientMsg::AnswerTruco { .. } => "answer-truco",
            ClientMsg::ToDeck { .. } => "to-deck",
            ClientMsg::PlayAgain { .. } => "play-again",
            ClientMsg::NoPlayAgain { .. } => "no-play-again",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMsg {
    GamesList {
        games: Vec<GameSummary>,
    },
    #[serde(rename_all = "camelCase")]
    GameJoined {
        game_id: i64,
        name: String,
        players: Vec<Player>,
    },
    #[serde(rename_all = "camelCase")]
    NewEvents {
        game_id: i64,
        events: Vec<GameEvent>,
    },
    Error {
        code: String,
        message: String,
        request: String,
    },
}
