//! Per-socket actor: heartbeat, decode, dispatch to the game flow service.

use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{DomainError, Player, PlayerId};
use crate::state::AppState;
use crate::ws::hub::Outbound;
use crate::ws::protocol::{ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(GameWsSession::new(app_state), &req, stream)
}

pub struct GameWsSession {
    conn_id: Uuid,
    user_id: Option<PlayerId>,
    app_state: web::Data<AppState>,
    last_heartbeat: Instant,
}

impl GameWsSession {
    fn new(app_state: web::Data<AppState>) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            user_id: None,
            app_state,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "Failed to serialize outbound message"),
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, user_id = ?actor.user_id, "Heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_msg(&mut self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        let request = cmd.request_name();
        let flow = self.app_state.flow.clone();
        let result: Result<(), DomainError> = match cmd {
            ClientMsg::RegisterConnection { user_id } => {
                self.user_id = Some(user_id);
                self.app_state
                    .registry
                    .register(user_id, ctx.address().recipient());
                Ok(())
            }
            ClientMsg::GamesList => {
                let games = flow.games_list();
                Self::send_json(ctx, &ServerMsg::GamesList { games });
                Ok(())
            }
            ClientMsg::CreateGame { user_id, name } => {
                let (game_id, name, players) = flow.create_game(Player { id: user_id, name });
                Self::send_json(ctx, &ServerMsg::GameJoined { game_id, name, players });
                Ok(())
            }
            ClientMsg::JoinGame { user_id, game_id, name } => {
                flow.join_game(Player { id: user_id, name }, game_id)
            }
            ClientMsg::ThrowCard { user_id, game_id, card } => {
                flow.throw_card(user_id, game_id, card)
            }
            ClientMsg::Envido { user_id, game_id, call } => {
                flow.call_envido(user_id, game_id, call)
            }
            ClientMsg::AnswerEnvido { user_id, game_id, accepted } => {
                flow.answer_envido(user_id, game_id, accepted)
            }
            ClientMsg::Truco { user_id, game_id, call } => {
                flow.call_truco(user_id, game_id, call)
            }
            ClientMsg::AnswerTruco { user_id, game_id, accepted } => {
                flow.answer_truco(user_id, game_id, accepted)
            }
            ClientMsg::ToDeck { user_id, game_id } => flow.go_to_deck(user_id, game_id),
            ClientMsg::PlayAgain { user_id, game_id } => flow.play_again(user_id, game_id),
            ClientMsg::NoPlayAgain { user_id, game_id } => flow.no_play_again(user_id, game_id),
        };
        if let Err(err) = result {
            Self::send_json(
                ctx,
                &ServerMsg::Error {
                    code: err.code().to_string(),
                    message: err.to_string(),
                    request: request.to_string(),
                },
            );
        }
    }
}

impl Actor for GameWsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "Websocket session started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(user_id) = self.user_id {
            self.app_state.registry.unregister(user_id);
        }
        info!(conn_id = %self.conn_id, user_id = ?self.user_id, "Websocket session stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for GameWsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => self.handle_msg(cmd, ctx),
                    Err(err) => Self::send_json(
                        ctx,
                        &ServerMsg::Error {
                            code: "BAD_REQUEST".to_string(),
                            message: format!("Malformed message: {err}"),
                            request: String::new(),
                        },
                    ),
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_json(
                    ctx,
                    &ServerMsg::Error {
                        code: "BAD_REQUEST".to_string(),
                        message: "Binary frames are not supported".to_string(),
                        request: String::new(),
                    },
                );
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "Websocket protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Outbound> for GameWsSession {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
