//! Connection registry: user id → live websocket recipient.
//!
//! Written on register/disconnect, read on every emit. Undelivered messages
//! are dropped; reconnecting clients catch up from the event log.

use actix::prelude::*;
use dashmap::DashMap;
use tracing::{debug, info};

use crate::domain::PlayerId;
use crate::ws::protocol::ServerMsg;

#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMsg);

#[derive(Default)]
pub struct ConnectionRegistry {
    connections: DashMap<PlayerId, Recipient<Outbound>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self { connections: DashMap::new() }
    }

    /// Associate a user with a live socket. A newer connection for the same
    /// user replaces the old one.
    pub fn register(&self, user_id: PlayerId, recipient: Recipient<Outbound>) {
        self.connections.insert(user_id, recipient);
        info!(
            user_id,
            active_connections = self.connections.len(),
            "Websocket connection registered"
        );
    }

    pub fn unregister(&self, user_id: PlayerId) {
        if self.connections.remove(&user_id).is_some() {
            info!(
                user_id,
                active_connections = self.connections.len(),
                "Websocket connection unregistered"
            );
        }
    }

    pub fn send_to(&self, user_id: PlayerId, msg: ServerMsg) {
        match self.connections.get(&user_id) {
            Some(entry) => entry.value().do_send(Outbound(msg)),
            None => debug!(user_id, "No live connection for user, dropping message"),
        }
    }
}
