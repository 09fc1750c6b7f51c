use std::sync::Arc;

use crate::config::ServerConfig;
use crate::repos::games::GameRepo;
use crate::services::GameFlowService;
use crate::ws::hub::ConnectionRegistry;

/// Application state containing shared resources.
pub struct AppState {
    pub repo: Arc<GameRepo>,
    pub registry: Arc<ConnectionRegistry>,
    pub flow: Arc<GameFlowService>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let repo = Arc::new(GameRepo::new());
        let registry = Arc::new(ConnectionRegistry::new());
        let flow = Arc::new(GameFlowService::new(
            Arc::clone(&repo),
            Arc::clone(&registry),
            config.match_target,
        ));
        Self { repo, registry, flow, config }
    }
}
