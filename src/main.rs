use actix_web::{web, App, HttpServer};
use tracing::info;
use trucazo::config::ServerConfig;
use trucazo::state::AppState;
use trucazo::{routes, telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();
    let bind_addr = config.bind_addr.clone();
    let app_state = web::Data::new(AppState::new(config));

    info!(%bind_addr, "Starting trucazo server");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(routes::configure)
    })
    .bind(bind_addr.as_str())?
    .run()
    .await
}
