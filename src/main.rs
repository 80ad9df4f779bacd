use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use habit_ledger::infrastructure::config::AppConfig;
use habit_ledger::infrastructure::logging::init_logging;
use habit_ledger::presentation::handlers::AppState;
use habit_ledger::presentation::middleware::{RequestIdMiddleware, TimingMiddleware};
use habit_ledger::presentation::routes;
use std::io;
use tracing::{info, warn};

fn cors(config: &AppConfig) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if config.allows_any_origin() {
        cors.allow_any_origin()
    } else {
        config
            .cors_origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = AppConfig::from_env().map_err(|e| io::Error::other(format!("{:#}", e)))?;

    init_logging(config.log_format);
    info!("Logging initialized successfully");

    if config.uses_dev_secret() {
        warn!("JWT_SECRET not set; using development secret");
    }

    info!("Creating repositories and services");
    let state = web::Data::new(AppState::in_memory(
        config.jwt_secret.clone(),
        config.token_ttl(),
    ));

    let bind_addr = format!("{}:{}", config.host, config.port);
    info!(address = %bind_addr, "Configuring HTTP server");

    let server_config = config.clone();
    let server = HttpServer::new(move || {
        tracing::trace!("Creating new application instance");
        App::new()
            .app_data(state.clone())
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(cors(&server_config))
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?;

    info!(address = %bind_addr, "Starting HTTP server");
    server.run().await
}
