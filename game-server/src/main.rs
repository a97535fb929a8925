use std::{sync::Arc, time::Duration};

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::service::GameService;

mod config;
mod handlers;
mod response;
mod roster;
mod service;
mod types;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) service: Arc<RwLock<GameService>>,
}

fn spawn_tick_task(state: AppState, interval_ms: u64) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
        loop {
            ticker.tick().await;
            state.service.write().await.tick();
        }
    });
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        "starting inkgrid game server: bind_addr={} board={}x{} tick_interval_ms={} turns_to_restart={}",
        config.bind_addr,
        config.board_rows,
        config.board_cols,
        config.tick_interval_ms,
        config.turns_to_restart
    );

    let state = AppState {
        service: Arc::new(RwLock::new(GameService::new(&config))),
    };
    spawn_tick_task(state.clone(), config.tick_interval_ms);

    let bind_addr = config.bind_addr.clone();
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .expose_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(handlers::health))
            .route("/api/join", web::post().to(handlers::join))
            .route("/api/leave", web::post().to(handlers::leave))
            .route("/api/input", web::post().to(handlers::input))
            .route("/api/state", web::get().to(handlers::state))
            .route("/api/state/raw", web::get().to(handlers::state_raw))
            .route("/api/restart", web::post().to(handlers::restart))
    })
    .bind(bind_addr)?
    .run()
    .await
}
