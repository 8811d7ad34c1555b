use api::routes::routes;
use api::services::qr::spawn_qr_rotator;
use api::{auth::middleware::log_request, ws::ws_routes};
use axum::{
    Router,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    middleware::from_fn,
};
use migration::{Migrator, MigratorTrait};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing_appender::rolling;
use util::{config, state::AppState, ws::WebSocketManager};

#[tokio::main]
async fn main() {
    let _log_guard = init_logging(&config::log_file());

    if config::jwt_secret().trim().is_empty() {
        tracing::error!("JWT_SECRET is empty; refusing to start");
        eprintln!("JWT_SECRET must be set");
        std::process::exit(1);
    }

    if config::qr_token_ttl_seconds() != config::AppConfig::global().qr_token_ttl_seconds {
        tracing::warn!(
            rotation_seconds = config::qr_rotation_seconds(),
            ttl_seconds = config::qr_token_ttl_seconds(),
            "QR_TOKEN_TTL_SECONDS must exceed QR_ROTATION_SECONDS; raised"
        );
    }

    let db = db::connect().await.expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let app_state = AppState::new(db, WebSocketManager::new());

    spawn_qr_rotator(app_state.clone());

    let cors = CorsLayer::very_permissive().expose_headers([CONTENT_DISPOSITION, CONTENT_TYPE]);

    let app = Router::new()
        .nest("/api", routes(app_state.clone()))
        .nest("/ws", ws_routes(app_state.clone()))
        .layer(from_fn(log_request))
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config::host(), config::port())
        .parse()
        .expect("Invalid address");

    tracing::info!(
        env = %config::env(),
        rotation_seconds = config::qr_rotation_seconds(),
        late_after_minutes = config::late_after_minutes(),
        "Starting {} on http://{}",
        config::project_name(),
        addr
    );
    println!(
        "Starting {} on http://{}:{}",
        config::project_name(),
        config::host(),
        config::port()
    );

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server crashed");
}

fn init_logging(log_file: &str) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true);

    let env_filter =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("api=info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if config::log_to_stdout() {
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}
