mod state;
mod v1;

use crate::state::AppState;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use shared::error::InitializationError;
use shared::{initialize_db, load_config, shutdown_listener};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(InitializationError::from)?;

    let config = load_config().map_err(InitializationError::from)?;
    let pool = initialize_db(&config.database).await?;
    let state = AppState::new(pool.clone(), &config);

    let shutdown_token = CancellationToken::new();
    tokio::spawn(shutdown_listener(Some(shutdown_token.clone())));

    let app = Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .nest("/v1", v1::router(state))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let listen_addr = &config.server.listen_addr;
    info!("starting server at {listen_addr}");
    let listener = TcpListener::bind(listen_addr).await?;
    serve(listener, app, shutdown_token).await?;

    pool.close().await;
    info!(name: "db.closed", "db pool closed");

    Ok(())
}

async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
}
