use std::{net::SocketAddr, path::Path};

use axum::{Json, Router, extract::State, routing::get};
use tokio::{net::TcpListener, signal};
use tower_http::{
	services::{ServeDir, ServeFile},
	trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info, warn};

use crate::{
	error::{AppResult, NowPlayingError},
	media::NowPlayingData,
	state::{AppState, Config},
};

pub fn router(state: AppState, public_dir: &Path) -> Router {
	Router::new()
		.route("/now-playing-data", get(now_playing_data))
		.route_service(
			"/now-playing",
			ServeFile::new(public_dir.join("now-playing.html")),
		)
		.fallback_service(ServeDir::new(public_dir))
		.layer(
			TraceLayer::new_for_http()
				.make_span_with(DefaultMakeSpan::new().level(Level::INFO))
				.on_response(DefaultOnResponse::new().level(Level::INFO))
				// the handler logs the cause at error
				.on_failure(DefaultOnFailure::new().level(Level::WARN)),
		)
		.with_state(state)
}

pub async fn serve(config: Config) -> AppResult<()> {
	let state = AppState::new(config.resolver()?);
	let router = router(state, &config.public_dir);

	let listener = TcpListener::bind(SocketAddr::new(config.host, config.port)).await?;
	info!(addr = %listener.local_addr()?, public_dir = %config.public_dir.display(), "server running");

	axum::serve(listener, router)
		.with_graceful_shutdown(shutdown())
		.await?;

	Ok(())
}

// details are logged here and never reach the client
#[tracing::instrument(skip_all, err)]
async fn now_playing_data(
	State(AppState { resolver }): State<AppState>,
) -> Result<Json<NowPlayingData>, NowPlayingError> {
	Ok(Json(resolver.resolve().await?))
}

async fn shutdown() {
	if let Err(err) = signal::ctrl_c().await {
		warn!(%err, "failed to listen for ctrl-c, running until killed");
		std::future::pending::<()>().await;
	}
	info!("shutting down");
}
