use std::{fmt::Display, io, process::ExitStatus, time::Duration};

use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use serde_json::json;

/// Error returned to clients for every failed resolution.
pub const PUBLIC_ERROR_MESSAGE: &str = "Error fetching data";

/// Bootstrap failures: binding, client construction, runtime setup.
#[derive(Debug)]
pub struct AppError(anyhow::Error);
pub type AppResult<T, E = AppError> = std::result::Result<T, E>;

impl<E> From<E> for AppError
where
	E: Into<anyhow::Error>,
{
	fn from(value: E) -> Self {
		Self(value.into())
	}
}

impl Display for AppError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:#}", self.0)
	}
}

#[derive(Debug, thiserror::Error)]
pub enum NowPlayingError {
	#[error("spotify client credentials are not configured")]
	Config,
	#[error("failed to fetch spotify access token: {0}")]
	AuthFetch(#[from] AuthError),
	#[error("no media query is available for platform {0:?}")]
	PlatformUnsupported(String),
	#[error("now playing metadata is unavailable: {0}")]
	MetadataUnavailable(#[from] MetadataError),
	#[error("catalog search failed: {0}")]
	CatalogSearch(#[source] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
	#[error(transparent)]
	Http(#[from] reqwest::Error),
	#[error("token endpoint returned an empty access token")]
	EmptyToken,
}

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
	#[error("failed to start media query: {0}")]
	Spawn(#[source] io::Error),
	#[error("media query failed ({status}): {stderr}")]
	Exit { status: ExitStatus, stderr: String },
	#[error("media query timed out after {0:?}")]
	TimedOut(Duration),
	#[error("unexpected media query output {0:?}")]
	Unparseable(String),
}

impl IntoResponse for NowPlayingError {
	fn into_response(self) -> Response {
		(
			StatusCode::INTERNAL_SERVER_ERROR,
			Json(json!({ "error": PUBLIC_ERROR_MESSAGE })),
		)
			.into_response()
	}
}
