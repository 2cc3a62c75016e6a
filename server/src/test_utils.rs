//! Shared fixtures for tests.
//!
//! [`FakeSpotify`] serves the accounts and search endpoints on an ephemeral
//! localhost port so the real HTTP clients can be exercised end to end.
//! [`ScriptedRunner`] stands in for the media query subprocess.

use std::{
	collections::HashMap,
	sync::{
		Arc, Mutex,
		atomic::{AtomicBool, AtomicUsize, Ordering},
	},
	time::Duration,
};

use async_trait::async_trait;
use axum::{
	Json, Router,
	extract::{Query, State},
	http::{HeaderMap, StatusCode},
	routing::{get, post},
};
use serde_json::{Value, json};
use tokio::{net::TcpListener, time::sleep};

use crate::{
	catalog::Credentials,
	error::MetadataError,
	media::{CommandRunner, MediaCommand},
};

pub const TEST_TOKEN: &str = "test-access-token";
pub const TEST_COVER: &str = "https://i.scdn.co/image/one-more-time";

pub fn test_credentials() -> Credentials {
	Credentials {
		client_id: "test-client".into(),
		client_secret: "test-secret".into(),
	}
}

/// Search body with a single track whose album has one image.
pub fn one_track() -> Value {
	json!({
		"tracks": {
			"items": [
				{ "album": { "images": [{ "url": TEST_COVER, "height": 640, "width": 640 }] } }
			]
		}
	})
}

/// How long the slow switches hold a response back.
pub const SLOW_RESPONSE: Duration = Duration::from_secs(2);

pub fn no_tracks() -> Value {
	json!({ "tracks": { "items": [] } })
}

#[derive(Clone)]
pub struct FakeSpotify {
	pub url: String,
	pub token_requests: Arc<AtomicUsize>,
	pub search_requests: Arc<AtomicUsize>,
	pub reject_tokens: Arc<AtomicBool>,
	pub empty_tokens: Arc<AtomicBool>,
	pub slow_tokens: Arc<AtomicBool>,
	pub fail_search: Arc<AtomicBool>,
	pub slow_search: Arc<AtomicBool>,
	pub search_body: Arc<Mutex<Value>>,
	pub last_query: Arc<Mutex<Option<HashMap<String, String>>>>,
}

impl FakeSpotify {
	pub async fn start() -> Self {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let spotify = Self {
			url: format!("http://{}", listener.local_addr().unwrap()),
			token_requests: Arc::default(),
			search_requests: Arc::default(),
			reject_tokens: Arc::default(),
			empty_tokens: Arc::default(),
			slow_tokens: Arc::default(),
			fail_search: Arc::default(),
			slow_search: Arc::default(),
			search_body: Arc::new(Mutex::new(one_track())),
			last_query: Arc::default(),
		};

		let router = Router::new()
			.route("/api/token", post(Self::token))
			.route("/v1/search", get(Self::search))
			.with_state(spotify.clone());

		tokio::spawn(async move {
			axum::serve(listener, router).await.unwrap();
		});

		spotify
	}

	pub fn token_url(&self) -> String {
		format!("{}/api/token", self.url)
	}

	pub fn api_url(&self) -> String {
		format!("{}/v1", self.url)
	}

	pub fn respond_with(&self, body: Value) {
		*self.search_body.lock().unwrap() = body;
	}

	async fn token(
		State(spotify): State<FakeSpotify>,
		headers: HeaderMap,
		body: String,
	) -> Result<Json<Value>, StatusCode> {
		spotify.token_requests.fetch_add(1, Ordering::SeqCst);
		if spotify.slow_tokens.load(Ordering::SeqCst) {
			sleep(SLOW_RESPONSE).await;
		}

		// base64("test-client:test-secret")
		let expected = "Basic dGVzdC1jbGllbnQ6dGVzdC1zZWNyZXQ=";
		if spotify.reject_tokens.load(Ordering::SeqCst)
			|| headers.get("authorization").and_then(|v| v.to_str().ok()) != Some(expected)
			|| body != "grant_type=client_credentials"
		{
			return Err(StatusCode::UNAUTHORIZED);
		}

		let access_token = if spotify.empty_tokens.load(Ordering::SeqCst) {
			""
		} else {
			TEST_TOKEN
		};

		Ok(Json(json!({
			"access_token": access_token,
			"token_type": "Bearer",
			"expires_in": 3600,
		})))
	}

	async fn search(
		State(spotify): State<FakeSpotify>,
		headers: HeaderMap,
		Query(query): Query<HashMap<String, String>>,
	) -> Result<Json<Value>, StatusCode> {
		spotify.search_requests.fetch_add(1, Ordering::SeqCst);
		*spotify.last_query.lock().unwrap() = Some(query);
		if spotify.slow_search.load(Ordering::SeqCst) {
			sleep(SLOW_RESPONSE).await;
		}

		let expected = format!("Bearer {TEST_TOKEN}");
		if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some(expected.as_str()) {
			return Err(StatusCode::UNAUTHORIZED);
		}
		if spotify.fail_search.load(Ordering::SeqCst) {
			return Err(StatusCode::BAD_GATEWAY);
		}

		Ok(Json(spotify.search_body.lock().unwrap().clone()))
	}
}

/// Client that gives up long before [`SLOW_RESPONSE`].
pub fn impatient_client() -> reqwest::Client {
	reqwest::Client::builder()
		.timeout(Duration::from_millis(100))
		.build()
		.unwrap()
}

/// Media query stand-in that replays fixed output and counts its calls.
#[derive(Default)]
pub struct ScriptedRunner {
	output: Option<String>,
	pub calls: AtomicUsize,
	pub last_command: Mutex<Option<MediaCommand>>,
}

impl ScriptedRunner {
	pub fn printing(output: &str) -> Self {
		Self {
			output: Some(output.to_owned()),
			..Self::default()
		}
	}

	/// Behaves like a missing player binary.
	pub fn failing() -> Self {
		Self::default()
	}
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
	async fn run(&self, command: &MediaCommand) -> Result<String, MetadataError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		*self.last_command.lock().unwrap() = Some(command.clone());

		self.output.clone().ok_or_else(|| {
			MetadataError::Spawn(std::io::Error::new(
				std::io::ErrorKind::NotFound,
				"playerctl not found",
			))
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn fake_spotify_checks_the_bearer_token() {
		let spotify = FakeSpotify::start().await;

		let status = reqwest::Client::new()
			.get(format!("{}/search", spotify.api_url()))
			.send()
			.await
			.unwrap()
			.status();

		assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
		assert_eq!(spotify.search_requests.load(Ordering::SeqCst), 1);
	}
}
