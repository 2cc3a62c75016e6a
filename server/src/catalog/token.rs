use std::fmt::{self, Debug};

use base64::{Engine, prelude::BASE64_STANDARD};
use jiff::Timestamp;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{Level, debug, info};

use crate::error::{AuthError, NowPlayingError};

pub const ACCOUNTS_URL: &str = "https://accounts.spotify.com/api/token";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	pub client_id: String,
	pub client_secret: String,
}

impl Credentials {
	/// Both halves must be present and non-empty.
	pub fn from_parts(client_id: Option<String>, client_secret: Option<String>) -> Option<Self> {
		match (client_id, client_secret) {
			(Some(client_id), Some(client_secret))
				if !client_id.is_empty() && !client_secret.is_empty() =>
			{
				Some(Self {
					client_id,
					client_secret,
				})
			}
			_ => None,
		}
	}

	fn basic_authorization(&self) -> String {
		let pair = format!("{}:{}", self.client_id, self.client_secret);
		format!("Basic {}", BASE64_STANDARD.encode(pair))
	}
}

impl Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.finish()
	}
}

#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
	value: String,
	fetched_at: Timestamp,
}

impl AccessToken {
	pub fn as_str(&self) -> &str {
		&self.value
	}
}

impl Debug for AccessToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AccessToken")
			.field("value", &"<redacted>")
			.field("fetched_at", &self.fetched_at)
			.finish()
	}
}

#[derive(Deserialize)]
struct TokenResponse {
	access_token: String,
	expires_in: Option<u64>,
}

/// Single-slot cache for the client-credentials token.
///
/// The token is fetched on first use and kept for the life of the process.
/// The slot is not held across the exchange, so overlapping first requests
/// may each fetch a token; whichever lands last is kept.
#[derive(Debug)]
pub struct TokenCache {
	credentials: Option<Credentials>,
	token_url: String,
	rq: reqwest::Client,
	slot: Mutex<Option<AccessToken>>,
}

impl TokenCache {
	pub fn new(
		rq: reqwest::Client,
		token_url: impl Into<String>,
		credentials: Option<Credentials>,
	) -> Self {
		Self {
			credentials,
			token_url: token_url.into(),
			rq,
			slot: Mutex::default(),
		}
	}

	pub async fn get_token(&self) -> Result<AccessToken, NowPlayingError> {
		let cached = self.slot.lock().await.clone();
		if let Some(token) = cached {
			// never refreshed, so a stale token shows up here first
			debug!(age = ?Timestamp::now().duration_since(token.fetched_at), "reusing access token");
			return Ok(token);
		}

		let credentials = self.credentials.as_ref().ok_or(NowPlayingError::Config)?;
		let token = self.fetch(credentials).await?;

		*self.slot.lock().await = Some(token.clone());
		Ok(token)
	}

	#[cfg(test)]
	pub(crate) async fn cached(&self) -> Option<AccessToken> {
		self.slot.lock().await.clone()
	}

	#[tracing::instrument(skip_all, fields(url = %self.token_url), level = Level::INFO)]
	async fn fetch(&self, credentials: &Credentials) -> Result<AccessToken, NowPlayingError> {
		let response = async {
			self.rq
				.post(&self.token_url)
				.header("authorization", credentials.basic_authorization())
				.form(&[("grant_type", "client_credentials")])
				.send()
				.await?
				.error_for_status()?
				.json::<TokenResponse>()
				.await
		}
		.await
		.map_err(AuthError::from)?;

		// an empty token must not reach the slot
		if response.access_token.is_empty() {
			return Err(AuthError::EmptyToken.into());
		}

		info!(expires_in = ?response.expires_in, "fetched access token");

		Ok(AccessToken {
			value: response.access_token,
			fetched_at: Timestamp::now(),
		})
	}
}
