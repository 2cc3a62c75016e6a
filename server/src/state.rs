use std::{net::IpAddr, path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use tracing::warn;

use crate::{
	catalog::{ACCOUNTS_URL, API_URL, Catalog, Credentials, TokenCache},
	error::AppResult,
	media::{MediaSources, ProcessRunner, linux, mac},
	platform::Platform,
	resolver::NowPlayingResolver,
};

/// Serve the currently playing track and its cover art as JSON.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
	/// Spotify application client id
	#[arg(long, env = "SPOTIFY_CLIENT_ID")]
	pub client_id: Option<String>,

	/// Spotify application client secret
	#[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
	pub client_secret: Option<String>,

	/// MPRIS player instance queried through playerctl
	#[arg(long, env = "PLAYERCTL_INSTANCE", default_value = linux::DEFAULT_INSTANCE)]
	pub playerctl_instance: String,

	/// Browser whose active tab is read on macOS
	#[arg(long, env = "NOW_PLAYING_BROWSER", default_value = mac::DEFAULT_BROWSER)]
	pub browser: String,

	#[arg(long, env = "HOST", default_value = "0.0.0.0")]
	pub host: IpAddr,

	#[arg(short, long, env = "PORT", default_value_t = 3000)]
	pub port: u16,

	/// Directory holding now-playing.html and its assets
	#[arg(long, env = "PUBLIC_DIR", default_value = "public")]
	pub public_dir: PathBuf,

	/// Upper bound on the media query, in milliseconds
	#[arg(long, env = "COMMAND_TIMEOUT_MS", default_value_t = 2000)]
	pub command_timeout_ms: u64,

	/// Upper bound on each Spotify request, in milliseconds
	#[arg(long, env = "HTTP_TIMEOUT_MS", default_value_t = 5000)]
	pub http_timeout_ms: u64,

	#[arg(long, env = "SPOTIFY_ACCOUNTS_URL", default_value = ACCOUNTS_URL, hide = true)]
	pub accounts_url: String,

	#[arg(long, env = "SPOTIFY_API_URL", default_value = API_URL, hide = true)]
	pub api_url: String,
}

impl Config {
	pub fn credentials(&self) -> Option<Credentials> {
		Credentials::from_parts(self.client_id.clone(), self.client_secret.clone())
	}

	pub fn sources(&self) -> MediaSources {
		MediaSources {
			playerctl_instance: self.playerctl_instance.clone(),
			browser: self.browser.clone(),
		}
	}

	pub fn command_timeout(&self) -> Duration {
		Duration::from_millis(self.command_timeout_ms)
	}

	pub fn http_timeout(&self) -> Duration {
		Duration::from_millis(self.http_timeout_ms)
	}

	/// Wire up the resolver for the host this process runs on.
	pub fn resolver(&self) -> AppResult<NowPlayingResolver> {
		let credentials = self.credentials();
		if credentials.is_none() {
			warn!("SPOTIFY_CLIENT_ID or SPOTIFY_CLIENT_SECRET is not set, every lookup will fail");
		}

		let rq = reqwest::Client::builder()
			.timeout(self.http_timeout())
			.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
			.build()?;

		let tokens = TokenCache::new(rq.clone(), &self.accounts_url, credentials);

		Ok(NowPlayingResolver::new(
			Platform::current(),
			self.sources(),
			Arc::new(ProcessRunner::new(self.command_timeout())),
			Catalog::new(rq, &self.api_url, tokens),
		))
	}
}

#[derive(Clone)]
pub struct AppState {
	pub resolver: Arc<NowPlayingResolver>,
}

impl AppState {
	pub fn new(resolver: NowPlayingResolver) -> Self {
		Self {
			resolver: Arc::new(resolver),
		}
	}
}
