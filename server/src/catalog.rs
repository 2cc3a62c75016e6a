use serde::Deserialize;
use tracing::Level;

use crate::{error::NowPlayingError, media::Track};

mod token;

pub use token::{ACCOUNTS_URL, AccessToken, Credentials, TokenCache};

pub const API_URL: &str = "https://api.spotify.com/v1";

/// Spotify search client.
#[derive(Debug)]
pub struct Catalog {
	pub base_url: String,
	rq: reqwest::Client,
	tokens: TokenCache,
}

impl Catalog {
	pub fn new(rq: reqwest::Client, base_url: impl Into<String>, tokens: TokenCache) -> Self {
		Self {
			base_url: base_url.into(),
			rq,
			tokens,
		}
	}

	#[cfg(test)]
	pub(crate) fn tokens(&self) -> &TokenCache {
		&self.tokens
	}

	/// Cover art of the best match for `track`, or an empty string when nothing matches.
	#[tracing::instrument(skip(self), ret, level = Level::INFO)]
	pub async fn find_cover(&self, track: &Track) -> Result<String, NowPlayingError> {
		let token = self.tokens.get_token().await?;

		// built by hand so the query is encoded as %20 rather than +
		let url = format!(
			"{}/search?q={}&type=track&limit=1",
			self.base_url,
			urlencoding::encode(&track.search_query())
		);

		let response = async {
			self.rq
				.get(&url)
				.bearer_auth(token.as_str())
				.send()
				.await?
				.error_for_status()?
				.json::<SearchResponse>()
				.await
		}
		.await
		.map_err(NowPlayingError::CatalogSearch)?;

		Ok(response.cover_url().unwrap_or_default())
	}
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
	#[serde(default)]
	tracks: Page,
}

#[derive(Debug, Default, Deserialize)]
struct Page {
	items: Vec<TrackItem>,
}

#[derive(Debug, Deserialize)]
struct TrackItem {
	album: Album,
}

#[derive(Debug, Deserialize)]
struct Album {
	#[serde(default)]
	images: Vec<Image>,
}

#[derive(Debug, Deserialize)]
struct Image {
	url: String,
}

impl SearchResponse {
	fn cover_url(self) -> Option<String> {
		let track = self.tracks.items.into_iter().next()?;
		let image = track.album.images.into_iter().next()?;
		Some(image.url)
	}
}
