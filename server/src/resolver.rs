use std::sync::Arc;

use tracing::{Level, debug};

use crate::{
	catalog::Catalog,
	error::NowPlayingError,
	media::{CommandRunner, MediaSources, NowPlayingData, Track},
	platform::Platform,
};

/// Reads the local now-playing track and looks up its cover art.
pub struct NowPlayingResolver {
	platform: Platform,
	sources: MediaSources,
	runner: Arc<dyn CommandRunner>,
	catalog: Catalog,
}

impl NowPlayingResolver {
	pub fn new(
		platform: Platform,
		sources: MediaSources,
		runner: Arc<dyn CommandRunner>,
		catalog: Catalog,
	) -> Self {
		Self {
			platform,
			sources,
			runner,
			catalog,
		}
	}

	#[cfg(test)]
	pub(crate) fn catalog(&self) -> &Catalog {
		&self.catalog
	}

	// failures are logged once, by the HTTP handler
	#[tracing::instrument(skip(self), fields(platform = ?self.platform), level = Level::INFO)]
	pub async fn resolve(&self) -> Result<NowPlayingData, NowPlayingError> {
		let command = self.platform.media_command(&self.sources)?;
		let output = self.runner.run(&command).await?;

		let track = Track::parse(&output, command.order)?;
		debug!(artist = %track.artist, title = %track.title, "cleaned metadata");

		let cover_url = self.catalog.find_cover(&track).await?;
		Ok(track.with_cover(cover_url))
	}
}
