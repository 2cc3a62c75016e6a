use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::error::MetadataError;

pub mod linux;
pub mod mac;
pub mod process;

pub use process::{CommandRunner, ProcessRunner};

/// Separator both media queries place between the two fields.
pub const SEPARATOR: &str = " - ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlayingData {
	pub artist: String,
	pub title: String,
	/// Empty when the catalog has no match.
	pub cover_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
	pub artist: String,
	pub title: String,
}

/// Which field comes first in a media query's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrder {
	ArtistTitle,
	TitleArtist,
}

/// A media query: the program to run and how to read what it prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCommand {
	pub program: String,
	pub args: Vec<String>,
	pub order: FieldOrder,
}

impl Display for MediaCommand {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.program)?;
		for arg in &self.args {
			write!(f, " {arg:?}")?;
		}
		Ok(())
	}
}

/// Per-platform settings used to build a [`MediaCommand`].
#[derive(Debug, Clone)]
pub struct MediaSources {
	pub playerctl_instance: String,
	pub browser: String,
}

impl Track {
	/// Parse `"{first} - {second}"` according to `order`, then normalize both fields.
	pub fn parse(raw: &str, order: FieldOrder) -> Result<Self, MetadataError> {
		let raw = raw.trim();
		let mut segments = raw.split(SEPARATOR);
		let (Some(first), Some(second)) = (segments.next(), segments.next()) else {
			return Err(MetadataError::Unparseable(raw.to_owned()));
		};

		let (artist, title) = match order {
			FieldOrder::ArtistTitle => (first, second),
			FieldOrder::TitleArtist => (second, first),
		};

		Ok(Self {
			artist: primary_artist(artist),
			title: clean_title(title),
		})
	}

	pub fn search_query(&self) -> String {
		format!("{} {}", self.artist, self.title)
	}

	pub fn with_cover(self, cover_url: String) -> NowPlayingData {
		NowPlayingData {
			artist: self.artist,
			title: self.title,
			cover_url,
		}
	}
}

// "A, B" keeps only "A"
fn primary_artist(artist: &str) -> String {
	artist.split(',').next().unwrap_or_default().trim().to_owned()
}

fn clean_title(title: &str) -> String {
	title.strip_suffix('-').unwrap_or(title).trim().to_owned()
}
