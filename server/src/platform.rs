use std::env::consts::OS;

use crate::{
	error::NowPlayingError,
	media::{MediaCommand, MediaSources, linux, mac},
};

/// Host platforms, grouped by how now-playing metadata is read on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
	/// MPRIS desktops, queried through playerctl.
	Linux,
	/// Queried through AppleScript against the browser.
	MacOs,
	/// Anything without a media query, Windows included.
	Unsupported(String),
}

impl Platform {
	pub fn current() -> Self {
		Self::from_os(OS)
	}

	/// Classify a `std::env::consts::OS` identifier.
	pub fn from_os(os: &str) -> Self {
		match os {
			"linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Self::Linux,
			"macos" => Self::MacOs,
			other => Self::Unsupported(other.to_owned()),
		}
	}

	pub fn media_command(&self, sources: &MediaSources) -> Result<MediaCommand, NowPlayingError> {
		match self {
			Self::Linux => Ok(linux::playerctl(&sources.playerctl_instance)),
			Self::MacOs => Ok(mac::active_tab(&sources.browser)),
			Self::Unsupported(os) => Err(NowPlayingError::PlatformUnsupported(os.clone())),
		}
	}
}
