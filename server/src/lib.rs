use clap::Parser;
use tracing_subscriber::EnvFilter;

pub use crate::{
	error::{AppError, AppResult, NowPlayingError},
	media::NowPlayingData,
	resolver::NowPlayingResolver,
	state::Config,
};

pub mod catalog;
pub mod error;
pub mod media;
pub mod platform;
pub mod resolver;
pub mod serve;
pub mod state;
#[cfg(test)]
pub mod test_utils;

const DEFAULT_FILTER: &str = "now_playing=info,now_playing_lib=info,tower_http=info";

pub fn run() -> AppResult<()> {
	// a missing .env is fine, the environment may already be set
	let _ = dotenvy::dotenv();

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_file(cfg!(debug_assertions))
		.with_line_number(cfg!(debug_assertions))
		.init();

	let config = Config::parse();

	// requests are interleaved on one thread
	tokio::runtime::Builder::new_current_thread()
		.enable_all()
		.build()?
		.block_on(serve::serve(config))
}
