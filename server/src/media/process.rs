use std::time::Duration;

use async_trait::async_trait;
use tokio::{process::Command, time::timeout};
use tracing::Level;

use super::MediaCommand;
use crate::error::MetadataError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Runs a media query and hands back its stdout.
#[async_trait]
pub trait CommandRunner: Send + Sync {
	async fn run(&self, command: &MediaCommand) -> Result<String, MetadataError>;
}

#[derive(Debug, Clone)]
pub struct ProcessRunner {
	timeout: Duration,
}

impl ProcessRunner {
	pub fn new(timeout: Duration) -> Self {
		Self { timeout }
	}
}

impl Default for ProcessRunner {
	fn default() -> Self {
		Self::new(DEFAULT_TIMEOUT)
	}
}

#[async_trait]
impl CommandRunner for ProcessRunner {
	#[tracing::instrument(skip_all, fields(command = %command), ret, err, level = Level::DEBUG)]
	async fn run(&self, command: &MediaCommand) -> Result<String, MetadataError> {
		// the child is killed if the timeout drops the future
		let output = Command::new(&command.program)
			.args(&command.args)
			.kill_on_drop(true)
			.output();

		let output = timeout(self.timeout, output)
			.await
			.map_err(|_| MetadataError::TimedOut(self.timeout))?
			.map_err(MetadataError::Spawn)?;

		if !output.status.success() {
			return Err(MetadataError::Exit {
				status: output.status,
				stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
			});
		}

		Ok(String::from_utf8_lossy(&output.stdout).into_owned())
	}
}
