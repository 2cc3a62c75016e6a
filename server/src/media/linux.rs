use super::{FieldOrder, MediaCommand};

pub const DEFAULT_INSTANCE: &str = "chromium.instance3";

const FORMAT: &str = "{{ artist }} - {{ title }}";

/// Ask playerctl for the track of one MPRIS player instance.
pub fn playerctl(instance: &str) -> MediaCommand {
	MediaCommand {
		program: "playerctl".to_owned(),
		args: vec![
			"-p".to_owned(),
			instance.to_owned(),
			"metadata".to_owned(),
			"--format".to_owned(),
			FORMAT.to_owned(),
		],
		order: FieldOrder::ArtistTitle,
	}
}
