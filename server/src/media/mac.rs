use super::{FieldOrder, MediaCommand};

pub const DEFAULT_BROWSER: &str = "Google Chrome";

/// Read the title of the browser's active tab through AppleScript.
///
/// Streaming sites title their tabs `"{title} - {artist}"`, so the field
/// order is the reverse of playerctl's.
pub fn active_tab(browser: &str) -> MediaCommand {
	let script = match browser {
		"Safari" => r#"tell application "Safari" to get name of current tab of front window"#
			.to_owned(),
		browser => format!(r#"tell application "{browser}" to get title of active tab of front window"#),
	};

	MediaCommand {
		program: "osascript".to_owned(),
		args: vec!["-e".to_owned(), script],
		order: FieldOrder::TitleArtist,
	}
}
