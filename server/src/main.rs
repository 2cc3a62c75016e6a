fn main() -> now_playing_lib::AppResult<()> {
	now_playing_lib::run()
}
