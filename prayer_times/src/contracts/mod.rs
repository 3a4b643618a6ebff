pub mod detect_region;
pub mod fetch_timings;
pub mod next_prayer;
pub mod refresh_board;
