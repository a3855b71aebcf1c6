pub mod game_data;
pub mod pgn;

pub use game_data::GameRecord;
pub use pgn::{parse_mainline, Mainline, PgnError};
