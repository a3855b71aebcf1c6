/// One downloaded game. Only `id` and `pgn` are read by the puzzle pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub id: String,
    pub pgn: String,
}

impl GameRecord {
    pub fn new(id: impl Into<String>, pgn: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pgn: pgn.into(),
        }
    }
}
