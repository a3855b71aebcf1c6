pub mod chess_com;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod run;
pub mod stockfish;

#[cfg(all(test, unix))]
pub(crate) mod testing;

pub use config::GeneratorConfig;
pub use error::GeneratorError;
pub use run::run;
