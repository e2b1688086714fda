use crate::passage::Difficulty;
use thiserror::Error;

/// Failures from the collaborators around the exercise engine.
///
/// Exercise generation and evaluation never fail; these cover loading
/// passages and reading or writing persisted state.
#[derive(Debug, Error)]
pub enum Error {
    #[error("passage collection `{0}` is not bundled")]
    MissingCollection(String),

    #[error("passage collection `{name}` is not valid utf-8")]
    InvalidEncoding { name: String },

    #[error("failed to parse passage collection `{name}`: {source}")]
    Collection {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no exercise available for difficulty `{0}`")]
    NoPassage(Difficulty),

    #[error("difficulty `{difficulty}` has {available} passages, index {index} is out of range")]
    PassageIndex {
        difficulty: Difficulty,
        index: usize,
        available: usize,
    },

    #[error("no saved exercise to resume")]
    NoSnapshot,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
