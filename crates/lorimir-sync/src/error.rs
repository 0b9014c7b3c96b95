use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create directory '{path}': {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write '{path}': {source}")]
    WriteFile { path: PathBuf, source: io::Error },

    #[error("failed to read marker '{path}': {source}")]
    ReadMarker { path: PathBuf, source: io::Error },

    #[error("failed to write marker '{path}': {source}")]
    WriteMarker { path: PathBuf, source: io::Error },

    #[error("failed to encode '{path}': {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("link '{link}' has no filename component")]
    BadLink { link: String },

    #[error("api request failed: {source}")]
    Api { source: lorimir_api::Error },
}

impl From<lorimir_api::Error> for Error {
    fn from(e: lorimir_api::Error) -> Self {
        Self::Api { source: e }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
