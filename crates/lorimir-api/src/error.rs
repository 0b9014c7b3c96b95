use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The login endpoint refused the credentials; `body` is the raw
    /// response so callers can surface it verbatim.
    #[error("login rejected with HTTP {status}")]
    LoginRejected { status: StatusCode, body: String },

    #[error("unexpected HTTP {status} from {url}")]
    UnexpectedStatus { url: String, status: StatusCode },

    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
