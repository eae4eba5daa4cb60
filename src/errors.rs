use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] confy::ConfyError),
    #[error("Database path {0} appears to be incorrect")]
    DatabasePathIncorrect(String),
    #[error("API key is not valid")]
    InvalidApiKey,
    #[error("Lookup API host is not a valid URL: {0}")]
    InvalidApiHost(#[from] url::ParseError),
    #[error("Lookup request failed with status {status}: {body}")]
    LookupStatus { status: u16, body: String },
    #[error("Expected {expected} lookup results but received {actual}")]
    MisalignedResponse { expected: usize, actual: usize },
    #[error("No -apikey specified")]
    MissingApiKey,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Rusqlite(#[from] rusqlite::Error),
}

pub type AppResult<T> = Result<T, AppError>;
