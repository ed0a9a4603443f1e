use thiserror::Error;

#[derive(Error, Debug)]
pub enum DexError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for DexError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DexError::Decode(err.to_string())
        } else {
            DexError::Api(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DexError {
    fn from(err: serde_json::Error) -> Self {
        DexError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DexError>;
