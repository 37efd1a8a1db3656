use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("unknown section: {0}")]
    UnknownSection(String),
    #[error("unknown scene: {0}")]
    UnknownScene(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("config: {0}")]
    ConfigJson(#[from] serde_json::Error),
}
