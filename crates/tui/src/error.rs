use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Fatal startup/teardown failures. Gateway request errors never land
/// here: they are mapped to `client::ClientError` and rendered as
/// screen messages, keeping the session alive.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid base_url: {0}")]
    BaseUrl(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("terminal error: {0}")]
    Terminal(String),
}
