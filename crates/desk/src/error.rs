use client::ClientError;
use engine::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("api error: {0}")]
    Client(#[from] ClientError),
    #[error("{0}")]
    Engine(#[from] EngineError),
    #[error("invalid setting: {0}")]
    Setting(String),
}
