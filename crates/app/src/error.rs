use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Engine(#[from] engine::EngineError),
    #[error("table view error: {0}")]
    View(#[from] ledger_tui::ViewError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Standard input ended while the menu was waiting for an answer.
    #[error("input closed")]
    InputClosed,
}
