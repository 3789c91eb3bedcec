use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("Invalid credentials or account deactivated")]
    UnauthenticatedError,
    #[error("This operation is not permitted")]
    ForbiddenOperation,
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("Could not save {}", path.display())]
    PersistenceError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Input stream closed")]
    InputClosed,
    #[error(transparent)]
    TerminalError(#[from] std::io::Error),
}

impl AppError {
    // 呼び出し側に戻して再入力させてよいエラーかどうか
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            AppError::ConversionEntityError(_)
                | AppError::PersistenceError { .. }
                | AppError::InputClosed
                | AppError::TerminalError(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
