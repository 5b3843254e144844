use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product with id '{0}' was not found.")]
    NotFound(i32),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error: invalid category '{0}'")]
    InvalidCategory(String),

    /// Field constraints (lengths, price range) that failed
    #[error("Validation error: {0}")]
    InvalidFields(#[from] ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        ProductError::Internal(format!("Database error: {}", err))
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound(err.to_string()),
            ProductError::Validation(_) | ProductError::InvalidCategory(_) => {
                AppError::BadRequest(err.to_string())
            }
            ProductError::InvalidFields(errors) => AppError::ValidationError(errors),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
