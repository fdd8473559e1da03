use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod controller;

pub use controller::ReceptionController;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Type constraint violation: {0}")]
    TypeConstraint(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
