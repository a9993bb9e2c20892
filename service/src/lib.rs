use std::sync::Arc;

use thiserror::Error;

pub mod booking;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod navigation;
pub mod payment;
pub mod session;
pub mod uuid_service;
pub mod wizard;

pub const NETWORK_ERROR_MESSAGE: &str = "A network error occurred. Please try again.";
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Cannot process the server response.";
pub const CATALOG_FAILED_MESSAGE: &str = "The shops could not be loaded.";

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ValidationFailureItem {
    MissingField(Arc<str>),
    InvalidValue(Arc<str>),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Data access error: {0}")]
    DataAccessError(#[from] dao::DaoError),

    #[error("Entity {0} not found")]
    EntityNotFound(Arc<str>),

    #[error("Configuration error: {0}")]
    ConfigError(Arc<str>),
}

impl ServiceError {
    pub fn user_message(&self) -> Arc<str> {
        match self {
            ServiceError::DataAccessError(err) => {
                CallFailure::from(err).user_message(CATALOG_FAILED_MESSAGE)
            }
            ServiceError::EntityNotFound(_) => "The shop could not be found.".into(),
            ServiceError::ConfigError(_) => CATALOG_FAILED_MESSAGE.into(),
        }
    }
}

/// Failure of a single call against the marketplace API.
///
/// Both phases of a booking (create booking, initiate payment) report their
/// call failures with this type, wrapped in their own phase error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CallFailure {
    #[error("Transport failure: {0}")]
    Transport(Arc<str>),

    #[error("Unexpected response status {0}")]
    UnexpectedStatus(u16),

    #[error("Malformed response: {0}")]
    MalformedResponse(Arc<str>),

    #[error("Rejected: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<Arc<str>>),
}

impl From<&dao::DaoError> for CallFailure {
    fn from(err: &dao::DaoError) -> Self {
        match err {
            dao::DaoError::UnexpectedStatus(status) => Self::UnexpectedStatus(*status),
            dao::DaoError::MalformedResponse(reason) => Self::MalformedResponse(reason.clone()),
            dao::DaoError::Rejected(message) => Self::Rejected(message.clone()),
            dao::DaoError::Transport(_)
            | dao::DaoError::InvalidUrl(_)
            | dao::DaoError::InvalidRequest(_) => {
                Self::Transport(err.to_string().into())
            }
        }
    }
}
salon_utils::derive_from_reference!(dao::DaoError, CallFailure);

impl CallFailure {
    /// Text shown to the customer. Server messages are passed through verbatim.
    pub fn user_message(&self, fallback: &str) -> Arc<str> {
        match self {
            CallFailure::Transport(_) | CallFailure::UnexpectedStatus(_) => {
                NETWORK_ERROR_MESSAGE.into()
            }
            CallFailure::MalformedResponse(_) => MALFORMED_RESPONSE_MESSAGE.into(),
            CallFailure::Rejected(Some(message)) if !message.trim().is_empty() => message.clone(),
            CallFailure::Rejected(_) => fallback.into(),
        }
    }
}
