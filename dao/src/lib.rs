use std::sync::Arc;

use thiserror::Error;

pub mod booking;
pub mod payment;
pub mod shop;

#[derive(Error, Debug)]
pub enum DaoError {
    #[error("Transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),

    #[error("Invalid endpoint url: {0}")]
    InvalidUrl(Arc<str>),

    #[error("Invalid request: {0}")]
    InvalidRequest(Arc<str>),

    #[error("Unexpected response status: {0}")]
    UnexpectedStatus(u16),

    #[error("Malformed response: {0}")]
    MalformedResponse(Arc<str>),

    #[error("Rejected by server: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<Arc<str>>),
}
