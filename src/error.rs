//! src/error.rs

use crate::domain::ValidationError;
use crate::transport::{ConfigurationError, TransportError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

pub type IntakeResult<T> = Result<T, Error>;

fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// JSON body of every error response.
#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(thiserror::Error)]
pub enum Error {
    #[error("All fields are required")]
    ValidationError(#[from] ValidationError),
    #[error("Email configuration missing")]
    ConfigurationError(#[from] ConfigurationError),
    #[error("Failed to send email")]
    ProviderError(#[source] anyhow::Error),
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("Internal server error")]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Configuration(err) => Error::ConfigurationError(err),
            err => Error::ProviderError(err.into()),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::ValidationError(_) => StatusCode::BAD_REQUEST,
            Error::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Error::ConfigurationError(_)
            | Error::ProviderError(_)
            | Error::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // provider and unexpected failures are only described in the server logs
        let details = match self {
            Error::ConfigurationError(err) => Some(err.to_string()),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            details,
        })
    }
}
