use crate::accounts::AccountServiceError;
use crate::config::ConfigError;
use crate::marketplace::import::ListingImportError;
use crate::marketplace::MarketplaceServiceError;
use crate::telemetry::TelemetryError;
use crate::transport::TransportServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Import(ListingImportError),
    Transport(TransportServiceError),
    Marketplace(MarketplaceServiceError),
    Account(AccountServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Transport(err) => write!(f, "transport registry error: {}", err),
            AppError::Marketplace(err) => write!(f, "marketplace registry error: {}", err),
            AppError::Account(err) => write!(f, "account registry error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Transport(err) => Some(err),
            AppError::Marketplace(err) => Some(err),
            AppError::Account(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Transport(_)
            | AppError::Marketplace(_)
            | AppError::Account(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ListingImportError> for AppError {
    fn from(value: ListingImportError) -> Self {
        Self::Import(value)
    }
}

impl From<TransportServiceError> for AppError {
    fn from(value: TransportServiceError) -> Self {
        Self::Transport(value)
    }
}

impl From<MarketplaceServiceError> for AppError {
    fn from(value: MarketplaceServiceError) -> Self {
        Self::Marketplace(value)
    }
}

impl From<AccountServiceError> for AppError {
    fn from(value: AccountServiceError) -> Self {
        Self::Account(value)
    }
}
