use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use crate::repository::RepositoryError;

use super::domain::{Credentials, Registration};
use super::repository::UserRepository;
use super::service::{AccountService, AccountServiceError};

/// Router builder exposing registration and login over HTTP.
pub fn auth_router<R>(service: Arc<AccountService<R>>) -> Router
where
    R: UserRepository + 'static,
{
    Router::new()
        .route("/api/v1/auth/register", post(register_handler::<R>))
        .route("/api/v1/auth/login", post(login_handler::<R>))
        .with_state(service)
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<AccountService<R>>>,
    axum::Json(registration): axum::Json<Registration>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.register(registration) {
        Ok(user) => (StatusCode::CREATED, axum::Json(user)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn login_handler<R>(
    State(service): State<Arc<AccountService<R>>>,
    axum::Json(credentials): axum::Json<Credentials>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.login(&credentials) {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: AccountServiceError) -> Response {
    let status = match &err {
        AccountServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AccountServiceError::EmailTaken
        | AccountServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        AccountServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AccountServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
