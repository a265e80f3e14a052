use actix_web::HttpResponse;
use thiserror::Error;

use crate::http::Envelope;

pub type Res<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    JWT(#[from] jsonwebtoken::errors::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    // === APPLICATION ERRORS ===
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn to_http_response(&self) -> HttpResponse {
        let is_dev = cfg!(debug_assertions);

        let to_internal_json = |err_msg: &str| {
            if is_dev {
                Envelope::failure(err_msg)
            } else {
                Envelope::failure("Internal server error")
            }
        };

        match self {
            // === CONVERSION ERRORS ===
            AppError::Database(error) => {
                log::error!("Database error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
            AppError::JWT(error) => {
                log::error!("JWT error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
            AppError::Reqwest(error) => {
                log::error!("Reqwest error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }

            // === APPLICATION ERRORS ===
            AppError::Unauthorized(_) => {
                HttpResponse::Unauthorized().json(Envelope::failure(&self.to_string()))
            }
            AppError::Forbidden(_) => {
                HttpResponse::Forbidden().json(Envelope::failure(&self.to_string()))
            }
            AppError::NotFound(_) => {
                HttpResponse::NotFound().json(Envelope::failure(&self.to_string()))
            }
            AppError::BadRequest(_) => {
                HttpResponse::BadRequest().json(Envelope::failure(&self.to_string()))
            }
            AppError::Conflict(_) => {
                HttpResponse::Conflict().json(Envelope::failure(&self.to_string()))
            }

            AppError::Internal(error) => {
                log::error!("Internal error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(error))
            }
        }
    }

    /// Maps a missing row to `NotFound`, leaving other errors untouched.
    pub fn or_not_found(self, what: &str) -> Self {
        match self {
            AppError::Database(sqlx::Error::RowNotFound) => {
                AppError::NotFound(format!("{} not found", what))
            }
            other => other,
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{ResponseError, body, http::StatusCode};
    use serde_json::Value;

    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let res = err.error_response();
        let status = res.status();
        let bytes = body::to_bytes(res.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn application_errors_use_failure_envelope() {
        let (status, json) = body_json(AppError::Forbidden("Unauthorized".into())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["response"], false);
        assert_eq!(json["message"], "Unauthorized");
        assert!(json["data"].is_null());

        let (status, _) = body_json(AppError::Conflict("taken".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn database_errors_are_internal() {
        let (status, json) = body_json(AppError::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["response"], false);
    }

    #[test]
    fn row_not_found_becomes_not_found() {
        let err = AppError::Database(sqlx::Error::RowNotFound).or_not_found("User");
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "User not found"));

        let err = AppError::BadRequest("x".into()).or_not_found("User");
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
