//! Rejections in the service's `{code, message}` envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub const PASSWORD_POLICY: &str = concat!(
    "Passwords must have at least one non alphanumeric character, one digit ('0'-'9'), ",
    "one uppercase ('A'-'Z'), one lowercase ('a'-'z'), one special character and ",
    "Password must be eight characters or longer.",
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("UserName and Password required.")]
    CredentialsRequired,
    #[error("{}", PASSWORD_POLICY)]
    WeakPassword,
    #[error("User exists!")]
    UserExists,
    /// Credentials that match no account.
    #[error("User not found!")]
    UserNotFound,
    /// A path user id that does not belong to the bearer token.
    #[error("User not found!")]
    UnknownUserId,
    #[error("User not authorized!")]
    NotAuthorized,
    /// A body user id that does not belong to the bearer token.
    #[error("User Id not correct!")]
    UserIdNotCorrect,
    #[error("Request Body is Invalid!")]
    InvalidBody,
    #[error("ISBN supplied is not available in Books Collection!")]
    IsbnNotAvailable,
    #[error("ISBN supplied is not available in User's Collection!")]
    IsbnNotInCollection,
    #[error("ISBN already present in the User's Collection!")]
    IsbnAlreadyPresent,
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::CredentialsRequired
            | Self::WeakPassword
            | Self::InvalidBody
            | Self::IsbnNotAvailable
            | Self::IsbnNotInCollection
            | Self::IsbnAlreadyPresent => StatusCode::BAD_REQUEST,
            Self::UserExists => StatusCode::NOT_ACCEPTABLE,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::UnknownUserId | Self::NotAuthorized | Self::UserIdNotCorrect => {
                StatusCode::UNAUTHORIZED
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::CredentialsRequired | Self::NotAuthorized => "1200",
            Self::UserExists => "1204",
            Self::IsbnNotAvailable => "1205",
            Self::IsbnNotInCollection => "1206",
            Self::UserNotFound
            | Self::UnknownUserId
            | Self::UserIdNotCorrect
            | Self::InvalidBody => "1207",
            Self::IsbnAlreadyPresent => "1210",
            Self::WeakPassword => "1300",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        tracing::debug!(code = self.code(), status = self.status().as_u16(), "rejecting request");
        let body = serde_json::json!({
            "code": self.code(),
            "message": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}
