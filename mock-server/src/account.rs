//! `/Account/v1` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use crate::error::ServiceError;
use crate::model::{CreatedUser, CredentialsBody, TokenBody, UserBody};
use crate::{bearer, Db};

fn credentials(body: Result<Json<CredentialsBody>, JsonRejection>) -> CredentialsBody {
    body.map(|Json(body)| body).unwrap_or_default()
}

pub async fn create_user(
    State(db): State<Db>,
    body: Result<Json<CredentialsBody>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedUser>), ServiceError> {
    let body = credentials(body);
    let account = db.write().await.create_user(&body.user_name, &body.password)?;
    tracing::info!(user_id = %account.id, username = %account.username, "user created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedUser {
            user_id: account.id.to_string(),
            username: account.username,
            books: Vec::new(),
        }),
    ))
}

pub async fn generate_token(
    State(db): State<Db>,
    body: Result<Json<CredentialsBody>, JsonRejection>,
) -> Result<Json<TokenBody>, ServiceError> {
    let body = credentials(body);
    let issued = db.write().await.generate_token(&body.user_name, &body.password)?;
    Ok(Json(match issued {
        Some(issued) => TokenBody {
            token: Some(issued.token),
            expires: Some(issued.expires),
            status: "Success".to_string(),
            result: "User authorized successfully.".to_string(),
        },
        None => TokenBody {
            token: None,
            expires: None,
            status: "Failed".to_string(),
            result: "User authorization failed.".to_string(),
        },
    }))
}

pub async fn authorized(
    State(db): State<Db>,
    body: Result<Json<CredentialsBody>, JsonRejection>,
) -> Result<Json<bool>, ServiceError> {
    let body = credentials(body);
    let authorized = db.read().await.is_authorized(&body.user_name, &body.password)?;
    Ok(Json(authorized))
}

async fn lookup_user(
    db: &Db,
    headers: &HeaderMap,
    user_id: &str,
) -> Result<Json<UserBody>, ServiceError> {
    let store = db.read().await;
    let id = store.owner(bearer(headers), user_id, ServiceError::UnknownUserId)?;
    let account = store.account(id).ok_or(ServiceError::UnknownUserId)?;
    Ok(Json(UserBody {
        user_id: account.id.to_string(),
        username: account.username.clone(),
        books: store.books_of(account),
    }))
}

async fn remove_user(
    db: &Db,
    headers: &HeaderMap,
    user_id: &str,
) -> Result<StatusCode, ServiceError> {
    let mut store = db.write().await;
    let id = store.owner(bearer(headers), user_id, ServiceError::UnknownUserId)?;
    store.delete_user(id);
    tracing::info!(user_id = %id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_user(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Result<Json<UserBody>, ServiceError> {
    lookup_user(&db, &headers, &user_id).await
}

/// `GET /Account/v1/User/` with the id left empty.
pub async fn get_user_without_id(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<UserBody>, ServiceError> {
    lookup_user(&db, &headers, "").await
}

pub async fn delete_user(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    remove_user(&db, &headers, &user_id).await
}

pub async fn delete_user_without_id(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<StatusCode, ServiceError> {
    remove_user(&db, &headers, "").await
}
