//! `/BookStore/v1` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use crate::error::ServiceError;
use crate::model::{
    AddBooksBody, AddedBooks, Book, BookQuery, Catalog, IsbnForUser, IsbnRef, UserBody, UserQuery,
};
use crate::{bearer, Db};

pub async fn list_books(State(db): State<Db>) -> Json<Catalog> {
    Json(Catalog {
        books: db.read().await.catalog().to_vec(),
    })
}

pub async fn get_book(
    State(db): State<Db>,
    Query(query): Query<BookQuery>,
) -> Result<Json<Book>, ServiceError> {
    let store = db.read().await;
    Ok(Json(store.book(&query.isbn)?.clone()))
}

pub async fn add_books(
    State(db): State<Db>,
    headers: HeaderMap,
    body: Result<Json<AddBooksBody>, JsonRejection>,
) -> Result<(StatusCode, Json<AddedBooks>), ServiceError> {
    let mut store = db.write().await;
    store.authenticate(bearer(&headers))?;
    let Json(body) = body.map_err(|_| ServiceError::InvalidBody)?;
    let id = store.owner(bearer(&headers), &body.user_id, ServiceError::UserIdNotCorrect)?;
    let isbns: Vec<String> = body.collection_of_isbns.into_iter().map(|r| r.isbn).collect();
    store.add_books(id, &isbns)?;
    tracing::info!(user_id = %id, count = isbns.len(), "books added");
    Ok((
        StatusCode::CREATED,
        Json(AddedBooks {
            books: isbns.into_iter().map(|isbn| IsbnRef { isbn }).collect(),
        }),
    ))
}

/// Body shape is validated before authorization, so a request with nothing
/// in it is reported as an invalid body.
async fn replace(
    db: &Db,
    headers: &HeaderMap,
    isbn: &str,
    body: Result<Json<IsbnForUser>, JsonRejection>,
) -> Result<Json<UserBody>, ServiceError> {
    let Json(body) = body.map_err(|_| ServiceError::InvalidBody)?;
    if isbn.is_empty() || body.user_id.is_empty() || body.isbn.is_empty() {
        return Err(ServiceError::InvalidBody);
    }
    let mut store = db.write().await;
    let id = store.owner(bearer(headers), &body.user_id, ServiceError::UserIdNotCorrect)?;
    store.replace_book(id, isbn, &body.isbn)?;
    let account = store.account(id).ok_or(ServiceError::UserIdNotCorrect)?;
    Ok(Json(UserBody {
        user_id: account.id.to_string(),
        username: account.username.clone(),
        books: store.books_of(account),
    }))
}

pub async fn replace_book(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(isbn): Path<String>,
    body: Result<Json<IsbnForUser>, JsonRejection>,
) -> Result<Json<UserBody>, ServiceError> {
    replace(&db, &headers, &isbn, body).await
}

/// `PUT /BookStore/v1/Books/` with the ISBN left empty.
pub async fn replace_book_without_isbn(
    State(db): State<Db>,
    headers: HeaderMap,
    body: Result<Json<IsbnForUser>, JsonRejection>,
) -> Result<Json<UserBody>, ServiceError> {
    replace(&db, &headers, "", body).await
}

pub async fn remove_book(
    State(db): State<Db>,
    headers: HeaderMap,
    body: Result<Json<IsbnForUser>, JsonRejection>,
) -> Result<StatusCode, ServiceError> {
    let mut store = db.write().await;
    store.authenticate(bearer(&headers))?;
    let Json(body) = body.map_err(|_| ServiceError::InvalidBody)?;
    let id = store.owner(bearer(&headers), &body.user_id, ServiceError::UserIdNotCorrect)?;
    store.remove_book(id, &body.isbn)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_books(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<UserQuery>,
) -> Result<StatusCode, ServiceError> {
    let mut store = db.write().await;
    let id = store.owner(bearer(&headers), &query.user_id, ServiceError::UserIdNotCorrect)?;
    store.clear_books(id)?;
    Ok(StatusCode::NO_CONTENT)
}
