//! In-memory stand-in for the Bookstore REST API.
//!
//! Reproduces the status codes and `{code, message}` envelopes of the public
//! service so the client and suite can run without network access.

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::routing::{get, post, put};
use axum::Router;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

mod account;
mod books;
pub mod catalog;
pub mod error;
pub mod model;
pub mod store;

pub use error::ServiceError;
pub use model::{Book, Catalog, CreatedUser, TokenBody, UserBody};
pub use store::Store;

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::new()));
    Router::new()
        .route("/Account/v1/User", post(account::create_user))
        .route(
            "/Account/v1/User/",
            get(account::get_user_without_id).delete(account::delete_user_without_id),
        )
        .route(
            "/Account/v1/User/{id}",
            get(account::get_user).delete(account::delete_user),
        )
        .route("/Account/v1/GenerateToken", post(account::generate_token))
        .route("/Account/v1/Authorized", post(account::authorized))
        .route(
            "/BookStore/v1/Books",
            get(books::list_books).post(books::add_books).delete(books::clear_books),
        )
        .route("/BookStore/v1/Books/", put(books::replace_book_without_isbn))
        .route("/BookStore/v1/Books/{isbn}", put(books::replace_book))
        .route("/BookStore/v1/Book", get(books::get_book).delete(books::remove_book))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Token from `Authorization: Bearer <token>`; anything else is anonymous.
pub(crate) fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
