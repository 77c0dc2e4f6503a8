//! Account and book contract through the async `BookStore` facade.
//!
//! Each test gets its own mock server on an ephemeral port and talks to it
//! with `ReqwestTransport`, so these exercise the same path the suite binary
//! uses against a real deployment.

use bookstore_core::{
    ApiError, ApiResponse, BookStore, BookStoreConfig, Credentials, FixtureUsers, Token,
};
use tokio::net::TcpListener;

const ISBN: &str = "9781449331818";
const NEW_ISBN: &str = "9781449337711";

async fn store() -> (BookStore, FixtureUsers) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(bookstore_mock::run(listener));

    let config = BookStoreConfig::new(&format!("http://{addr}"), FixtureUsers::default()).unwrap();
    (BookStore::new(&config), config.users)
}

/// Registers `users.new_user` and returns its id and token.
async fn signed_in(store: &BookStore, users: &FixtureUsers) -> (String, Token) {
    let created = store.create_user(&users.new_user).await.unwrap();
    let login = store.generate_token(&users.new_user).await.unwrap();
    (created.data.user_id, login.data.token().unwrap())
}

fn assert_rejected<T: std::fmt::Debug>(
    result: Result<ApiResponse<T>, ApiError>,
    status: u16,
    code: &str,
    message: &str,
) {
    let err = result.unwrap_err();
    assert_eq!(err.status(), Some(status), "{err}");
    assert_eq!(err.code(), Some(code), "{err}");
    assert_eq!(err.message(), Some(message), "{err}");
}

// --- /Account/v1/User ---

#[tokio::test]
async fn create_user_successfully() {
    let (store, users) = store().await;
    let response = store.create_user(&users.new_user).await.unwrap();
    assert_eq!(response.status, 201);
    assert_eq!(response.data.username, users.new_user.user_name);
}

#[tokio::test]
async fn create_user_that_exists() {
    let (store, users) = store().await;
    store.create_user(&users.existed_user).await.unwrap();
    assert_rejected(store.create_user(&users.existed_user).await, 406, "1204", "User exists!");
}

#[tokio::test]
async fn create_user_with_bad_password() {
    let (store, users) = store().await;
    assert_rejected(
        store.create_user(&users.bad_password_user).await,
        400,
        "1300",
        bookstore_mock::error::PASSWORD_POLICY,
    );
}

// --- /Account/v1/GenerateToken ---

#[tokio::test]
async fn generate_token_without_credentials() {
    let (store, _) = store().await;
    assert_rejected(
        store.generate_token(&Credentials::default()).await,
        400,
        "1200",
        "UserName and Password required.",
    );
}

#[tokio::test]
async fn generate_token_successfully() {
    let (store, users) = store().await;
    store.create_user(&users.new_user).await.unwrap();
    let response = store.generate_token(&users.new_user).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.data.status, "Success");
    assert_eq!(response.data.result, "User authorized successfully.");
    assert!(response.data.token().is_some());
}

// --- /Account/v1/Authorized ---

#[tokio::test]
async fn authorized_true_false_and_missing() {
    let (store, users) = store().await;
    store.create_user(&users.existed_user).await.unwrap();
    store.create_user(&users.not_auth_user).await.unwrap();

    let token = store.generate_token(&users.existed_user).await.unwrap().data.token();
    let response = store.is_authorized(&users.existed_user, token.as_ref()).await.unwrap();
    assert_eq!(response.status, 200);
    assert!(response.data);

    let response = store.is_authorized(&users.not_auth_user, None).await.unwrap();
    assert_eq!(response.status, 200);
    assert!(!response.data);

    assert_rejected(
        store.is_authorized(&users.not_found_user, None).await,
        404,
        "1207",
        "User not found!",
    );
}

// --- /Account/v1/User/{UUID} ---

#[tokio::test]
async fn get_and_delete_user() {
    let (store, users) = store().await;
    let (user_id, token) = signed_in(&store, &users).await;

    let response = store.get_user(&user_id, Some(&token)).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.data.user_id, user_id);
    assert_eq!(response.data.username, users.new_user.user_name);

    assert_rejected(store.get_user("", Some(&token)).await, 401, "1207", "User not found!");
    assert_rejected(store.get_user(&user_id, None).await, 401, "1200", "User not authorized!");
    assert_rejected(store.delete_user("", Some(&token)).await, 401, "1207", "User not found!");
    assert_rejected(store.delete_user(&user_id, None).await, 401, "1200", "User not authorized!");
    assert_rejected(
        store.delete_user("../../BookStore/v1/Books", Some(&token)).await,
        401,
        "1207",
        "User not found!",
    );
    assert!(matches!(store.get_user("..", Some(&token)).await, Err(ApiError::InvalidUrl(_))));

    let response = store.delete_user(&user_id, Some(&token)).await.unwrap();
    assert_eq!(response.status, 204);
}

// --- /BookStore/v1/Books ---

#[tokio::test]
async fn create_book_paths() {
    let (store, users) = store().await;
    let (user_id, token) = signed_in(&store, &users).await;

    let response = store.create_book(&user_id, Some(&token), ISBN).await.unwrap();
    assert_eq!(response.status, 201);

    assert_rejected(
        store.create_book(&user_id, None, ISBN).await,
        401,
        "1200",
        "User not authorized!",
    );
    assert_rejected(
        store.create_book(&user_id, Some(&token), ISBN).await,
        400,
        "1210",
        "ISBN already present in the User's Collection!",
    );
}

#[tokio::test]
async fn update_book_paths() {
    let (store, users) = store().await;
    let (user_id, token) = signed_in(&store, &users).await;
    store.create_book(&user_id, Some(&token), ISBN).await.unwrap();

    let response = store.update_book(&user_id, ISBN, NEW_ISBN, Some(&token)).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.data.user_id, user_id);
    assert_eq!(response.data.books[0].isbn, NEW_ISBN);

    assert_rejected(
        store.update_book(&user_id, NEW_ISBN, "", Some(&token)).await,
        400,
        "1207",
        "Request Body is Invalid!",
    );
    assert_rejected(
        store.update_book("", "", "", None).await,
        400,
        "1207",
        "Request Body is Invalid!",
    );
    assert_rejected(
        store.update_book(&user_id, NEW_ISBN, ISBN, None).await,
        401,
        "1200",
        "User not authorized!",
    );
}

#[tokio::test]
async fn get_book_is_an_idempotent_read() {
    let (store, _) = store().await;
    let first = store.get_book(ISBN).await.unwrap();
    assert_eq!(first.status, 200);
    assert_eq!(first.data.isbn, ISBN);

    let second = store.get_book(ISBN).await.unwrap();
    assert_eq!(first, second);

    let err = store.get_book("invalid value").await.unwrap_err();
    assert_eq!(err.code(), Some("1205"));
    assert_eq!(err.message(), Some("ISBN supplied is not available in Books Collection!"));
}

#[tokio::test]
async fn delete_book_paths() {
    let (store, users) = store().await;
    let (user_id, token) = signed_in(&store, &users).await;
    store.create_book(&user_id, Some(&token), NEW_ISBN).await.unwrap();

    let err = store.delete_book("", "", Some(&token)).await.unwrap_err();
    assert_eq!(err.code(), Some("1207"));
    assert_eq!(err.message(), Some("User Id not correct!"));

    let err = store.delete_book(&user_id, NEW_ISBN, None).await.unwrap_err();
    assert_eq!(err.code(), Some("1200"));
    assert_eq!(err.message(), Some("User not authorized!"));

    let response = store.delete_book(&user_id, NEW_ISBN, Some(&token)).await.unwrap();
    assert_eq!(response.status, 204);
}

#[tokio::test]
async fn list_and_clear_books() {
    let (store, users) = store().await;
    let (user_id, token) = signed_in(&store, &users).await;

    let catalog = store.list_books().await.unwrap();
    assert!(catalog.data.books.len() >= 2);
    for book in catalog.data.books.iter().take(2) {
        store.create_book(&user_id, Some(&token), &book.isbn).await.unwrap();
    }

    let response = store.delete_books(&user_id, Some(&token)).await.unwrap();
    assert_eq!(response.status, 204);
    let user = store.get_user(&user_id, Some(&token)).await.unwrap();
    assert!(user.data.books.is_empty());

    assert_rejected(store.delete_books(&user_id, None).await, 401, "1200", "User not authorized!");
}
