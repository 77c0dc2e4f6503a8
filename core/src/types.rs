//! Request and response DTOs for the bookstore API.
//!
//! # Design
//! Field names follow the service's wire format exactly (`userId` in most
//! places, `userID` in the create-user response). The mock server defines
//! its own copies; integration tests catch schema drift between the two.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A successful exchange: the HTTP status and the decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub data: T,
}

/// Opaque bearer credential issued by `GenerateToken`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token(value.to_string())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(..)")
    }
}

/// Account credentials; also the shape of every fixture user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_name: &str, password: &str) -> Self {
        Self {
            user_name: user_name.to_string(),
            password: password.to_string(),
        }
    }
}

/// Response of `POST /Account/v1/User`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedUser {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub books: Vec<Book>,
}

/// Response of `POST /Account/v1/GenerateToken`. A rejected login still
/// answers 200 with `status: "Failed"` and no token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: Option<String>,
    pub expires: Option<String>,
    pub status: String,
    pub result: String,
}

impl TokenResponse {
    pub fn token(&self) -> Option<Token> {
        self.token.clone().map(Token)
    }
}

/// A user and their collection, as returned by `GET /Account/v1/User/{id}`
/// and `PUT /BookStore/v1/Books/{isbn}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "subTitle")]
    pub sub_title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub publish_date: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub website: String,
}

/// The store catalog from `GET /BookStore/v1/Books`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsbnRef {
    pub isbn: String,
}

/// Body of `POST /BookStore/v1/Books`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBooks {
    pub user_id: String,
    pub collection_of_isbns: Vec<IsbnRef>,
}

/// Response of `POST /BookStore/v1/Books`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedBooks {
    pub books: Vec<IsbnRef>,
}

/// Body of `PUT /BookStore/v1/Books/{isbn}`; `isbn` is the replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceIsbn {
    pub user_id: String,
    pub isbn: String,
}

/// Body of `DELETE /BookStore/v1/Book`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveBook {
    pub isbn: String,
    pub user_id: String,
}
