//! Wire types for the mock service.
//!
//! Request bodies default every field so that an empty or partial body still
//! deserializes and reaches the service's own validation, which answers with
//! the proper error envelope instead of an extractor rejection.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    #[serde(rename = "subTitle")]
    pub sub_title: String,
    pub author: String,
    pub publish_date: String,
    pub publisher: String,
    pub pages: u32,
    pub description: String,
    pub website: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CredentialsBody {
    #[serde(rename = "userName", default)]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
}

impl CredentialsBody {
    pub fn is_complete(&self) -> bool {
        !self.user_name.is_empty() && !self.password.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedUser {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub username: String,
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenBody {
    pub token: Option<String>,
    pub expires: Option<String>,
    pub status: String,
    pub result: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    pub user_id: String,
    pub username: String,
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Catalog {
    pub books: Vec<Book>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct IsbnRef {
    #[serde(default)]
    pub isbn: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBooksBody {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub collection_of_isbns: Vec<IsbnRef>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddedBooks {
    pub books: Vec<IsbnRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsbnForUser {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub isbn: String,
}

#[derive(Debug, Deserialize)]
pub struct BookQuery {
    #[serde(rename = "ISBN", default)]
    pub isbn: String,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    #[serde(rename = "UserId", default)]
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_credentials_body_is_incomplete() {
        let body: CredentialsBody = serde_json::from_str("{}").unwrap();
        assert!(!body.is_complete());
        let body: CredentialsBody =
            serde_json::from_str(r#"{"userName":"a","password":""}"#).unwrap();
        assert!(!body.is_complete());
    }

    #[test]
    fn add_books_body_accepts_partial_json() {
        let body: AddBooksBody = serde_json::from_str(r#"{"userId":"u"}"#).unwrap();
        assert_eq!(body.user_id, "u");
        assert!(body.collection_of_isbns.is_empty());
    }

    #[test]
    fn book_serializes_with_sub_title_camel_case() {
        let book = crate::catalog::seed().remove(0);
        let json = serde_json::to_value(&book).unwrap();
        assert!(json.get("subTitle").is_some());
        assert!(json.get("publish_date").is_some());
    }
}
