//! Stateless request builder and response parser for the BookStore endpoints.
//!
//! # Design
//! `BookClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. Identifiers are forwarded exactly as
//! given, empty strings included: the service owns all validation.

use crate::error::ApiError;
use crate::http::{decode, decode_empty, HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    AddBooks, AddedBooks, ApiResponse, Book, Catalog, IsbnRef, RemoveBook, ReplaceIsbn, Token,
    UserAccount,
};

/// Client for `/BookStore/v1`.
#[derive(Debug, Clone)]
pub struct BookClient {
    base_url: String,
}

impl BookClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn books_url(&self) -> String {
        format!("{}/BookStore/v1/Books", self.base_url)
    }

    fn book_url(&self) -> String {
        format!("{}/BookStore/v1/Book", self.base_url)
    }

    pub fn build_list_books(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.books_url())
    }

    /// `POST /Books` adding a single ISBN to the user's collection.
    pub fn build_create_book(
        &self,
        user_id: &str,
        token: Option<&Token>,
        isbn: &str,
    ) -> Result<HttpRequest, ApiError> {
        let body = AddBooks {
            user_id: user_id.to_string(),
            collection_of_isbns: vec![IsbnRef { isbn: isbn.to_string() }],
        };
        HttpRequest::new(HttpMethod::Post, self.books_url())
            .with_bearer(token)
            .with_json(&body)
    }

    /// `PUT /Books/{isbn}` replacing `isbn` with `new_isbn`.
    pub fn build_update_book(
        &self,
        user_id: &str,
        isbn: &str,
        new_isbn: &str,
        token: Option<&Token>,
    ) -> Result<HttpRequest, ApiError> {
        let body = ReplaceIsbn {
            user_id: user_id.to_string(),
            isbn: new_isbn.to_string(),
        };
        HttpRequest::new(HttpMethod::Put, self.books_url())
            .with_segment(isbn)
            .with_bearer(token)
            .with_json(&body)
    }

    pub fn build_get_book(&self, isbn: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.book_url()).with_query("ISBN", isbn)
    }

    /// `DELETE /Book` with the target carried in a JSON body.
    pub fn build_delete_book(
        &self,
        user_id: &str,
        isbn: &str,
        token: Option<&Token>,
    ) -> Result<HttpRequest, ApiError> {
        let body = RemoveBook {
            isbn: isbn.to_string(),
            user_id: user_id.to_string(),
        };
        HttpRequest::new(HttpMethod::Delete, self.book_url())
            .with_bearer(token)
            .with_json(&body)
    }

    /// `DELETE /Books?UserId=` emptying the user's collection.
    pub fn build_delete_books(&self, user_id: &str, token: Option<&Token>) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.books_url())
            .with_query("UserId", user_id)
            .with_bearer(token)
    }

    pub fn parse_list_books(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<Catalog>, ApiError> {
        decode(response)
    }

    pub fn parse_create_book(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<AddedBooks>, ApiError> {
        decode(response)
    }

    pub fn parse_update_book(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<UserAccount>, ApiError> {
        decode(response)
    }

    pub fn parse_get_book(&self, response: HttpResponse) -> Result<ApiResponse<Book>, ApiError> {
        decode(response)
    }

    pub fn parse_delete_book(&self, response: HttpResponse) -> Result<ApiResponse<()>, ApiError> {
        decode_empty(response)
    }

    pub fn parse_delete_books(&self, response: HttpResponse) -> Result<ApiResponse<()>, ApiError> {
        decode_empty(response)
    }
}
