//! Client core for the Bookstore REST API.
//!
//! # Overview
//! `BookClient` and `AccountClient` build `HttpRequest` values and parse
//! `HttpResponse` values without touching the network (host-does-IO
//! pattern). `BookStore` chains them with a `Transport` for callers that
//! want one awaited call per operation.
//!
//! # Design
//! - Clients are stateless; they hold only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and both halves are testable on plain data.
//! - No local validation: every rejection comes from the service and is
//!   surfaced unchanged as `ApiError::Service {status, code, message}`.
//! - DTOs are defined independently from the mock server; integration tests
//!   catch schema drift.

pub mod account;
pub mod bookstore;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use account::AccountClient;
pub use bookstore::BookStore;
pub use client::BookClient;
pub use config::{BookStoreConfig, ConfigError, FixtureUsers};
pub use error::{ApiError, ErrorBody};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    AddBooks, AddedBooks, ApiResponse, Book, Catalog, CreatedUser, Credentials, IsbnRef, RemoveBook,
    ReplaceIsbn, Token, TokenResponse, UserAccount,
};
