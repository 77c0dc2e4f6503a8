//! Async facade pairing the request builders with a `Transport`.
//!
//! Each method is `build_* → Transport::execute → parse_*`. Nothing is cached
//! between calls; user ids and tokens are threaded through by the caller.

use tracing::{debug, warn};

use crate::account::AccountClient;
use crate::client::BookClient;
use crate::config::BookStoreConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{
    AddedBooks, ApiResponse, Book, Catalog, CreatedUser, Credentials, Token, TokenResponse,
    UserAccount,
};

pub struct BookStore<T = ReqwestTransport> {
    books: BookClient,
    accounts: AccountClient,
    transport: T,
}

impl BookStore<ReqwestTransport> {
    pub fn new(config: &BookStoreConfig) -> Self {
        Self::with_transport(&config.base_url, ReqwestTransport::new())
    }
}

impl<T: Transport> BookStore<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            books: BookClient::new(base_url),
            accounts: AccountClient::new(base_url),
            transport,
        }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }

    // --- accounts ---

    pub async fn create_user(
        &self,
        credentials: &Credentials,
    ) -> Result<ApiResponse<CreatedUser>, ApiError> {
        let request = self.accounts.build_create_user(credentials)?;
        let response = self.send(request).await?;
        logged("create_user", self.accounts.parse_create_user(response))
    }

    pub async fn generate_token(
        &self,
        credentials: &Credentials,
    ) -> Result<ApiResponse<TokenResponse>, ApiError> {
        let request = self.accounts.build_generate_token(credentials)?;
        let response = self.send(request).await?;
        logged("generate_token", self.accounts.parse_generate_token(response))
    }

    pub async fn is_authorized(
        &self,
        credentials: &Credentials,
        token: Option<&Token>,
    ) -> Result<ApiResponse<bool>, ApiError> {
        let request = self.accounts.build_is_authorized(credentials, token)?;
        let response = self.send(request).await?;
        logged("is_authorized", self.accounts.parse_is_authorized(response))
    }

    pub async fn get_user(
        &self,
        user_id: &str,
        token: Option<&Token>,
    ) -> Result<ApiResponse<UserAccount>, ApiError> {
        let response = self.send(self.accounts.build_get_user(user_id, token)).await?;
        logged("get_user", self.accounts.parse_get_user(response))
    }

    pub async fn delete_user(
        &self,
        user_id: &str,
        token: Option<&Token>,
    ) -> Result<ApiResponse<()>, ApiError> {
        let response = self.send(self.accounts.build_delete_user(user_id, token)).await?;
        logged("delete_user", self.accounts.parse_delete_user(response))
    }

    // --- books ---

    pub async fn list_books(&self) -> Result<ApiResponse<Catalog>, ApiError> {
        let response = self.send(self.books.build_list_books()).await?;
        logged("list_books", self.books.parse_list_books(response))
    }

    pub async fn create_book(
        &self,
        user_id: &str,
        token: Option<&Token>,
        isbn: &str,
    ) -> Result<ApiResponse<AddedBooks>, ApiError> {
        let request = self.books.build_create_book(user_id, token, isbn)?;
        let response = self.send(request).await?;
        logged("create_book", self.books.parse_create_book(response))
    }

    pub async fn update_book(
        &self,
        user_id: &str,
        isbn: &str,
        new_isbn: &str,
        token: Option<&Token>,
    ) -> Result<ApiResponse<UserAccount>, ApiError> {
        let request = self.books.build_update_book(user_id, isbn, new_isbn, token)?;
        let response = self.send(request).await?;
        logged("update_book", self.books.parse_update_book(response))
    }

    pub async fn get_book(&self, isbn: &str) -> Result<ApiResponse<Book>, ApiError> {
        let response = self.send(self.books.build_get_book(isbn)).await?;
        logged("get_book", self.books.parse_get_book(response))
    }

    pub async fn delete_book(
        &self,
        user_id: &str,
        isbn: &str,
        token: Option<&Token>,
    ) -> Result<ApiResponse<()>, ApiError> {
        let request = self.books.build_delete_book(user_id, isbn, token)?;
        let response = self.send(request).await?;
        logged("delete_book", self.books.parse_delete_book(response))
    }

    pub async fn delete_books(
        &self,
        user_id: &str,
        token: Option<&Token>,
    ) -> Result<ApiResponse<()>, ApiError> {
        let response = self.send(self.books.build_delete_books(user_id, token)).await?;
        logged("delete_books", self.books.parse_delete_books(response))
    }
}

fn logged<R>(operation: &'static str, result: Result<R, ApiError>) -> Result<R, ApiError> {
    result.inspect_err(|e| {
        warn!(
            operation,
            status = e.status(),
            code = e.code(),
            error = %e,
            "request rejected"
        )
    })
}
