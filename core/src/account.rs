//! Stateless request builder and response parser for the Account endpoints.

use crate::error::ApiError;
use crate::http::{decode, decode_empty, HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ApiResponse, CreatedUser, Credentials, Token, TokenResponse, UserAccount};

/// Client for `/Account/v1`. Same build/parse split as `BookClient`.
#[derive(Debug, Clone)]
pub struct AccountClient {
    base_url: String,
}

impl AccountClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/Account/v1/{endpoint}", self.base_url)
    }

    pub fn build_create_user(&self, credentials: &Credentials) -> Result<HttpRequest, ApiError> {
        HttpRequest::new(HttpMethod::Post, self.url("User")).with_json(credentials)
    }

    pub fn build_generate_token(&self, credentials: &Credentials) -> Result<HttpRequest, ApiError> {
        HttpRequest::new(HttpMethod::Post, self.url("GenerateToken")).with_json(credentials)
    }

    /// The service decides from the credentials alone; the token is sent
    /// along when the caller has one.
    pub fn build_is_authorized(
        &self,
        credentials: &Credentials,
        token: Option<&Token>,
    ) -> Result<HttpRequest, ApiError> {
        HttpRequest::new(HttpMethod::Post, self.url("Authorized"))
            .with_bearer(token)
            .with_json(credentials)
    }

    pub fn build_get_user(&self, user_id: &str, token: Option<&Token>) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.url("User"))
            .with_segment(user_id)
            .with_bearer(token)
    }

    pub fn build_delete_user(&self, user_id: &str, token: Option<&Token>) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.url("User"))
            .with_segment(user_id)
            .with_bearer(token)
    }

    pub fn parse_create_user(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<CreatedUser>, ApiError> {
        decode(response)
    }

    /// A wrong password is not an error here: the service answers 200 with
    /// `status: "Failed"`.
    pub fn parse_generate_token(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<TokenResponse>, ApiError> {
        decode(response)
    }

    pub fn parse_is_authorized(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<bool>, ApiError> {
        decode(response)
    }

    pub fn parse_get_user(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<UserAccount>, ApiError> {
        decode(response)
    }

    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<ApiResponse<()>, ApiError> {
        decode_empty(response)
    }
}
