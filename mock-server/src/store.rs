//! In-memory accounts, tokens and collections.
//!
//! All service rules live here so handlers only extract, delegate and
//! serialize. Every method either mutates nothing or validates fully before
//! mutating.

use std::collections::HashMap;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use uuid::Uuid;

use crate::catalog;
use crate::error::ServiceError;
use crate::model::Book;

#[derive(Clone, Debug)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    password: String,
    pub isbns: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct IssuedToken {
    pub token: String,
    pub expires: String,
}

/// Issued tokens stay valid for this long.
pub fn token_lifetime() -> Duration {
    Duration::days(7)
}

#[derive(Clone, Copy, Debug)]
struct Session {
    owner: Uuid,
    expires: DateTime<Utc>,
}

#[derive(Debug)]
pub struct Store {
    accounts: HashMap<Uuid, Account>,
    tokens: HashMap<String, Session>,
    catalog: Vec<Book>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Eight or more characters with a lowercase, an uppercase, a digit and a
/// non-alphanumeric character.
pub fn password_is_strong(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric())
}

impl Store {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            tokens: HashMap::new(),
            catalog: catalog::seed(),
        }
    }

    pub fn catalog(&self) -> &[Book] {
        &self.catalog
    }

    pub fn book(&self, isbn: &str) -> Result<&Book, ServiceError> {
        self.catalog
            .iter()
            .find(|b| b.isbn == isbn)
            .ok_or(ServiceError::IsbnNotAvailable)
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.get(&id)
    }

    /// Full catalog entries for the account's collection, in collection order.
    pub fn books_of(&self, account: &Account) -> Vec<Book> {
        account
            .isbns
            .iter()
            .filter_map(|isbn| self.book(isbn).ok().cloned())
            .collect()
    }

    fn find_by_name(&self, username: &str) -> Option<&Account> {
        self.accounts.values().find(|a| a.username == username)
    }

    pub fn create_user(&mut self, username: &str, password: &str) -> Result<Account, ServiceError> {
        if username.is_empty() || password.is_empty() {
            return Err(ServiceError::CredentialsRequired);
        }
        if !password_is_strong(password) {
            return Err(ServiceError::WeakPassword);
        }
        if self.find_by_name(username).is_some() {
            return Err(ServiceError::UserExists);
        }
        let account = Account {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password: password.to_string(),
            isbns: Vec::new(),
        };
        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    /// `Ok(None)` for unknown users and wrong passwords; the service reports
    /// those as a failed login rather than an error.
    pub fn generate_token(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Option<IssuedToken>, ServiceError> {
        self.generate_token_at(username, password, Utc::now())
    }

    /// Issue a token as of `now`. Tokens that expired by then are dropped.
    pub fn generate_token_at(
        &mut self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<IssuedToken>, ServiceError> {
        if username.is_empty() || password.is_empty() {
            return Err(ServiceError::CredentialsRequired);
        }
        let Some(id) = self
            .find_by_name(username)
            .filter(|a| a.password == password)
            .map(|a| a.id)
        else {
            return Ok(None);
        };

        self.tokens.retain(|_, session| session.expires > now);
        let token = Uuid::new_v4().simple().to_string();
        let expires = now + token_lifetime();
        self.tokens.insert(token.clone(), Session { owner: id, expires });
        Ok(Some(IssuedToken {
            token,
            expires: expires.to_rfc3339_opts(SecondsFormat::Millis, true),
        }))
    }

    /// True while the user holds at least one unexpired token.
    pub fn is_authorized(&self, username: &str, password: &str) -> Result<bool, ServiceError> {
        self.is_authorized_at(username, password, Utc::now())
    }

    pub fn is_authorized_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ServiceError> {
        if username.is_empty() || password.is_empty() {
            return Err(ServiceError::CredentialsRequired);
        }
        let account = self
            .find_by_name(username)
            .filter(|a| a.password == password)
            .ok_or(ServiceError::UserNotFound)?;
        Ok(self
            .tokens
            .values()
            .any(|session| session.owner == account.id && session.expires > now))
    }

    pub fn authenticate(&self, token: Option<&str>) -> Result<Uuid, ServiceError> {
        self.authenticate_at(token, Utc::now())
    }

    /// Owner of `token` if it exists and has not expired by `now`.
    pub fn authenticate_at(
        &self,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Uuid, ServiceError> {
        token
            .and_then(|t| self.tokens.get(t))
            .filter(|session| session.expires > now)
            .map(|session| session.owner)
            .ok_or(ServiceError::NotAuthorized)
    }

    /// Authenticate and require `user_id` to be the token's own account.
    pub fn owner(
        &self,
        token: Option<&str>,
        user_id: &str,
        mismatch: ServiceError,
    ) -> Result<Uuid, ServiceError> {
        let id = self.authenticate(token)?;
        if id.to_string() != user_id {
            return Err(mismatch);
        }
        Ok(id)
    }

    pub fn delete_user(&mut self, id: Uuid) {
        self.accounts.remove(&id);
        self.tokens.retain(|_, session| session.owner != id);
    }

    fn account_mut(&mut self, id: Uuid) -> Result<&mut Account, ServiceError> {
        self.accounts.get_mut(&id).ok_or(ServiceError::UserIdNotCorrect)
    }

    pub fn add_books(&mut self, id: Uuid, isbns: &[String]) -> Result<(), ServiceError> {
        if isbns.is_empty() {
            return Err(ServiceError::InvalidBody);
        }
        for isbn in isbns {
            self.book(isbn)?;
        }
        let account = self.account_mut(id)?;
        for (i, isbn) in isbns.iter().enumerate() {
            if account.isbns.contains(isbn) || isbns[..i].contains(isbn) {
                return Err(ServiceError::IsbnAlreadyPresent);
            }
        }
        account.isbns.extend(isbns.iter().cloned());
        Ok(())
    }

    /// Swap `isbn` for `new_isbn` in place.
    pub fn replace_book(
        &mut self,
        id: Uuid,
        isbn: &str,
        new_isbn: &str,
    ) -> Result<(), ServiceError> {
        self.book(new_isbn)?;
        let account = self.account_mut(id)?;
        let position = account
            .isbns
            .iter()
            .position(|i| i == isbn)
            .ok_or(ServiceError::IsbnNotInCollection)?;
        if isbn != new_isbn && account.isbns.iter().any(|i| i == new_isbn) {
            return Err(ServiceError::IsbnAlreadyPresent);
        }
        account.isbns[position] = new_isbn.to_string();
        Ok(())
    }

    pub fn remove_book(&mut self, id: Uuid, isbn: &str) -> Result<(), ServiceError> {
        let account = self.account_mut(id)?;
        let position = account
            .isbns
            .iter()
            .position(|i| i == isbn)
            .ok_or(ServiceError::IsbnNotInCollection)?;
        account.isbns.remove(position);
        Ok(())
    }

    pub fn clear_books(&mut self, id: Uuid) -> Result<(), ServiceError> {
        self.account_mut(id)?.isbns.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISBN: &str = "9781449331818";
    const NEW_ISBN: &str = "9781449337711";

    fn store_with_user() -> (Store, Uuid, String) {
        let mut store = Store::new();
        let account = store.create_user("alice", "Secret#123").unwrap();
        let token = store.generate_token("alice", "Secret#123").unwrap().unwrap().token;
        (store, account.id, token)
    }

    #[test]
    fn password_policy() {
        assert!(password_is_strong("Secret#123"));
        assert!(!password_is_strong("Secret123"));
        assert!(!password_is_strong("secret#123"));
        assert!(!password_is_strong("SECRET#123"));
        assert!(!password_is_strong("Secret#"));
        assert!(!password_is_strong("Secret#abc"));
    }

    #[test]
    fn create_user_checks_in_order() {
        let mut store = Store::new();
        assert_eq!(store.create_user("", "x").unwrap_err(), ServiceError::CredentialsRequired);
        assert_eq!(store.create_user("bob", "weak").unwrap_err(), ServiceError::WeakPassword);
        store.create_user("bob", "Secret#123").unwrap();
        assert_eq!(store.create_user("bob", "Secret#123").unwrap_err(), ServiceError::UserExists);
    }

    #[test]
    fn wrong_password_fails_login_without_error() {
        let (mut store, _, _) = store_with_user();
        assert!(store.generate_token("alice", "Wrong#123").unwrap().is_none());
        assert!(store.generate_token("nobody", "Wrong#123").unwrap().is_none());
    }

    #[test]
    fn authorized_tracks_issued_tokens() {
        let mut store = Store::new();
        store.create_user("carol", "Secret#123").unwrap();
        assert!(!store.is_authorized("carol", "Secret#123").unwrap());
        store.generate_token("carol", "Secret#123").unwrap();
        assert!(store.is_authorized("carol", "Secret#123").unwrap());
        assert_eq!(
            store.is_authorized("dave", "Secret#123").unwrap_err(),
            ServiceError::UserNotFound
        );
    }

    #[test]
    fn owner_rejects_foreign_user_id() {
        let (store, id, token) = store_with_user();
        assert_eq!(
            store.owner(Some(&token), &id.to_string(), ServiceError::UserIdNotCorrect),
            Ok(id)
        );
        assert_eq!(
            store.owner(Some(&token), "", ServiceError::UserIdNotCorrect),
            Err(ServiceError::UserIdNotCorrect)
        );
        assert_eq!(
            store.owner(None, &id.to_string(), ServiceError::UserIdNotCorrect),
            Err(ServiceError::NotAuthorized)
        );
    }

    #[test]
    fn add_books_rejects_duplicates_and_unknown() {
        let (mut store, id, _) = store_with_user();
        store.add_books(id, &[ISBN.to_string()]).unwrap();
        assert_eq!(
            store.add_books(id, &[ISBN.to_string()]).unwrap_err(),
            ServiceError::IsbnAlreadyPresent
        );
        assert_eq!(
            store.add_books(id, &["invalid value".to_string()]).unwrap_err(),
            ServiceError::IsbnNotAvailable
        );
        assert_eq!(store.add_books(id, &[]).unwrap_err(), ServiceError::InvalidBody);
        assert_eq!(store.account(id).unwrap().isbns, vec![ISBN.to_string()]);
    }

    #[test]
    fn replace_keeps_position() {
        let (mut store, id, _) = store_with_user();
        store
            .add_books(id, &[ISBN.to_string(), "9781449325862".to_string()])
            .unwrap();
        store.replace_book(id, ISBN, NEW_ISBN).unwrap();
        let account = store.account(id).unwrap();
        assert_eq!(account.isbns[0], NEW_ISBN);
        assert_eq!(store.books_of(account)[0].isbn, NEW_ISBN);
        assert_eq!(
            store.replace_book(id, ISBN, NEW_ISBN).unwrap_err(),
            ServiceError::IsbnNotInCollection
        );
    }

    #[test]
    fn remove_and_clear() {
        let (mut store, id, _) = store_with_user();
        store.add_books(id, &[ISBN.to_string(), NEW_ISBN.to_string()]).unwrap();
        store.remove_book(id, ISBN).unwrap();
        assert_eq!(store.remove_book(id, ISBN).unwrap_err(), ServiceError::IsbnNotInCollection);
        store.clear_books(id).unwrap();
        assert!(store.account(id).unwrap().isbns.is_empty());
    }

    #[test]
    fn tokens_expire_after_their_lifetime() {
        let mut store = Store::new();
        store.create_user("erin", "Secret#123").unwrap();
        let issued_at = Utc::now();
        let token = store
            .generate_token_at("erin", "Secret#123", issued_at)
            .unwrap()
            .unwrap()
            .token;

        let before = issued_at + token_lifetime() - Duration::seconds(1);
        let after = issued_at + token_lifetime();
        assert!(store.authenticate_at(Some(&token), before).is_ok());
        assert!(store.is_authorized_at("erin", "Secret#123", before).unwrap());
        assert_eq!(store.authenticate_at(Some(&token), after), Err(ServiceError::NotAuthorized));
        assert!(!store.is_authorized_at("erin", "Secret#123", after).unwrap());
    }

    #[test]
    fn new_login_drops_expired_tokens() {
        let mut store = Store::new();
        store.create_user("frank", "Secret#123").unwrap();
        let issued_at = Utc::now();
        store.generate_token_at("frank", "Secret#123", issued_at).unwrap();
        store.generate_token_at("frank", "Secret#123", issued_at).unwrap();
        assert_eq!(store.tokens.len(), 2);

        let later = issued_at + token_lifetime() + Duration::days(1);
        let fresh = store
            .generate_token_at("frank", "Secret#123", later)
            .unwrap()
            .unwrap()
            .token;
        assert_eq!(store.tokens.len(), 1);
        assert!(store.authenticate_at(Some(&fresh), later).is_ok());
    }

    #[test]
    fn delete_user_revokes_tokens() {
        let (mut store, id, token) = store_with_user();
        store.delete_user(id);
        assert!(store.account(id).is_none());
        assert_eq!(store.authenticate(Some(&token)), Err(ServiceError::NotAuthorized));
    }
}
