//! The end-to-end account and bookstore scenario.
//!
//! Steps run in a fixed order because later ones depend on the user id and
//! token produced earlier. A failed step is recorded and the run continues;
//! dependent steps then fail on their own with the service's answer.

use bookstore_core::{ApiError, BookStore, Credentials, FixtureUsers, Token, Transport};
use tracing::{info, warn};

use crate::check::{ensure_eq, rejected, verify};
use crate::report::{Outcome, Reporter};

pub const ISBN: &str = "9781449331818";
pub const NEW_ISBN: &str = "9781449337711";

const NOT_AUTHORIZED: &str = "User not authorized!";
const USER_NOT_FOUND: &str = "User not found!";
const INVALID_BODY: &str = "Request Body is Invalid!";
const PASSWORD_POLICY: &str = concat!(
    "Passwords must have at least one non alphanumeric character, one digit ('0'-'9'), ",
    "one uppercase ('A'-'Z'), one lowercase ('a'-'z'), one special character and ",
    "Password must be eight characters or longer.",
);

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Delete the created user at the end instead of skipping that step.
    pub cleanup: bool,
}

/// Values threaded from one step to the next.
#[derive(Debug, Default)]
struct Session {
    user_id: String,
    token: Option<Token>,
}

pub struct Scenario<'a, T: Transport> {
    store: &'a BookStore<T>,
    users: &'a FixtureUsers,
    options: Options,
}

impl<'a, T: Transport> Scenario<'a, T> {
    pub fn new(store: &'a BookStore<T>, users: &'a FixtureUsers, options: Options) -> Self {
        Self { store, users, options }
    }

    pub async fn run(&self, reporter: &mut Reporter) {
        self.prepare().await;
        let mut session = Session::default();

        self.create_user(reporter, &mut session).await;
        self.generate_token(reporter, &mut session).await;
        self.authorized(reporter).await;
        self.get_user(reporter, &session).await;
        self.delete_user_rejections(reporter, &session).await;
        self.create_book(reporter, &session).await;
        self.update_book(reporter, &session).await;
        self.get_book(reporter).await;
        self.delete_book(reporter, &session).await;
        self.cleanup(reporter, &session).await;
    }

    /// Make sure the users that must already exist do.
    async fn prepare(&self) {
        for credentials in [&self.users.existed_user, &self.users.not_auth_user] {
            self.ensure_registered(credentials).await;
        }
    }

    async fn ensure_registered(&self, credentials: &Credentials) {
        match self.store.create_user(credentials).await {
            Ok(_) => info!(user = %credentials.user_name, "registered fixture user"),
            Err(ApiError::Service { ref code, .. }) if code == "1204" => {}
            Err(e) => {
                warn!(user = %credentials.user_name, error = %e, "could not register fixture user")
            }
        }
    }

    async fn create_user(&self, reporter: &mut Reporter, session: &mut Session) {
        const GROUP: &str = "POST /Account/v1/User";
        let users = self.users;

        let existed = self.store.create_user(&users.existed_user).await;
        let outcome = rejected(existed, Some(406), "1204", "User exists!");
        reporter.record(GROUP, "create user with user exists error", outcome);

        let outcome = rejected(
            self.store.create_user(&users.bad_password_user).await,
            Some(400),
            "1300",
            PASSWORD_POLICY,
        );
        reporter.record(GROUP, "create user with bad password error", outcome);

        let result = self.store.create_user(&users.new_user).await;
        if let Ok(response) = &result {
            session.user_id = response.data.user_id.clone();
        }
        let outcome = verify(result, |r| {
            ensure_eq("status", r.status, 201)?;
            ensure_eq("username", r.data.username.as_str(), users.new_user.user_name.as_str())
        });
        reporter.record(GROUP, "create user successfully", outcome);
    }

    async fn generate_token(&self, reporter: &mut Reporter, session: &mut Session) {
        const GROUP: &str = "POST /Account/v1/GenerateToken";

        let outcome = rejected(
            self.store.generate_token(&Credentials::default()).await,
            Some(400),
            "1200",
            "UserName and Password required.",
        );
        reporter.record(GROUP, "generate token with error", outcome);

        let result = self.store.generate_token(&self.users.new_user).await;
        if let Ok(response) = &result {
            session.token = response.data.token();
        }
        let outcome = verify(result, |r| {
            ensure_eq("status", r.status, 200)?;
            ensure_eq("data.status", r.data.status.as_str(), "Success")?;
            ensure_eq("data.result", r.data.result.as_str(), "User authorized successfully.")
        });
        reporter.record(GROUP, "generate token successfully", outcome);
    }

    async fn authorized(&self, reporter: &mut Reporter) {
        const GROUP: &str = "POST /Account/v1/Authorized";
        let users = self.users;

        let token = match self.store.generate_token(&users.existed_user).await {
            Ok(response) => response.data.token(),
            Err(_) => None,
        };
        let result = self.store.is_authorized(&users.existed_user, token.as_ref()).await;
        let outcome = verify(result, |r| {
            ensure_eq("status", r.status, 200)?;
            ensure_eq("authorized", r.data, true)
        });
        reporter.record(GROUP, "authorized is true", outcome);

        let outcome = verify(self.store.is_authorized(&users.not_auth_user, None).await, |r| {
            ensure_eq("status", r.status, 200)?;
            ensure_eq("authorized", r.data, false)
        });
        reporter.record(GROUP, "authorized is false", outcome);

        let outcome = rejected(
            self.store.is_authorized(&users.not_found_user, None).await,
            Some(404),
            "1207",
            USER_NOT_FOUND,
        );
        reporter.record(GROUP, "user not found", outcome);
    }

    async fn get_user(&self, reporter: &mut Reporter, session: &Session) {
        const GROUP: &str = "GET /Account/v1/User/{UUID}";
        let token = session.token.as_ref();

        let outcome = verify(self.store.get_user(&session.user_id, token).await, |r| {
            ensure_eq("status", r.status, 200)?;
            ensure_eq("userId", r.data.user_id.as_str(), session.user_id.as_str())?;
            ensure_eq("username", r.data.username.as_str(), self.users.new_user.user_name.as_str())
        });
        reporter.record(GROUP, "get user successfully", outcome);

        let outcome =
            rejected(self.store.get_user("", token).await, Some(401), "1207", USER_NOT_FOUND);
        reporter.record(GROUP, "get user without userId", outcome);

        let outcome = rejected(
            self.store.get_user(&session.user_id, None).await,
            Some(401),
            "1200",
            NOT_AUTHORIZED,
        );
        reporter.record(GROUP, "get user without token", outcome);
    }

    async fn delete_user_rejections(&self, reporter: &mut Reporter, session: &Session) {
        const GROUP: &str = "DELETE /Account/v1/User/{UUID}";

        let outcome = rejected(
            self.store.delete_user("", session.token.as_ref()).await,
            Some(401),
            "1207",
            USER_NOT_FOUND,
        );
        reporter.record(GROUP, "delete user without userId", outcome);

        let outcome = rejected(
            self.store.delete_user(&session.user_id, None).await,
            Some(401),
            "1200",
            NOT_AUTHORIZED,
        );
        reporter.record(GROUP, "delete user without token", outcome);
    }

    async fn create_book(&self, reporter: &mut Reporter, session: &Session) {
        const GROUP: &str = "POST /BookStore/v1/Books";
        let (user_id, token) = (session.user_id.as_str(), session.token.as_ref());

        let outcome = verify(self.store.create_book(user_id, token, ISBN).await, |r| {
            ensure_eq("status", r.status, 201)
        });
        reporter.record(GROUP, "successfully create book for user", outcome);

        let outcome = rejected(
            self.store.create_book(user_id, None, ISBN).await,
            Some(401),
            "1200",
            NOT_AUTHORIZED,
        );
        reporter.record(GROUP, "user not auth", outcome);

        let outcome = rejected(
            self.store.create_book(user_id, token, ISBN).await,
            Some(400),
            "1210",
            "ISBN already present in the User's Collection!",
        );
        reporter.record(GROUP, "book already exists for user", outcome);
    }

    async fn update_book(&self, reporter: &mut Reporter, session: &Session) {
        const GROUP: &str = "PUT /BookStore/v1/Books";
        let (user_id, token) = (session.user_id.as_str(), session.token.as_ref());

        let outcome = verify(self.store.update_book(user_id, ISBN, NEW_ISBN, token).await, |r| {
            ensure_eq("userId", r.data.user_id.as_str(), user_id)?;
            let first = r.data.books.first().map(|b| b.isbn.as_str());
            ensure_eq("books[0].isbn", first, Some(NEW_ISBN))
        });
        reporter.record(GROUP, "successfully update book", outcome);

        let outcome = rejected(
            self.store.update_book(user_id, ISBN, "", token).await,
            Some(400),
            "1207",
            INVALID_BODY,
        );
        reporter.record(GROUP, "update book without one parameter", outcome);

        let outcome = rejected(
            self.store.update_book("", "", "", None).await,
            Some(400),
            "1207",
            INVALID_BODY,
        );
        reporter.record(GROUP, "update book without all parameters", outcome);
    }

    async fn get_book(&self, reporter: &mut Reporter) {
        const GROUP: &str = "GET /BookStore/v1/Book";

        let first = self.store.get_book(ISBN).await;
        let snapshot = first.as_ref().ok().map(|r| r.data.clone());
        let outcome = verify(first, |r| ensure_eq("isbn", r.data.isbn.as_str(), ISBN));
        reporter.record(GROUP, "successfully get book", outcome);

        let outcome = verify(self.store.get_book(ISBN).await, |r| {
            ensure_eq("repeated read", Some(&r.data), snapshot.as_ref())
        });
        reporter.record(GROUP, "get book is repeatable", outcome);

        let outcome = rejected(
            self.store.get_book("invalid value").await,
            None,
            "1205",
            "ISBN supplied is not available in Books Collection!",
        );
        reporter.record(GROUP, "get book by invalid isbn", outcome);

        let outcome = verify(self.store.list_books().await, |r| {
            ensure_eq("catalog has isbn", r.data.books.iter().any(|b| b.isbn == ISBN), true)
        });
        reporter.record(GROUP, "list catalog", outcome);
    }

    async fn delete_book(&self, reporter: &mut Reporter, session: &Session) {
        const GROUP: &str = "DELETE /BookStore/v1/Book";
        let (user_id, token) = (session.user_id.as_str(), session.token.as_ref());

        let outcome = rejected(
            self.store.delete_book("", "", token).await,
            None,
            "1207",
            "User Id not correct!",
        );
        reporter.record(GROUP, "delete book without body", outcome);

        let outcome = rejected(
            self.store.delete_book(user_id, NEW_ISBN, None).await,
            None,
            "1200",
            NOT_AUTHORIZED,
        );
        reporter.record(GROUP, "delete book without token", outcome);

        let outcome = verify(self.store.delete_book(user_id, NEW_ISBN, token).await, |r| {
            ensure_eq("status", r.status, 204)
        });
        reporter.record(GROUP, "successfully delete book", outcome);

        let outcome = verify(self.store.delete_books(user_id, token).await, |r| {
            ensure_eq("status", r.status, 204)
        });
        reporter.record(GROUP, "clear collection", outcome);
    }

    async fn cleanup(&self, reporter: &mut Reporter, session: &Session) {
        const GROUP: &str = "DELETE /Account/v1/User/{UUID}";
        const NAME: &str = "delete user successfully";

        if !self.options.cleanup {
            reporter.record(GROUP, NAME, Outcome::Skipped);
            return;
        }
        let outcome = verify(
            self.store.delete_user(&session.user_id, session.token.as_ref()).await,
            |r| ensure_eq("status", r.status, 204),
        );
        reporter.record(GROUP, NAME, outcome);
    }
}
