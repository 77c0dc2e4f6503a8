//! Base URL and fixture users, loaded from environment variables.
//!
//! | Variable             | Meaning                                  | Default              |
//! |----------------------|------------------------------------------|----------------------|
//! | `BOOKSTORE_BASE_URL` | Service root, without `/Account/v1`      | `https://demoqa.com` |
//! | `BOOKSTORE_FIXTURES` | Path to a JSON file of five fixture users | built-in users      |

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Credentials;

pub const DEFAULT_BASE_URL: &str = "https://demoqa.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("cannot read fixtures {}: {source}", .path.display())]
    ReadFixtures {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixtures JSON in {}: {source}", .path.display())]
    ParseFixtures {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Predefined users, each chosen to drive one remote code path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureUsers {
    /// Already registered; creating it again yields `1204`.
    pub existed_user: Credentials,
    /// Fails the password policy (`1300`).
    pub bad_password_user: Credentials,
    /// Not registered yet; the scenario creates it.
    pub new_user: Credentials,
    /// Registered but has never generated a token.
    pub not_auth_user: Credentials,
    /// Never registered (`1207` on `Authorized`).
    pub not_found_user: Credentials,
}

impl FixtureUsers {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFixtures {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::ParseFixtures {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for FixtureUsers {
    /// Built-in users. `new_user` and `not_found_user` get a random suffix so
    /// repeated runs against a shared service do not collide.
    fn default() -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        let suffix = &suffix[..8];
        Self {
            existed_user: Credentials::new("bookstore_existing", "Existing#2024"),
            bad_password_user: Credentials::new("bookstore_weak", "weak"),
            new_user: Credentials::new(&format!("bookstore_{suffix}"), "NewUser#2024"),
            not_auth_user: Credentials::new("bookstore_no_token", "NoToken#2024"),
            not_found_user: Credentials::new(
                &format!("bookstore_missing_{suffix}"),
                "Missing#2024",
            ),
        }
    }
}

/// Everything a `BookStore` needs at construction time.
#[derive(Debug, Clone)]
pub struct BookStoreConfig {
    pub base_url: String,
    pub users: FixtureUsers,
}

impl BookStoreConfig {
    pub fn new(base_url: &str, users: FixtureUsers) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: validate_base_url(base_url)?,
            users,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`BookStoreConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("BOOKSTORE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let users = match lookup("BOOKSTORE_FIXTURES") {
            Some(path) => FixtureUsers::load(Path::new(&path))?,
            None => FixtureUsers::default(),
        };
        Self::new(&base_url, users)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = validate_base_url(base_url)?;
        Ok(self)
    }
}

fn validate_base_url(base_url: &str) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: format!("unsupported scheme {}", parsed.scheme()),
        });
    }
    Ok(base_url.trim_end_matches('/').to_string())
}
