//! Contract suite for the Bookstore REST API.
//!
//! Runs the account and book scenario through `bookstore_core::BookStore`
//! and records one outcome per step. The `bookstore-suite` binary drives it
//! against a live deployment or an in-process mock.

pub mod check;
pub mod report;
pub mod scenario;
pub mod settings;

pub use report::{Outcome, Record, Reporter};
pub use scenario::{Options, Scenario};
pub use settings::{resolve, Overrides};
