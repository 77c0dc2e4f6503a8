//! Assertion helpers that turn client results into step outcomes.

use std::fmt::Debug;

use bookstore_core::{ApiError, ApiResponse};

use crate::report::Outcome;

pub fn ensure_eq<V: PartialEq + Debug>(what: &str, actual: V, expected: V) -> Result<(), String> {
    if actual == expected {
        Ok(())
    } else {
        Err(format!("{what}: expected {expected:?}, got {actual:?}"))
    }
}

/// Pass when the call succeeded and `check` accepts the response.
pub fn verify<R>(
    result: Result<ApiResponse<R>, ApiError>,
    check: impl FnOnce(&ApiResponse<R>) -> Result<(), String>,
) -> Outcome {
    match result {
        Ok(response) => match check(&response) {
            Ok(()) => Outcome::Pass,
            Err(reason) => Outcome::Fail(reason),
        },
        Err(e) => Outcome::Fail(format!("unexpected rejection: {e}")),
    }
}

/// Pass when the service rejected the call with this code and message.
/// `status: None` skips the status comparison.
pub fn rejected<R>(
    result: Result<ApiResponse<R>, ApiError>,
    status: Option<u16>,
    code: &str,
    message: &str,
) -> Outcome {
    let err = match result {
        Ok(response) => {
            let got = response.status;
            return Outcome::Fail(format!("expected rejection {code}, got HTTP {got}"));
        }
        Err(err) => err,
    };
    let checks = || -> Result<(), String> {
        if let Some(status) = status {
            ensure_eq("status", err.status(), Some(status))?;
        }
        ensure_eq("code", err.code(), Some(code))?;
        ensure_eq("message", err.message(), Some(message))
    };
    match checks() {
        Ok(()) => Outcome::Pass,
        Err(reason) => Outcome::Fail(reason),
    }
}
