//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and the expected parse result or rejection. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use bookstore_core::{
    AddedBooks, ApiError, ApiResponse, Book, BookClient, HttpMethod, HttpRequest, HttpResponse,
    Token, UserAccount,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> BookClient {
    BookClient::new(BASE_URL)
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|h| {
                    let arr = h.as_array().unwrap();
                    (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}

fn token(case: &Value) -> Option<Token> {
    case["input"]["token"].as_str().map(Token::from)
}

fn input<'a>(case: &'a Value, field: &str) -> &'a str {
    case["input"][field].as_str().unwrap()
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    let full_url = req.full_url().unwrap();
    let path = full_url.strip_prefix(BASE_URL).unwrap().split('?').next().unwrap();
    assert_eq!(path, expected["path"].as_str().unwrap(), "{name}: path");
    assert_eq!(req.query, pairs(&expected["query"]), "{name}: query");
    assert_eq!(req.headers, pairs(&expected["headers"]), "{name}: headers");
    match req.body.as_deref() {
        Some(body) => {
            let body: Value = serde_json::from_str(body).unwrap();
            assert_eq!(body, expected["body"], "{name}: body");
        }
        None => assert!(expected["body"].is_null(), "{name}: body should be present"),
    }
    if let Some(url) = expected["url"].as_str() {
        assert_eq!(full_url, format!("{BASE_URL}{url}"), "{name}: full url");
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Compare a parse outcome against `expected_result` or `expected_error`.
fn check_outcome<T>(name: &str, case: &Value, result: Result<ApiResponse<T>, ApiError>)
where
    T: serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let status = case["simulated_response"]["status"].as_u64().unwrap() as u16;
    if let Some(expected) = case.get("expected_error") {
        let err = result.unwrap_err();
        assert_eq!(err.status(), expected["status"].as_u64().map(|s| s as u16), "{name}: status");
        assert_eq!(err.code(), expected["code"].as_str(), "{name}: code");
        assert_eq!(err.message(), expected["message"].as_str(), "{name}: message");
    } else {
        let response = result.unwrap();
        assert_eq!(response.status, status, "{name}: status");
        if let Some(expected) = case.get("expected_result") {
            let expected: T = serde_json::from_value(expected.clone()).unwrap();
            assert_eq!(response.data, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_book_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create_book.json")) {
        let name = case["name"].as_str().unwrap();
        let req = c
            .build_create_book(input(&case, "user_id"), token(&case).as_ref(), input(&case, "isbn"))
            .unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result: Result<ApiResponse<AddedBooks>, _> = c.parse_create_book(simulated(&case));
        check_outcome(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_book_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/update_book.json")) {
        let name = case["name"].as_str().unwrap();
        let req = c
            .build_update_book(
                input(&case, "user_id"),
                input(&case, "isbn"),
                input(&case, "new_isbn"),
                token(&case).as_ref(),
            )
            .unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result: Result<ApiResponse<UserAccount>, _> = c.parse_update_book(simulated(&case));
        check_outcome(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_book_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/get_book.json")) {
        let name = case["name"].as_str().unwrap();
        let req = c.build_get_book(input(&case, "isbn"));
        check_request(name, &req, &case["expected_request"]);
        assert!(req.header("authorization").is_none(), "{name}: no auth");

        let result: Result<ApiResponse<Book>, _> = c.parse_get_book(simulated(&case));
        check_outcome(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_book_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete_book.json")) {
        let name = case["name"].as_str().unwrap();
        let req = c
            .build_delete_book(input(&case, "user_id"), input(&case, "isbn"), token(&case).as_ref())
            .unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result: Result<ApiResponse<()>, _> = c.parse_delete_book(simulated(&case));
        check_outcome(name, &case, result);
    }
}
