//! Shared plumbing for route handlers: body/query parsing, the uniform
//! response envelope, bearer-token authentication, and pagination.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::auth::extract_token_from_header;
use crate::server::AppState;
use crate::types::{HearthError, Result};

pub type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

/// Largest accepted request body. Journals are text, so this is generous.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Error envelope: `{"success": false, "error": "..."}`
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: String,
}

pub fn full_body(data: impl Into<Bytes>) -> BoxBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

pub fn empty_body() -> BoxBody {
    Full::new(Bytes::new())
        .map_err(|never| match never {})
        .boxed()
}

pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<BoxBody> {
    let json = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type, Authorization")
        .body(full_body(json))
        .unwrap()
}

/// Map a domain error to the uniform failure envelope.
///
/// Internal errors are reported as a bare "Server error"; the detail stays in
/// the logs.
pub fn error_response(err: &HearthError) -> Response<BoxBody> {
    let status = err.status();
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        "Server error".to_string()
    } else {
        err.to_string()
    };

    json_response(
        status,
        &ErrorEnvelope {
            success: false,
            error: message,
        },
    )
}

pub fn not_found_response() -> Response<BoxBody> {
    json_response(
        StatusCode::NOT_FOUND,
        &ErrorEnvelope {
            success: false,
            error: "Route not found".to_string(),
        },
    )
}

pub fn cors_preflight() -> Response<BoxBody> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type, Authorization")
        .header("Access-Control-Max-Age", "86400")
        .body(empty_body())
        .unwrap()
}

/// Collect and deserialize a JSON request body.
pub async fn parse_json_body<T: DeserializeOwned>(req: Request<Incoming>) -> Result<T> {
    let body = req
        .collect()
        .await
        .map_err(|e| HearthError::Http(format!("Failed to read body: {e}")))?;

    let bytes = body.to_bytes();
    if bytes.len() > MAX_BODY_BYTES {
        return Err(HearthError::Http("Request body too large".to_string()));
    }

    serde_json::from_slice(&bytes).map_err(|e| HearthError::Http(format!("Invalid JSON: {e}")))
}

/// Like [`parse_json_body`], but an empty body yields `T::default()`.
///
/// Used by routes whose body is entirely optional (habit completion).
pub async fn parse_json_body_or_default<T: DeserializeOwned + Default>(
    req: Request<Incoming>,
) -> Result<T> {
    let body = req
        .collect()
        .await
        .map_err(|e| HearthError::Http(format!("Failed to read body: {e}")))?;

    let bytes = body.to_bytes();
    if bytes.is_empty() {
        return Ok(T::default());
    }
    if bytes.len() > MAX_BODY_BYTES {
        return Err(HearthError::Http("Request body too large".to_string()));
    }

    serde_json::from_slice(&bytes).map_err(|e| HearthError::Http(format!("Invalid JSON: {e}")))
}

/// Deserialize the query string into a typed struct.
pub fn parse_query<T: DeserializeOwned>(req: &Request<Incoming>) -> Result<T> {
    serde_urlencoded::from_str(req.uri().query().unwrap_or(""))
        .map_err(|e| HearthError::Http(format!("Invalid query string: {e}")))
}

/// Random "Adjective Noun" pseudonym for anonymous community activity.
pub fn anonymous_name() -> String {
    use rand::seq::SliceRandom;

    const ADJECTIVES: [&str; 8] = [
        "Calm", "Quiet", "Gentle", "Steady", "Brave", "Kind", "Wise", "Patient",
    ];
    const NOUNS: [&str; 8] = [
        "Oak", "River", "Mountain", "Star", "Cloud", "Stone", "Wind", "Light",
    ];

    let mut rng = rand::thread_rng();
    format!(
        "{} {}",
        ADJECTIVES.choose(&mut rng).expect("non-empty"),
        NOUNS.choose(&mut rng).expect("non-empty")
    )
}

/// Resolve the caller's user id from the `Authorization` header.
///
/// Handlers still confirm the user exists once they hold the state lock; a
/// valid token for a vanished user is an auth failure, not a 500.
pub fn authenticate(state: &AppState, req: &Request<Incoming>) -> Result<String> {
    let header = req
        .headers()
        .get(hyper::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = extract_token_from_header(header)
        .ok_or_else(|| HearthError::Auth("No token provided".to_string()))?;

    let claims = state.tokens.verify(token)?;
    Ok(claims.sub)
}

// =============================================================================
// Pagination
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
}

/// Slice one page out of an already-ordered list.
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> (Vec<T>, Pagination) {
    let page = page.max(1);
    let limit = limit.max(1);
    let total = items.len();
    let start = (page - 1) * limit;

    let slice = if start >= total {
        Vec::new()
    } else {
        items[start..(start + limit).min(total)].to_vec()
    };

    (
        slice,
        Pagination {
            page,
            limit,
            total,
            pages: total.div_ceil(limit),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_slices_and_counts() {
        let items: Vec<u32> = (1..=25).collect();

        let (page1, info) = paginate(&items, 1, 10);
        assert_eq!(page1, (1..=10).collect::<Vec<_>>());
        assert_eq!(info.total, 25);
        assert_eq!(info.pages, 3);

        let (page3, _) = paginate(&items, 3, 10);
        assert_eq!(page3, vec![21, 22, 23, 24, 25]);

        let (beyond, info) = paginate(&items, 9, 10);
        assert!(beyond.is_empty());
        assert_eq!(info.page, 9);
    }

    #[test]
    fn test_paginate_normalizes_degenerate_input() {
        let items = vec![1, 2, 3];
        let (slice, info) = paginate(&items, 0, 0);
        assert_eq!(slice, vec![1]);
        assert_eq!(info.page, 1);
        assert_eq!(info.limit, 1);
        assert_eq!(info.pages, 3);
    }

    #[test]
    fn test_anonymous_name_shape() {
        for _ in 0..16 {
            let name = anonymous_name();
            let parts: Vec<&str> = name.split(' ').collect();
            assert_eq!(parts.len(), 2);
            assert!(parts.iter().all(|p| !p.is_empty()));
        }
    }

    #[test]
    fn test_error_envelope_hides_internal_detail() {
        let resp = error_response(&HearthError::Internal("lock poisoned at 0x7f".into()));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = error_response(&HearthError::Conflict("Already checked in today".into()));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
