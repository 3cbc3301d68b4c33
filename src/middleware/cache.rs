use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use moka::future::Cache;
use serde_json::json;
use tracing::{debug, warn};

/// Largest body we are willing to buffer for caching.
const MAX_CACHED_BODY: usize = 64 * 1024 * 1024;

static X_CACHE: HeaderName = HeaderName::from_static("x-cache");

#[derive(Clone)]
struct CachedResponse {
    status: StatusCode,
    content_type: Option<HeaderValue>,
    body: Bytes,
}

impl CachedResponse {
    fn to_response(&self) -> Response {
        let mut response = Response::new(Body::from(self.body.clone()));
        *response.status_mut() = self.status;
        if let Some(content_type) = &self.content_type {
            response.headers_mut().insert(CONTENT_TYPE, content_type.clone());
        }
        response
            .headers_mut()
            .insert(X_CACHE.clone(), HeaderValue::from_static("HIT"));
        response
    }
}

/// Fixed-TTL cache of successful GET responses, keyed by path and query string.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Cache<String, CachedResponse>,
}

impl ResponseCache {
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { inner }
    }
}

fn cache_key(uri: &Uri) -> String {
    match uri.query() {
        Some(query) => format!("{}?{}", uri.path(), query),
        None => uri.path().to_string(),
    }
}

pub async fn cache_response(
    State(cache): State<ResponseCache>,
    req: Request,
    next: Next,
) -> Response {
    if req.method() != Method::GET {
        return next.run(req).await;
    }

    let key = cache_key(req.uri());
    if let Some(hit) = cache.inner.get(&key).await {
        debug!(%key, "Cache hit");
        return hit.to_response();
    }

    let response = next.run(req).await;
    if !response.status().is_success() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let body = match axum::body::to_bytes(body, MAX_CACHED_BODY).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(%key, error = %e, "Failed to buffer response for caching");
            let body = axum::Json(json!({ "error": "Failed to read report body" }));
            return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
        }
    };

    cache
        .inner
        .insert(
            key,
            CachedResponse {
                status: parts.status,
                content_type: parts.headers.get(CONTENT_TYPE).cloned(),
                body: body.clone(),
            },
        )
        .await;

    parts
        .headers
        .insert(X_CACHE.clone(), HeaderValue::from_static("MISS"));
    Response::from_parts(parts, Body::from(body))
}
