//! Response header augmentation
//!
//! Every response leaving the test server carries the same CORS and
//! cache-control headers, whatever the path or status. The values override
//! anything the file handler set for the same names.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CACHE_CONTROL,
};
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::constants::server;

/// Header name/value pairs added to every response
pub fn augmented_headers() -> [(HeaderName, HeaderValue); 4] {
    [
        (
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(server::ALLOW_ORIGIN),
        ),
        (
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(server::ALLOW_METHODS),
        ),
        (
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(server::ALLOW_HEADERS),
        ),
        (CACHE_CONTROL, HeaderValue::from_static(server::CACHE_CONTROL)),
    ]
}

/// Wrap `router` so each response gets the augmented headers
pub fn with_augmented_headers(router: Router) -> Router {
    augmented_headers()
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::overriding(name, value))
        })
}
