//! Per-request console log
//!
//! Each request produces one line on stdout in the common log style:
//!
//! ```text
//! [18/Oct/2026 14:03:11] "GET /index.html HTTP/1.1" 200 1532
//! ```

use axum::extract::Request;
use axum::http::header::CONTENT_LENGTH;
use axum::http::{Method, StatusCode, Version};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Local};

use crate::constants::server;

/// What gets logged for one request
#[derive(Debug, Clone)]
pub struct RequestLogLine {
    pub timestamp: DateTime<Local>,
    pub method: Method,
    pub path: String,
    pub version: Version,
    pub status: StatusCode,
    /// Body size from `Content-Length`, when the handler set one
    pub size: Option<u64>,
}

impl RequestLogLine {
    /// Render the console line
    pub fn render(&self) -> String {
        let size = self
            .size
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "[{}] \"{} {} {:?}\" {} {}",
            self.timestamp.format(server::LOG_TIME_FORMAT),
            self.method,
            self.path,
            self.version,
            self.status.as_u16(),
            size
        )
    }
}

/// Middleware that prints one line per request after the response is built
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let version = request.version();
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;

    let size = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok());

    let line = RequestLogLine {
        timestamp: Local::now(),
        method,
        path,
        version,
        status: response.status(),
        size,
    };
    println!("{}", line.render());
    tracing::debug!(status = %line.status, path = %line.path, "Request served");

    response
}
