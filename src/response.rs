use std::collections::BTreeMap;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::negotiate::BodyFormat;

/// Permissive CORS headers attached to every response.
const CORS_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, POST, OPTIONS"),
    ("access-control-allow-headers", "Content-Type"),
];

/// Body data carried by a [`ResponseEnvelope`]: structured for JSON, an opaque
/// string for HTML and plain text.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

/// Outbound response assembled fresh per invocation; it has no lifecycle
/// beyond the single request/response cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body_format: BodyFormat,
    pub payload: Payload,
}

impl ResponseEnvelope {
    /// A 200 JSON envelope with CORS headers.
    pub fn json(payload: Value) -> Self {
        Self::with_format(BodyFormat::Json, Payload::Json(payload))
    }

    /// A 200 HTML envelope with CORS headers.
    pub fn html(body: impl Into<String>) -> Self {
        Self::with_format(BodyFormat::Html, Payload::Text(body.into()))
    }

    /// A 200 plain-text envelope with CORS headers.
    pub fn plain(body: impl Into<String>) -> Self {
        Self::with_format(BodyFormat::Plain, Payload::Text(body.into()))
    }

    fn with_format(body_format: BodyFormat, payload: Payload) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_owned(), body_format.content_type().to_owned());
        for (name, value) in CORS_HEADERS {
            headers.insert(name.to_owned(), value.to_owned());
        }

        Self {
            status_code: StatusCode::OK.as_u16(),
            headers,
            body_format,
            payload,
        }
    }

    /// The serialized body: pretty-printed JSON, or the opaque string payload.
    pub fn body(&self) -> String {
        match &self.payload {
            Payload::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Payload::Text(text) => text.clone(),
        }
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = self.body();

        let mut response = (status, body).into_response();
        let headers = response.headers_mut();
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                headers.insert(name, value);
            }
        }

        response
    }
}
