use serde::{Deserialize, Serialize};

use crate::request::RequestDescriptor;

/// Response representation selected for a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    Json,
    Html,
    Plain,
}

impl BodyFormat {
    /// The `Content-Type` header value for this representation.
    pub fn content_type(&self) -> &'static str {
        match self {
            BodyFormat::Json => "application/json",
            BodyFormat::Html => "text/html",
            BodyFormat::Plain => "text/plain",
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, BodyFormat::Json)
    }

    pub fn is_html(&self) -> bool {
        matches!(self, BodyFormat::Html)
    }
}

/// Decides the response representation for a request.
///
/// Signals are checked in priority order; the first match wins:
///
/// 1. `Content-Type` starting with `application/json`
/// 2. `X-Requested-With: XMLHttpRequest`
/// 3. `?format=json`
/// 4. a path under `/api/`
/// 5. an `Accept` header mentioning `text/html` (HTML)
///
/// Anything else falls back to JSON. Pure and total: no I/O, no failure modes.
pub fn negotiate(request: &RequestDescriptor) -> BodyFormat {
    if request
        .header("content-type")
        .is_some_and(|value| value.starts_with("application/json"))
    {
        return BodyFormat::Json;
    }

    if request.header("x-requested-with") == Some("XMLHttpRequest") {
        return BodyFormat::Json;
    }

    if request.query_parameters.get("format").map(String::as_str) == Some("json") {
        return BodyFormat::Json;
    }

    if request.path.starts_with("/api/") {
        return BodyFormat::Json;
    }

    if request
        .header("accept")
        .is_some_and(|value| value.contains("text/html"))
    {
        return BodyFormat::Html;
    }

    BodyFormat::Json
}
