use std::collections::BTreeMap;
use std::convert::Infallible;

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

/// Normalized inbound request, constructed once per invocation by the HTTP
/// front-end and immutable from then on.
///
/// Header keys are stored lowercase so lookups through [`RequestDescriptor::header`]
/// are case-insensitive.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDescriptor {
    pub method: String,
    pub path: String,
    headers: BTreeMap<String, String>,
    pub query_parameters: BTreeMap<String, String>,
}

impl Default for RequestDescriptor {
    fn default() -> Self {
        Self {
            method: "GET".to_owned(),
            path: "/".to_owned(),
            headers: BTreeMap::new(),
            query_parameters: BTreeMap::new(),
        }
    }
}

impl RequestDescriptor {
    /// Creates a descriptor with no headers or query parameters.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        let method = method.into();
        let path = path.into();
        Self {
            method: if method.is_empty() { "GET".to_owned() } else { method },
            path: if path.is_empty() { "/".to_owned() } else { path },
            ..Self::default()
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Stores a header, normalizing the key to lowercase.
    pub fn insert_header(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Chainable form of [`RequestDescriptor::insert_header`].
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert_header(name, value);
        self
    }

    /// Chainable query-parameter setter.
    pub fn with_query_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.query_parameters.insert(name.into(), value.into());
        self
    }

    /// Builds a descriptor from raw request parts.
    ///
    /// Missing or malformed fields fall back to the documented defaults
    /// (`GET`, `/`, empty maps) so construction never fails.
    pub fn from_parts(parts: &Parts) -> Self {
        let method = parts.method.to_string();

        let path = match parts.uri.path() {
            "" => "/".to_owned(),
            path => path.to_owned(),
        };

        let mut headers = BTreeMap::new();
        for (name, value) in &parts.headers {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_owned(), value.to_owned());
            }
        }

        let query_parameters = Query::<BTreeMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(params)| params)
            .unwrap_or_default();

        Self {
            method,
            path,
            headers,
            query_parameters,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestDescriptor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
