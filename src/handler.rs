use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};

use crate::config::{ConfigError, HandlerConfig};
use crate::context::InvocationContext;
use crate::negotiate::{BodyFormat, negotiate};
use crate::render::render_html;
use crate::request::RequestDescriptor;
use crate::response::ResponseEnvelope;

const GREETING: &str = "Hello World from AWS Lambda Container!";

/// The invocation entry point: one call handles exactly one request, and no
/// state is shared across invocations.
#[derive(Clone, Debug, Default)]
pub struct Handler {
    config: HandlerConfig,
}

impl Handler {
    /// Creates a handler with the provided configuration.
    pub fn new(config: HandlerConfig) -> Self {
        Self { config }
    }

    /// Creates a handler configured from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(HandlerConfig::from_env()?))
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Handles a single invocation.
    ///
    /// Total over its inputs: always produces a 200 envelope and never fails.
    pub fn handle(
        &self,
        request: &RequestDescriptor,
        context: &InvocationContext,
    ) -> ResponseEnvelope {
        let format = negotiate(request);

        tracing::info!(
            method = %request.method,
            path = %request.path,
            request_id = %context.request_id,
            format = ?format,
            "handling invocation"
        );

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        match format {
            BodyFormat::Json => ResponseEnvelope::json(self.summary(request, context, &timestamp)),
            BodyFormat::Html => {
                ResponseEnvelope::html(render_html(&self.config, request, context, &timestamp))
            }
            BodyFormat::Plain => ResponseEnvelope::plain(GREETING),
        }
    }

    fn summary(
        &self,
        request: &RequestDescriptor,
        context: &InvocationContext,
        timestamp: &str,
    ) -> Value {
        let mut summary = json!({
            "message": GREETING,
            "timestamp": timestamp,
            "environment": self.config.environment,
            "project": self.config.project_name,
            "version": env!("CARGO_PKG_VERSION"),
            "request_id": context.request_id,
            "path": request.path,
            "method": request.method,
            "runtime": {
                "function_name": context.function_name,
                "function_version": context.function_version,
                "memory_limit_mb": context.memory_limit_mb,
                "remaining_time_ms": context.remaining_time_ms,
            },
        });

        if !request.query_parameters.is_empty() {
            summary["query_parameters"] = json!(request.query_parameters);
        }

        summary
    }
}
