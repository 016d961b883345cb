use std::convert::Infallible;
use std::env;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::Utc;
use serde::{Deserialize, Serialize};

const FUNCTION_NAME_ENV: &str = "AWS_LAMBDA_FUNCTION_NAME";
const FUNCTION_VERSION_ENV: &str = "AWS_LAMBDA_FUNCTION_VERSION";
const MEMORY_LIMIT_ENV: &str = "AWS_LAMBDA_FUNCTION_MEMORY_SIZE";

/// Headers set by the Lambda runtime API for the current invocation.
const REQUEST_ID_HEADER: &str = "lambda-runtime-aws-request-id";
const DEADLINE_HEADER: &str = "lambda-runtime-deadline-ms";
/// Request id forwarded by API Gateway when the runtime headers are absent.
const AMZN_REQUEST_ID_HEADER: &str = "x-amzn-requestid";

const LOCAL_REQUEST_ID: &str = "local";
const DEFAULT_FUNCTION_VERSION: &str = "$LATEST";
const DEFAULT_MEMORY_LIMIT_MB: u32 = 128;

/// Runtime-supplied metadata about the current execution. Read-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct InvocationContext {
    pub request_id: String,
    pub function_name: String,
    pub function_version: String,
    pub memory_limit_mb: u32,
    pub remaining_time_ms: u64,
}

impl Default for InvocationContext {
    /// Local-invocation fallbacks used when no Lambda environment is present.
    fn default() -> Self {
        Self {
            request_id: LOCAL_REQUEST_ID.to_owned(),
            function_name: "hello-world-lambda".to_owned(),
            function_version: DEFAULT_FUNCTION_VERSION.to_owned(),
            memory_limit_mb: DEFAULT_MEMORY_LIMIT_MB,
            remaining_time_ms: 0,
        }
    }
}

impl InvocationContext {
    /// Reads the standard `AWS_LAMBDA_FUNCTION_*` variables, falling back to
    /// the local defaults when they are absent.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            function_name: env::var(FUNCTION_NAME_ENV).unwrap_or(defaults.function_name),
            function_version: env::var(FUNCTION_VERSION_ENV).unwrap_or(defaults.function_version),
            memory_limit_mb: env::var(MEMORY_LIMIT_ENV)
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.memory_limit_mb),
            request_id: defaults.request_id,
            remaining_time_ms: defaults.remaining_time_ms,
        }
    }

    /// Builds a context from the environment plus any per-invocation headers
    /// the runtime or gateway forwarded.
    fn from_parts(parts: &Parts) -> Self {
        let mut context = Self::from_env();
        let headers = &parts.headers;

        if let Some(request_id) = headers
            .get(REQUEST_ID_HEADER)
            .or_else(|| headers.get(AMZN_REQUEST_ID_HEADER))
            .and_then(|value| value.to_str().ok())
        {
            context.request_id = request_id.to_owned();
        }

        if let Some(deadline_ms) = headers
            .get(DEADLINE_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok())
        {
            context.remaining_time_ms = deadline_ms.saturating_sub(now_ms());
        }

        context
    }
}

fn now_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

#[async_trait]
impl<S> FromRequestParts<S> for InvocationContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use std::sync::{Mutex, OnceLock};

    fn env_lock() -> &'static Mutex<()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn defaults_describe_a_local_run() {
        let context = InvocationContext::default();
        assert_eq!(context.request_id, "local");
        assert_eq!(context.function_version, "$LATEST");
        assert_eq!(context.memory_limit_mb, 128);
        assert_eq!(context.remaining_time_ms, 0);
    }

    #[test]
    fn reads_lambda_environment() {
        let _guard = env_lock().lock().unwrap();
        unsafe {
            std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "hello-world-lambda-dev");
            std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "42");
            std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "256");
        }

        let context = InvocationContext::from_env();
        assert_eq!(context.function_name, "hello-world-lambda-dev");
        assert_eq!(context.function_version, "42");
        assert_eq!(context.memory_limit_mb, 256);

        unsafe {
            std::env::remove_var("AWS_LAMBDA_FUNCTION_NAME");
            std::env::remove_var("AWS_LAMBDA_FUNCTION_VERSION");
            std::env::remove_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE");
        }
    }

    #[test]
    fn request_id_comes_from_runtime_headers() {
        let _guard = env_lock().lock().unwrap();
        let request = Request::builder()
            .method("GET")
            .uri("https://example.com/")
            .header("lambda-runtime-aws-request-id", "req-123")
            .body(())
            .unwrap();

        let (parts, _) = request.into_parts();
        let context = InvocationContext::from_parts(&parts);
        assert_eq!(context.request_id, "req-123");
    }

    #[test]
    fn gateway_request_id_is_a_fallback() {
        let _guard = env_lock().lock().unwrap();
        let request = Request::builder()
            .method("GET")
            .uri("https://example.com/")
            .header("x-amzn-requestid", "gw-456")
            .body(())
            .unwrap();

        let (parts, _) = request.into_parts();
        let context = InvocationContext::from_parts(&parts);
        assert_eq!(context.request_id, "gw-456");
    }

    #[test]
    fn expired_deadline_saturates_to_zero() {
        let _guard = env_lock().lock().unwrap();
        let request = Request::builder()
            .method("GET")
            .uri("https://example.com/")
            .header("lambda-runtime-deadline-ms", "1")
            .body(())
            .unwrap();

        let (parts, _) = request.into_parts();
        let context = InvocationContext::from_parts(&parts);
        assert_eq!(context.remaining_time_ms, 0);
    }
}
