use axum::Router;
use axum::extract::Extension;
use tokio::net::TcpListener;

use crate::config::RuntimeConfig;
use crate::context::InvocationContext;
use crate::error::Result;
use crate::handler::Handler;
use crate::request::RequestDescriptor;
use crate::response::ResponseEnvelope;

/// Serves the handler behind a local Axum listener.
///
/// Every method and path lands on the same invocation entry point, matching
/// the single-function Lambda contract.
pub async fn serve(handler: Handler, config: RuntimeConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        environment = %handler.config().environment,
        project = %handler.config().project_name,
        "hello-world-lambda listening"
    );

    let router = Router::new().fallback(invoke).layer(Extension(handler));
    let service = router.into_make_service();

    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .into_future()
        .await?;

    Ok(())
}

/// Loads [`RuntimeConfig`] from the environment and starts serving.
pub async fn run() -> Result<()> {
    let config = RuntimeConfig::from_env()?;
    let handler = Handler::new(config.handler.clone());
    serve(handler, config).await
}

async fn invoke(
    Extension(handler): Extension<Handler>,
    context: InvocationContext,
    request: RequestDescriptor,
) -> ResponseEnvelope {
    handler.handle(&request, &context)
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = sigterm.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
