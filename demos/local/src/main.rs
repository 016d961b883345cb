use hello_world_lambda::{Handler, InvocationContext, RequestDescriptor};

#[tokio::main]
async fn main() -> hello_world_lambda::Result<()> {
    tracing_subscriber::fmt::init();

    // Print one sample invocation before serving, mirroring a local smoke test.
    let handler = Handler::from_env()?;
    let request = RequestDescriptor::new("GET", "/").with_header("Accept", "application/json");
    let envelope = handler.handle(&request, &InvocationContext::from_env());
    println!("{}", envelope.body());

    hello_world_lambda::run().await
}
