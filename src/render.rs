use crate::config::HandlerConfig;
use crate::context::InvocationContext;
use crate::request::RequestDescriptor;

/// Renders the invocation summary as a standalone HTML page.
///
/// Pure string formatting; all decision logic lives in
/// [`negotiate`](crate::negotiate::negotiate).
pub fn render_html(
    config: &HandlerConfig,
    request: &RequestDescriptor,
    context: &InvocationContext,
    timestamp: &str,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Hello World - AWS Lambda</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            margin: 0;
            padding: 0;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
        }}
        .container {{
            text-align: center;
            background: rgba(255, 255, 255, 0.1);
            padding: 2rem;
            border-radius: 15px;
            backdrop-filter: blur(10px);
            box-shadow: 0 8px 32px rgba(0, 0, 0, 0.1);
            max-width: 600px;
            margin: 2rem;
        }}
        h1 {{
            font-size: 3rem;
            margin-bottom: 1rem;
            text-shadow: 2px 2px 4px rgba(0, 0, 0, 0.3);
        }}
        .subtitle {{
            font-size: 1.2rem;
            margin-bottom: 2rem;
            opacity: 0.9;
        }}
        .info-grid {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
            gap: 1rem;
            margin-top: 2rem;
        }}
        .info-card {{
            background: rgba(255, 255, 255, 0.15);
            padding: 1rem;
            border-radius: 10px;
            border: 1px solid rgba(255, 255, 255, 0.2);
        }}
        .info-label {{
            font-weight: bold;
            font-size: 0.9rem;
            opacity: 0.8;
            margin-bottom: 0.5rem;
        }}
        .info-value {{
            font-size: 1rem;
            word-break: break-all;
        }}
        .success-badge {{
            display: inline-block;
            background: #4CAF50;
            color: white;
            padding: 0.5rem 1rem;
            border-radius: 25px;
            font-size: 0.9rem;
            margin-top: 1rem;
        }}
    </style>
</head>
<body>
    <div class="container">
        <h1>Hello World!</h1>
        <p class="subtitle">Successfully deployed with AWS Lambda + Container + Terraform</p>
        <div class="success-badge">Deployment Successful</div>

        <div class="info-grid">
            <div class="info-card">
                <div class="info-label">Environment</div>
                <div class="info-value">{environment}</div>
            </div>
            <div class="info-card">
                <div class="info-label">Project</div>
                <div class="info-value">{project}</div>
            </div>
            <div class="info-card">
                <div class="info-label">Function</div>
                <div class="info-value">{function_name} ({function_version})</div>
            </div>
            <div class="info-card">
                <div class="info-label">Memory</div>
                <div class="info-value">{memory_limit_mb} MB</div>
            </div>
            <div class="info-card">
                <div class="info-label">Timestamp</div>
                <div class="info-value">{timestamp}</div>
            </div>
            <div class="info-card">
                <div class="info-label">Request ID</div>
                <div class="info-value">{request_id}</div>
            </div>
            <div class="info-card">
                <div class="info-label">Path</div>
                <div class="info-value">{path}</div>
            </div>
            <div class="info-card">
                <div class="info-label">Method</div>
                <div class="info-value">{method}</div>
            </div>
        </div>
    </div>
</body>
</html>
"#,
        environment = config.environment.to_uppercase(),
        project = config.project_name,
        function_name = context.function_name,
        function_version = context.function_version,
        memory_limit_mb = context.memory_limit_mb,
        timestamp = timestamp,
        request_id = context.request_id,
        path = request.path,
        method = request.method,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_contains_the_invocation_details() {
        let config = HandlerConfig::builder()
            .environment("staging")
            .project_name("greeter")
            .build();
        let request = RequestDescriptor::new("POST", "/hello");
        let context = InvocationContext {
            request_id: "req-789".to_owned(),
            ..InvocationContext::default()
        };

        let page = render_html(&config, &request, &context, "2024-01-01T00:00:00Z");

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("STAGING"));
        assert!(page.contains("greeter"));
        assert!(page.contains("req-789"));
        assert!(page.contains("/hello"));
        assert!(page.contains("POST"));
        assert!(page.contains("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let config = HandlerConfig::default();
        let request = RequestDescriptor::default();
        let context = InvocationContext::default();

        let first = render_html(&config, &request, &context, "2024-01-01T00:00:00Z");
        let second = render_html(&config, &request, &context, "2024-01-01T00:00:00Z");
        assert_eq!(first, second);
    }
}
