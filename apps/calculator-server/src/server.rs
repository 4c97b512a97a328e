//! HTTP host: wraps the calculator router with the collaborators configured
//! for this process and serves it until a shutdown signal arrives.
//!
//! Request flow, outermost first: trace -> CORS -> artificial delay -> router.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;
use axum::routing::get;
use rand::Rng;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;
use utoipa::OpenApi;

use crate::config::AppConfig;
use crate::cors::build_cors_layer;

const DOCS_HTML: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Calculator API</title>
    <script src="https://unpkg.com/@stoplight/elements/web-components.min.js"></script>
    <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements/styles.min.css">
  </head>
  <body>
    <elements-api apiDescriptionUrl="/openapi.json" router="hash" layout="sidebar"></elements-api>
  </body>
</html>
"#;

/// Build the full application router from configuration.
///
/// # Errors
/// Returns an error if the CORS section is inconsistent.
pub fn build_router(config: &AppConfig) -> Result<Router> {
    let mut router = calculator::router();

    if config.docs.enabled {
        router = router.merge(docs_router());
    }

    let max_delay_ms = config.server.artificial_delay_ms;
    if max_delay_ms > 0 {
        tracing::info!("Artificial delay enabled: 0-{max_delay_ms}ms");
        router = router.layer(from_fn_with_state(max_delay_ms, artificial_delay));
    }

    if config.cors.enabled {
        tracing::info!("CORS headers enabled");
        router = router.layer(build_cors_layer(&config.cors)?);
    }

    Ok(apply_trace_layer(router))
}

/// Bind, serve, and shut down gracefully on Ctrl+C / SIGTERM.
///
/// # Errors
/// Returns an error if the router cannot be built, the address cannot be
/// bound, or the server fails while running.
pub async fn run(config: AppConfig) -> Result<()> {
    let router = build_router(&config)?;

    let host = config.server.host.as_str();
    let port = config.server.port;
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;
    let addr = listener.local_addr()?;
    tracing::info!("HTTP server bound on {}", addr);
    if config.docs.enabled {
        tracing::info!("API docs: http://{addr}/docs");
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Resolve on Ctrl+C, or SIGTERM on unix. A signal that cannot be installed
/// is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = ctrl_c => "ctrl-c",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal, "shutdown requested, draining connections");
}

/// `OpenAPI` document and viewer page.
fn docs_router() -> Router {
    let openapi_doc = Arc::new(calculator::ApiDoc::openapi());

    Router::new()
        .route(
            "/openapi.json",
            get({
                use axum::{Json, http::header, response::IntoResponse};
                let doc = openapi_doc;
                move || async move {
                    ([(header::CACHE_CONTROL, "no-store")], Json(doc.as_ref())).into_response()
                }
            }),
        )
        .route("/docs", get(|| async { axum::response::Html(DOCS_HTML) }))
}

/// Sleep a random duration in `[0, max_delay_ms)` before dispatching.
async fn artificial_delay(State(max_delay_ms): State<u64>, req: Request, next: Next) -> Response {
    let delay = rand::rng().random_range(0..max_delay_ms);
    tokio::time::sleep(Duration::from_millis(delay)).await;
    next.run(req).await
}

fn apply_trace_layer(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(
                |res: &axum::http::Response<axum::body::Body>,
                 latency: Duration,
                 span: &tracing::Span| {
                    let ms = latency.as_millis();
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", ms);
                    tracing::info!(status = res.status().as_u16(), latency_ms = ms, "request completed");
                },
            ),
    )
}
