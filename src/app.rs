use std::net::SocketAddr;

use axum::{http::Uri, routing::get, Json, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{auth, config::AppConfig, error::ApiError, state::AppState};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/api", auth::router())
        .fallback(not_found)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "hello world" }))
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Not found - {uri}"))
}

fn bind_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", config.host, config.port).parse()?)
}

pub async fn serve(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr = bind_addr(config)?;
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_addr_comes_from_config() {
        let mut config = (*AppState::fake().config).clone();
        config.host = "127.0.0.1".into();
        config.port = 4123;
        let addr = bind_addr(&config).expect("valid address");
        assert_eq!(addr.to_string(), "127.0.0.1:4123");
    }
}
