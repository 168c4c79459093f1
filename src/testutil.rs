//! Local HTTP endpoints standing in for the real page during tests.

use axum::http::HeaderMap;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

pub fn fixture() -> String {
    std::fs::read_to_string("tests/fixtures/uniben.html").unwrap()
}

/// Serve `app` on an ephemeral port and return its base URL (with trailing slash).
pub async fn spawn_app(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

pub async fn serve_html(html: String) -> String {
    spawn_app(Router::new().route("/", get(move || async move { Html(html) }))).await
}

/// Echo the request's User-Agent header back as the body.
pub async fn serve_user_agent() -> String {
    let app = Router::new().route(
        "/",
        get(|headers: HeaderMap| async move {
            headers
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string()
        }),
    );
    spawn_app(app).await
}

/// Accepts connections and never answers.
pub async fn silent_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}/")
}
