use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::fetch::Fetcher;
use crate::parser::extract::{
    acceptance, announcements, extract_all, hostel, postgraduate, requirements, undergraduate,
};
use crate::parser::Page;

/// (name, path) of every route, as listed by the discovery endpoint.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("all", "/api/all"),
    ("undergraduateFees", "/api/fees/undergraduate"),
    ("postgraduateFees", "/api/fees/postgraduate"),
    ("hostelFees", "/api/hostel"),
    ("acceptanceFees", "/api/fees/acceptance"),
    ("announcements", "/api/announcements"),
    ("requirements", "/api/requirements"),
    ("health", "/health"),
];

/// `{success, data}` / `{success, error}` response body.
#[derive(Debug, Serialize)]
struct Envelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn router(fetcher: Fetcher) -> Router {
    Router::new()
        .route("/", get(discovery))
        .route("/health", get(health))
        .route("/api/all", get(all))
        .route("/api/fees/undergraduate", get(undergraduate_fees))
        .route("/api/fees/postgraduate", get(postgraduate_fees))
        .route("/api/hostel", get(hostel_fees))
        .route("/api/fees/acceptance", get(acceptance_fees))
        .route("/api/announcements", get(announcement_list))
        .route("/api/requirements", get(requirement_list))
        .with_state(fetcher)
}

pub async fn serve(fetcher: Fetcher, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, source = fetcher.url(), "UNIBEN scraper API listening");
    axum::serve(listener, router(fetcher)).await?;
    Ok(())
}

/// Fetch and parse the page once, then run `extract` on it.
async fn respond<T: Serialize>(fetcher: &Fetcher, extract: fn(&Page) -> T) -> Response {
    match fetcher.load_page().await {
        Ok(page) => Json(Envelope {
            success: true,
            data: Some(extract(&page)),
            error: None,
        })
        .into_response(),
        Err(e) => {
            warn!(error = %e, "request failed");
            let body = Envelope::<()> {
                success: false,
                data: None,
                error: Some(e.to_string()),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

async fn all(State(fetcher): State<Fetcher>) -> Response {
    respond(&fetcher, extract_all).await
}

async fn undergraduate_fees(State(fetcher): State<Fetcher>) -> Response {
    respond(&fetcher, undergraduate::extract).await
}

async fn postgraduate_fees(State(fetcher): State<Fetcher>) -> Response {
    respond(&fetcher, postgraduate::extract).await
}

async fn hostel_fees(State(fetcher): State<Fetcher>) -> Response {
    respond(&fetcher, hostel::extract).await
}

async fn acceptance_fees(State(fetcher): State<Fetcher>) -> Response {
    respond(&fetcher, acceptance::extract).await
}

async fn announcement_list(State(fetcher): State<Fetcher>) -> Response {
    respond(&fetcher, announcements::extract).await
}

async fn requirement_list(State(fetcher): State<Fetcher>) -> Response {
    respond(&fetcher, requirements::extract).await
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

async fn discovery() -> Json<serde_json::Value> {
    let endpoints: serde_json::Map<String, serde_json::Value> = ENDPOINTS
        .iter()
        .map(|(name, path)| (name.to_string(), json!(path)))
        .collect();
    Json(json!({
        "message": "UNIBEN Web Scraper API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": endpoints,
    }))
}
