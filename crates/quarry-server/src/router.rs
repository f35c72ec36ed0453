//! HTTP routes.

use crate::error::ApiError;
use crate::state::SharedState;
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use percent_encoding::percent_decode_str;
use quarry_core::protocol::{
    SearchHit, SearchRequest, SearchResponse, StatusReport, SEARCH_PATH, STATUS_PATH,
};
use quarry_core::filter::{document_kind, DocumentKind};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

const INDEX_HTML: &str = include_str!("../static/index.html");
const INDEX_JS: &str = include_str!("../static/index.js");
const NOT_FOUND_HTML: &str = include_str!("../static/404.html");

/// Build the application router.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/index.html", get(index_page))
        .route("/index.js", get(index_js))
        .route(SEARCH_PATH, post(search))
        .route(STATUS_PATH, get(status))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn index_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        INDEX_JS,
    )
}

async fn search(
    State(state): State<SharedState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = payload?;

    let server = &state.config.server;
    let limit = request
        .limit
        .unwrap_or(server.result_limit)
        .min(server.max_result_limit);

    let results: Vec<SearchHit> = {
        let model = state.model();
        model
            .search(&request.query, limit)
            .into_iter()
            .map(|hit| SearchHit {
                id: hit.path.to_string_lossy().into_owned(),
                score: hit.score,
            })
            .collect()
    };

    info!(
        query = %request.query,
        limit,
        hits = results.len(),
        "Search served"
    );
    for hit in &results {
        debug!("{} => {}", hit.id, hit.score);
    }

    Ok(Json(SearchResponse { results }))
}

async fn status(State(state): State<SharedState>) -> Json<StatusReport> {
    let (documents, terms) = {
        let model = state.model();
        (model.len(), model.term_count())
    };

    Json(StatusReport {
        documents,
        terms,
        indexing: state.is_indexing(),
        last_indexed: state.last_indexed(),
        version: quarry_core::build_info::BUILD_INFO.version.to_string(),
    })
}

/// Serve indexed documents by id; everything else is a 404 page.
async fn fallback(State(state): State<SharedState>, method: Method, uri: Uri) -> Response {
    if method == Method::GET {
        let id = percent_decode_str(uri.path().trim_start_matches('/')).decode_utf8_lossy();
        if let Some(path) = state.resolve_document(&id) {
            return serve_document(&path).await;
        }
    }

    debug!(%method, %uri, "No route");
    not_found()
}

async fn serve_document(path: &std::path::Path) -> Response {
    let content_type = match document_kind(path) {
        Some(DocumentKind::Html) => "text/html; charset=utf-8",
        _ => "text/plain; charset=utf-8",
    };

    match tokio::fs::read(path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type)],
            Body::from(bytes),
        )
            .into_response(),
        Err(e) => {
            warn!("Could not open {}: {}", path.display(), e);
            not_found()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_HTML)).into_response()
}
