//! HTTP surface: the image listing endpoint plus static files from the public root.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::category::{Category, ImageRef};
use crate::error::ListError;
use crate::lister::{ImageLister, ImageSource};

#[derive(Clone)]
struct AppState {
    lister: ImageLister,
}

#[derive(Debug, Deserialize)]
struct ImagesQuery {
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImagesResponse {
    images: Vec<ImageRef>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl ListError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCategory(_) => StatusCode::BAD_REQUEST,
            Self::DirectoryNotFound(_) => StatusCode::NOT_FOUND,
            Self::ReadFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        match &self {
            Self::InvalidCategory(raw) => {
                tracing::debug!(requested = %raw, accepted = ?Category::names(), "rejecting image listing");
            }
            Self::DirectoryNotFound(dir) => {
                tracing::warn!(dir = %dir.display(), "image directory missing");
            }
            Self::ReadFailure { .. } => {
                tracing::error!(error = %self, "image listing failed");
            }
        }
        let body = ErrorBody {
            error: self.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Build the application router for the given public root.
pub fn router(lister: ImageLister) -> Router {
    let static_files = ServeDir::new(lister.public_root());
    Router::new()
        .route("/images", get(list_images))
        .route("/api/images", get(list_images))
        .route_service("/images/{*path}", static_files.clone())
        .fallback_service(static_files)
        .with_state(AppState { lister })
        .layer(TraceLayer::new_for_http())
}

async fn list_images(
    State(state): State<AppState>,
    Query(query): Query<ImagesQuery>,
) -> Result<Json<ImagesResponse>, ListError> {
    let category: Category = query.kind.as_deref().unwrap_or_default().parse()?;
    let images = state.lister.fetch(category).await?;
    Ok(Json(ImagesResponse { images }))
}

/// Serve until `cancel` fires.
pub async fn serve(lister: ImageLister, bind_addr: SocketAddr, cancel: CancellationToken) -> Result<()> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {bind_addr}"))?;
    tracing::info!(
        %bind_addr,
        public_root = %lister.public_root().display(),
        "gallery server listening"
    );
    axum::serve(listener, router(lister))
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
        })
        .await
        .context("gallery server exited")?;
    Ok(())
}
