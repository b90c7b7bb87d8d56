use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::{AdviceHandler, Submission};
use crate::models::{ImageUpload, UserQuery};

pub mod page;

use page::PageView;

pub struct AppState {
    pub advice_handler: Arc<AdviceHandler>,
    pub max_upload_bytes: usize,
}

pub fn create_router(handler: Arc<AdviceHandler>, max_upload_bytes: usize) -> Router {
    let state = Arc::new(AppState {
        advice_handler: handler,
        max_upload_bytes,
    });

    Router::new()
        .route("/", get(index_handler))
        .route("/advice", post(advice_submit))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

async fn index_handler() -> Html<String> {
    Html(page::render(&PageView::default()))
}

async fn advice_submit(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> (StatusCode, Html<String>) {
    let query = match multipart {
        Ok(multipart) => read_query(multipart).await,
        Err(rejection) => Err((rejection.status(), rejection.body_text())),
    };

    let query = match query {
        Ok(query) => query,
        Err((status, reason)) => {
            log::warn!("⚠️ Rejected submission ({}): {}", status, reason);
            let warning = if status == StatusCode::PAYLOAD_TOO_LARGE {
                format!(
                    "The upload is too large. Please keep images under {}.",
                    format_limit(state.max_upload_bytes)
                )
            } else {
                format!("Could not read the submitted form: {}", reason)
            };
            let body = page::render(&PageView {
                warning: Some(&warning),
                ..Default::default()
            });
            let status = if status == StatusCode::PAYLOAD_TOO_LARGE {
                status
            } else {
                StatusCode::BAD_REQUEST
            };
            return (status, Html(body));
        }
    };

    let question = query.text.clone();
    match state.advice_handler.handle_submission(query).await {
        Submission::NeedsInput(warning) => {
            let body = page::render(&PageView {
                question: &question,
                warning: Some(&warning),
                advice: None,
            });
            (StatusCode::BAD_REQUEST, Html(body))
        }
        Submission::Answered(advice) => {
            let body = page::render(&PageView {
                question: &question,
                warning: None,
                advice: Some(&advice),
            });
            (StatusCode::OK, Html(body))
        }
    }
}

fn form_error(e: MultipartError) -> (StatusCode, String) {
    (e.status(), e.body_text())
}

fn format_limit(bytes: usize) -> String {
    const MB: usize = 1024 * 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{} MB", bytes / MB)
    } else if bytes >= 1024 && bytes % 1024 == 0 {
        format!("{} KB", bytes / 1024)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Collect the `question` and `image` fields; anything else is ignored.
async fn read_query(mut multipart: Multipart) -> Result<UserQuery, (StatusCode, String)> {
    let mut text = String::new();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "question" => {
                text = field.text().await.map_err(form_error)?;
            }
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(form_error)?;
                log::debug!("📸 Received upload {:?} ({} bytes)", file_name, bytes.len());
                image = Some(ImageUpload {
                    bytes: bytes.to_vec(),
                    file_name,
                });
            }
            other => {
                log::debug!("Ignoring unexpected form field: {}", other);
            }
        }
    }

    Ok(UserQuery::new(text, image))
}

async fn health_check() -> &'static str {
    "OK"
}
