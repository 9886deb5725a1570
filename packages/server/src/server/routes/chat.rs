use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domains::pipeline::{PipelineError, PipelineResult};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Run the writing pipeline on the user's message and return every step.
pub async fn chat_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<PipelineResult>, PipelineError> {
    let result = state.pipeline.run(&request.message).await?;
    Ok(Json(result))
}

/// Client errors are described; collaborator failures are not.
impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let (status, detail) = if self.is_client_error() {
            (StatusCode::BAD_REQUEST, "Message cannot be empty")
        } else {
            error!(error = %self, "Pipeline failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Pipeline failed")
        };

        (
            status,
            Json(ErrorResponse {
                detail: detail.to_string(),
            }),
        )
            .into_response()
    }
}
