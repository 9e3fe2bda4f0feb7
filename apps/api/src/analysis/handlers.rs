//! Axum route handlers for the Analysis API.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use tracing::info;

use crate::analysis::store;
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;

/// POST /api/v1/analyses
/// Multipart form with a `file` part (the resume, any supported format) and
/// a `job_description` text part.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid file: {e}")))?;
                file = Some((filename, data));
            }
            Some("job_description") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid job description: {e}")))?;
                job_description = Some(text);
            }
            _ => {}
        }
    }

    let (filename, data) =
        file.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    let job_description = job_description
        .ok_or_else(|| AppError::Validation("No job description provided".to_string()))?;

    info!(filename = %filename, size = data.len(), "Analyzing resume");

    // The pipeline runs as a detached task: a client that abandons the
    // request cannot cancel an in-flight analysis, only discard its result.
    let pipeline = state.pipeline.clone();
    let result = tokio::spawn(async move {
        pipeline.analyze(&filename, &data, &job_description).await
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Analysis task failed: {e}")))??;

    store::insert_analysis(&state.db, &result).await?;

    info!(
        analysis_id = %result.id,
        score = result.job_match_score,
        processing_time = result.processing_time,
        "Resume analysis completed"
    );

    Ok(Json(result))
}
