use sqlx::PgPool;

use crate::analysis::pipeline::AnalysisPipeline;

/// Shared application state injected into all route handlers via Axum
/// extractors. Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// The analysis pipeline with its strategies fixed at construction.
    pub pipeline: AnalysisPipeline,
}
