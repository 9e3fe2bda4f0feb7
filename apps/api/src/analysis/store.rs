//! Persistence for completed analyses.
//!
//! The pipeline hands a finished `AnalysisResult` over; nothing here mutates
//! it. Rows are append-only.

use sqlx::PgPool;
use tracing::info;

use crate::models::analysis::AnalysisResult;

/// Creates the analyses table when missing. Called once at startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS analyses (
            id UUID PRIMARY KEY,
            extracted_text TEXT NOT NULL,
            skills TEXT[] NOT NULL,
            experience TEXT[] NOT NULL,
            education TEXT[] NOT NULL,
            contact_email TEXT,
            contact_phone TEXT,
            job_match_score DOUBLE PRECISION NOT NULL,
            suggestions TEXT[] NOT NULL,
            processing_time DOUBLE PRECISION NOT NULL,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Analyses schema ready");
    Ok(())
}

/// Inserts one completed analysis. Ownership of the record ends here.
pub async fn insert_analysis(pool: &PgPool, analysis: &AnalysisResult) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO analyses
            (id, extracted_text, skills, experience, education, contact_email,
             contact_phone, job_match_score, suggestions, processing_time, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(analysis.id)
    .bind(&analysis.extracted_text)
    .bind(&analysis.skills)
    .bind(&analysis.experience)
    .bind(&analysis.education)
    .bind(analysis.contact_info.email.as_deref())
    .bind(analysis.contact_info.phone.as_deref())
    .bind(analysis.job_match_score)
    .bind(&analysis.suggestions)
    .bind(analysis.processing_time)
    .bind(analysis.created_at)
    .execute(pool)
    .await?;

    Ok(())
}
