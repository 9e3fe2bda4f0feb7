//! Orchestrates the analysis pipeline: extract text, extract entities,
//! score, suggest, assemble.
//!
//! Stages run strictly in sequence per request; the suggestion stage is the
//! only await point. Format, extraction, and empty-text failures propagate;
//! scoring and suggestion degradation never do.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::entities::EntityExtractor;
use crate::errors::AppError;
use crate::extraction::{self, DocumentFormat};
use crate::models::analysis::AnalysisResult;
use crate::scoring;
use crate::suggestions::SuggestionGenerator;

/// The per-request pipeline. Cheap to clone; both strategies are shared,
/// read-only, and fixed at startup.
#[derive(Clone)]
pub struct AnalysisPipeline {
    entities: Arc<dyn EntityExtractor>,
    suggester: Arc<dyn SuggestionGenerator>,
}

impl AnalysisPipeline {
    pub fn new(
        entities: Arc<dyn EntityExtractor>,
        suggester: Arc<dyn SuggestionGenerator>,
    ) -> Self {
        Self {
            entities,
            suggester,
        }
    }

    /// Runs the full analysis for one uploaded document.
    pub async fn analyze(
        &self,
        filename: &str,
        bytes: &[u8],
        job_description: &str,
    ) -> Result<AnalysisResult, AppError> {
        let started = Instant::now();

        let format = DocumentFormat::from_filename(filename)?;
        let extracted_text = extraction::extract_text(bytes, format)?;
        if extracted_text.is_empty() {
            return Err(AppError::EmptyText);
        }

        let profile = self.entities.extract(&extracted_text);
        debug!(
            skills = profile.skills.len(),
            experience = profile.experience.len(),
            education = profile.education.len(),
            "Entities extracted"
        );

        let match_score = scoring::match_score(&extracted_text, job_description);

        let suggestions = self
            .suggester
            .generate(&extracted_text, job_description, &profile, match_score)
            .await;

        let processing_time = started.elapsed().as_secs_f64();

        Ok(AnalysisResult {
            id: Uuid::new_v4(),
            skills: profile.skills.into_iter().collect(),
            experience: profile.experience.into_iter().collect(),
            education: profile.education.into_iter().collect(),
            contact_info: profile.contact_info,
            job_match_score: round_to(match_score, 1),
            suggestions,
            extracted_text,
            processing_time: round_to(processing_time, 2),
            created_at: Utc::now(),
        })
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
