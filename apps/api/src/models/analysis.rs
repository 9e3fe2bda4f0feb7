use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::patterns::ContactInfo;

/// Completed analysis for one uploaded resume. Assembled once by the
/// pipeline, persisted, and returned verbatim as the response body. Never
/// mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: Uuid,
    pub extracted_text: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub contact_info: ContactInfo,
    /// 0-100, rounded to one decimal.
    pub job_match_score: f64,
    /// Ranked, at most five entries.
    pub suggestions: Vec<String>,
    /// Wall-clock seconds for the whole pipeline, rounded to two decimals.
    pub processing_time: f64,
    pub created_at: DateTime<Utc>,
}
