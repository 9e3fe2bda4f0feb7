//! Entity extraction: plain text in, structured candidate profile out.
//!
//! Two interchangeable strategies behind one trait, selected once at startup
//! by whether the lexical model loaded. The availability flag is decided at
//! construction and never re-checked per call. Both strategies share the
//! exact rule set in `patterns`.

pub mod model;
pub mod patterns;
pub mod vocabulary;

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::entities::model::Lexicon;
use crate::entities::patterns::CandidateProfile;

/// The entity extractor trait. Carried in `AppState` as
/// `Arc<dyn EntityExtractor>`; implementations must be shareable across
/// concurrent requests.
pub trait EntityExtractor: Send + Sync {
    fn extract(&self, text: &str) -> CandidateProfile;

    /// Label for logs and diagnostics.
    fn backend(&self) -> &'static str;
}

/// Rule matching over the raw text. Used directly when no model is available.
pub struct PatternExtractor;

impl EntityExtractor for PatternExtractor {
    fn extract(&self, text: &str) -> CandidateProfile {
        patterns::extract_profile(text)
    }

    fn backend(&self) -> &'static str {
        "pattern"
    }
}

/// Runs the lexical preprocessing pass, then the same rules.
pub struct ModelBackedExtractor {
    lexicon: Lexicon,
}

impl ModelBackedExtractor {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }
}

impl EntityExtractor for ModelBackedExtractor {
    fn extract(&self, text: &str) -> CandidateProfile {
        patterns::extract_profile(&self.lexicon.preprocess(text))
    }

    fn backend(&self) -> &'static str {
        "model"
    }
}

/// Builds the extractor for this process. The lexicon is loaded at most
/// once; a missing or unreadable word list downgrades to the pattern
/// strategy with a warning rather than failing startup.
pub fn build_extractor(config: &Config) -> Arc<dyn EntityExtractor> {
    match &config.lexicon_path {
        Some(path) => match Lexicon::load(Path::new(path)) {
            Ok(lexicon) => {
                info!(
                    "Lexicon loaded ({} words); using model-backed entity extraction",
                    lexicon.len()
                );
                Arc::new(ModelBackedExtractor::new(lexicon))
            }
            Err(e) => {
                warn!("Failed to load lexicon: {e:#}; falling back to pattern extraction");
                Arc::new(PatternExtractor)
            }
        },
        None => {
            info!("No LEXICON_PATH configured; using pattern entity extraction");
            Arc::new(PatternExtractor)
        }
    }
}
