//! Improvement suggestions: an external-service strategy with a
//! deterministic rule-based fallback behind one interface.
//!
//! The orchestrator only ever talks to the chain; whether the external
//! service ran, failed, or was never configured is invisible upstream.

pub mod prompts;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::entities::patterns::CandidateProfile;
use crate::llm_client::{LlmClient, LlmError};
use crate::suggestions::prompts::{SUGGESTION_PROMPT_TEMPLATE, SUGGESTION_SYSTEM};

/// Hard cap on returned suggestions.
pub const MAX_SUGGESTIONS: usize = 5;

const RESUME_PROMPT_CHARS: usize = 2000;
const JD_PROMPT_CHARS: usize = 1000;
const PROMPT_SKILLS: usize = 10;
const PROMPT_EXPERIENCE: usize = 5;
const PROMPT_EDUCATION: usize = 3;

const LOW_SCORE_MSG: &str = "Your resume has low similarity to the job requirements. \
    Consider tailoring it more specifically to the role.";
const MID_SCORE_MSG: &str = "Good foundation, but there's room for improvement in \
    aligning your experience with job requirements.";
const FEW_SKILLS_MSG: &str =
    "Add more relevant technical and soft skills that match the job description.";
const FEW_EXPERIENCE_MSG: &str =
    "Include more detailed work experience with specific achievements and responsibilities.";
const ACTION_VERBS_MSG: &str =
    "Use action verbs to describe your accomplishments (achieved, implemented, led, etc.)";
const QUANTIFY_MSG: &str = "Include quantifiable results and metrics where possible \
    (increased sales by 20%, managed team of 10, etc.)";
const ATS_FORMAT_MSG: &str =
    "Ensure your resume is ATS-friendly with clear section headers and standard formatting";

/// Leading numbering/bullet markers stripped from response lines.
static MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d\-\x{2022}.\s]+").unwrap());

/// The suggestion generator trait. Infallible by design: implementations
/// must degrade internally rather than surface failures to the pipeline.
#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    async fn generate(
        &self,
        resume_text: &str,
        job_description: &str,
        profile: &CandidateProfile,
        match_score: f64,
    ) -> Vec<String>;
}

/// External-service strategy. Fallible; always wrapped in `SuggestionChain`.
pub struct LlmSuggester {
    llm: LlmClient,
}

impl LlmSuggester {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    async fn try_generate(
        &self,
        resume_text: &str,
        job_description: &str,
        profile: &CandidateProfile,
        match_score: f64,
    ) -> Result<Vec<String>, LlmError> {
        let prompt = build_prompt(resume_text, job_description, profile, match_score);
        let response = self.llm.call(&prompt, SUGGESTION_SYSTEM).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;

        let suggestions = parse_suggestions(text);
        if suggestions.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(suggestions)
    }
}

/// Deterministic rules used when the external service is not configured,
/// fails, or returns nothing usable. Reproducible for a fixed
/// (score, profile) pair.
pub struct RuleBasedSuggester;

impl RuleBasedSuggester {
    pub fn suggest(&self, profile: &CandidateProfile, match_score: f64) -> Vec<String> {
        let mut suggestions = Vec::new();

        if match_score < 30.0 {
            suggestions.push(LOW_SCORE_MSG.to_string());
        } else if match_score < 60.0 {
            suggestions.push(MID_SCORE_MSG.to_string());
        }

        if profile.skills.len() < 5 {
            suggestions.push(FEW_SKILLS_MSG.to_string());
        }

        if profile.experience.len() < 2 {
            suggestions.push(FEW_EXPERIENCE_MSG.to_string());
        }

        for filler in [ACTION_VERBS_MSG, QUANTIFY_MSG, ATS_FORMAT_MSG] {
            suggestions.push(filler.to_string());
        }

        suggestions.truncate(MAX_SUGGESTIONS);
        suggestions
    }
}

#[async_trait]
impl SuggestionGenerator for RuleBasedSuggester {
    async fn generate(
        &self,
        _resume_text: &str,
        _job_description: &str,
        profile: &CandidateProfile,
        match_score: f64,
    ) -> Vec<String> {
        self.suggest(profile, match_score)
    }
}

/// Fallback chain: tries the external strategy when configured, degrades
/// silently to the rule-based strategy on any failure.
pub struct SuggestionChain {
    primary: Option<LlmSuggester>,
    fallback: RuleBasedSuggester,
}

impl SuggestionChain {
    pub fn new(primary: Option<LlmSuggester>) -> Self {
        Self {
            primary,
            fallback: RuleBasedSuggester,
        }
    }
}

#[async_trait]
impl SuggestionGenerator for SuggestionChain {
    async fn generate(
        &self,
        resume_text: &str,
        job_description: &str,
        profile: &CandidateProfile,
        match_score: f64,
    ) -> Vec<String> {
        if let Some(primary) = &self.primary {
            match primary
                .try_generate(resume_text, job_description, profile, match_score)
                .await
            {
                Ok(suggestions) => {
                    debug!("Suggestions generated by external service");
                    return suggestions;
                }
                Err(e) => {
                    warn!("Suggestion service unavailable, using rule-based fallback: {e}");
                }
            }
        }
        self.fallback.suggest(profile, match_score)
    }
}

/// Builds the bounded prompt: resume and job description truncated on char
/// boundaries, extracted lists capped, score to one decimal.
fn build_prompt(
    resume_text: &str,
    job_description: &str,
    profile: &CandidateProfile,
    match_score: f64,
) -> String {
    SUGGESTION_PROMPT_TEMPLATE
        .replace("{resume_text}", truncate_chars(resume_text, RESUME_PROMPT_CHARS))
        .replace(
            "{job_description}",
            truncate_chars(job_description, JD_PROMPT_CHARS),
        )
        .replace("{skills}", &join_first(&profile.skills, PROMPT_SKILLS))
        .replace(
            "{experience}",
            &join_first(&profile.experience, PROMPT_EXPERIENCE),
        )
        .replace(
            "{education}",
            &join_first(&profile.education, PROMPT_EDUCATION),
        )
        .replace("{match_score}", &format!("{match_score:.1}"))
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

fn join_first(items: &std::collections::BTreeSet<String>, limit: usize) -> String {
    items
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Keeps lines that start with a digit, dash, or bullet, strips the leading
/// marker, and returns up to `MAX_SUGGESTIONS` non-empty entries in response
/// order.
fn parse_suggestions(response: &str) -> Vec<String> {
    let mut suggestions = Vec::new();
    for line in response.lines() {
        let line = line.trim();
        let Some(first) = line.chars().next() else {
            continue;
        };
        if first.is_ascii_digit() || first == '-' || first == '\u{2022}' {
            let cleaned = MARKER_RE.replace(line, "");
            let cleaned = cleaned.trim();
            if !cleaned.is_empty() {
                suggestions.push(cleaned.to_string());
                if suggestions.len() == MAX_SUGGESTIONS {
                    break;
                }
            }
        }
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::patterns::extract_profile;

    fn profile_with(skills: usize, experience: usize) -> CandidateProfile {
        let mut profile = CandidateProfile::default();
        for i in 0..skills {
            profile.skills.insert(format!("skill-{i}"));
        }
        for i in 0..experience {
            profile.experience.insert(format!("Company {i} (2019-2022)"));
        }
        profile
    }

    #[test]
    fn test_fallback_sequence_for_low_score_sparse_profile() {
        // score 25, 2 skills, 0 experience: the full fixed sequence, 5 deep.
        let suggestions = RuleBasedSuggester.suggest(&profile_with(2, 0), 25.0);
        assert_eq!(
            suggestions,
            vec![
                LOW_SCORE_MSG.to_string(),
                FEW_SKILLS_MSG.to_string(),
                FEW_EXPERIENCE_MSG.to_string(),
                ACTION_VERBS_MSG.to_string(),
                QUANTIFY_MSG.to_string(),
            ]
        );
    }

    #[test]
    fn test_fallback_mid_score_message() {
        let suggestions = RuleBasedSuggester.suggest(&profile_with(8, 3), 45.0);
        assert_eq!(suggestions[0], MID_SCORE_MSG);
        assert!(!suggestions.contains(&LOW_SCORE_MSG.to_string()));
    }

    #[test]
    fn test_fallback_high_score_skips_band_messages() {
        let suggestions = RuleBasedSuggester.suggest(&profile_with(8, 3), 75.0);
        assert_eq!(
            suggestions,
            vec![
                ACTION_VERBS_MSG.to_string(),
                QUANTIFY_MSG.to_string(),
                ATS_FORMAT_MSG.to_string(),
            ]
        );
    }

    #[test]
    fn test_fallback_never_exceeds_cap() {
        for score in [0.0, 25.0, 45.0, 75.0, 100.0] {
            for (skills, experience) in [(0, 0), (2, 1), (10, 5)] {
                let suggestions =
                    RuleBasedSuggester.suggest(&profile_with(skills, experience), score);
                assert!(suggestions.len() <= MAX_SUGGESTIONS);
                assert!(!suggestions.is_empty());
            }
        }
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let profile = profile_with(3, 1);
        let first = RuleBasedSuggester.suggest(&profile, 42.0);
        let second = RuleBasedSuggester.suggest(&profile, 42.0);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_chain_without_primary_uses_rules() {
        let chain = SuggestionChain::new(None);
        let profile = profile_with(2, 0);
        let suggestions = chain.generate("resume", "job", &profile, 25.0).await;
        assert_eq!(suggestions, RuleBasedSuggester.suggest(&profile, 25.0));
    }

    #[test]
    fn test_parse_numbered_dashed_and_bulleted_lines() {
        let response = "Here are my thoughts:\n\
            1. Add cloud certifications\n\
            - Quantify your impact\n\
            \u{2022} Mirror the job title\n\
            Ignore this narrative line.\n\
            2) Lead with results";
        let suggestions = parse_suggestions(response);
        assert_eq!(
            suggestions,
            vec![
                "Add cloud certifications",
                "Quantify your impact",
                "Mirror the job title",
                ") Lead with results",
            ]
        );
    }

    #[test]
    fn test_parse_caps_at_five() {
        let response = "1. a\n2. b\n3. c\n4. d\n5. e\n6. f\n7. g";
        let suggestions = parse_suggestions(response);
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions[4], "e");
    }

    #[test]
    fn test_parse_skips_marker_only_lines() {
        let suggestions = parse_suggestions("1.\n- \n\u{2022}\n2. Real suggestion");
        assert_eq!(suggestions, vec!["Real suggestion"]);
    }

    #[test]
    fn test_parse_prose_response_yields_nothing() {
        let suggestions = parse_suggestions("The resume looks fine overall.\nNo list here.");
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_prompt_truncates_long_inputs() {
        let resume = "r".repeat(5000);
        let jd = "j".repeat(3000);
        let profile = extract_profile("Python resume text");
        let prompt = build_prompt(&resume, &jd, &profile, 61.27);

        assert!(prompt.contains(&"r".repeat(RESUME_PROMPT_CHARS)));
        assert!(!prompt.contains(&"r".repeat(RESUME_PROMPT_CHARS + 1)));
        assert!(prompt.contains(&"j".repeat(JD_PROMPT_CHARS)));
        assert!(!prompt.contains(&"j".repeat(JD_PROMPT_CHARS + 1)));
        assert!(prompt.contains("61.3%"));
    }

    #[test]
    fn test_prompt_caps_extracted_lists() {
        let profile = profile_with(20, 10);
        let prompt = build_prompt("resume", "job", &profile, 50.0);
        // skill-0 .. skill-9 make the cut; BTreeSet order puts skill-10 first
        // lexicographically, so just count separators in the skills line.
        let skills_line = prompt
            .lines()
            .find(|l| l.starts_with("- Skills:"))
            .unwrap();
        assert_eq!(skills_line.matches(", ").count(), PROMPT_SKILLS - 1);
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        let text = "résumé".repeat(1000);
        let truncated = truncate_chars(&text, 2000);
        assert_eq!(truncated.chars().count(), 2000);
    }
}
