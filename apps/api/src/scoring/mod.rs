//! Similarity scoring between resume text and a job description.
//!
//! Primary: TF-IDF vectors over the two lower-cased texts jointly (unigrams
//! plus bigrams, stop words removed) compared by cosine similarity.
//! Degenerate inputs never raise; they fall back to the keyword-overlap
//! ratio. The result is always within [0, 100].

pub mod stopwords;

use std::collections::{BTreeSet, HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

/// Word tokens: two or more word characters.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Compares resume text against a job description and returns a 0-100 match
/// score. Never fails; the caller rounds for presentation.
pub fn match_score(resume_text: &str, job_description: &str) -> f64 {
    let score = tfidf_cosine(resume_text, job_description)
        .unwrap_or_else(|| overlap_ratio(resume_text, job_description));
    score.clamp(0.0, 100.0)
}

/// Lower-cased tokens with stop words removed, then unigrams plus bigrams
/// over the filtered stream.
fn terms(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let words: Vec<&str> = TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|w| !stopwords::STOP_WORDS.contains(w))
        .collect();

    let mut terms: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    for pair in words.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}

fn term_counts(terms: &[String]) -> HashMap<&str, f64> {
    let mut counts: HashMap<&str, f64> = HashMap::new();
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0.0) += 1.0;
    }
    counts
}

/// Cosine similarity of the two TF-IDF vectors as a percentage. Returns
/// `None` on degenerate input (no usable terms on either side, or a
/// zero-magnitude vector) so the caller can take the overlap fallback.
fn tfidf_cosine(resume_text: &str, job_description: &str) -> Option<f64> {
    let resume_terms = terms(resume_text);
    let jd_terms = terms(job_description);
    if resume_terms.is_empty() || jd_terms.is_empty() {
        return None;
    }

    let resume_tf = term_counts(&resume_terms);
    let jd_tf = term_counts(&jd_terms);

    let vocabulary: BTreeSet<&str> = resume_tf.keys().chain(jd_tf.keys()).copied().collect();

    // Smoothed IDF over the two-document corpus: ln((1 + n) / (1 + df)) + 1.
    let mut resume_vec = Vec::with_capacity(vocabulary.len());
    let mut jd_vec = Vec::with_capacity(vocabulary.len());
    for term in vocabulary {
        let df = resume_tf.contains_key(term) as u32 + jd_tf.contains_key(term) as u32;
        let idf = ((1.0 + 2.0) / (1.0 + f64::from(df))).ln() + 1.0;
        resume_vec.push(resume_tf.get(term).copied().unwrap_or(0.0) * idf);
        jd_vec.push(jd_tf.get(term).copied().unwrap_or(0.0) * idf);
    }

    cosine(&resume_vec, &jd_vec).map(|c| c * 100.0)
}

fn cosine(a: &[f64], b: &[f64]) -> Option<f64> {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let a_norm = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let b_norm = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if a_norm == 0.0 || b_norm == 0.0 {
        return None;
    }
    Some(dot / (a_norm * b_norm))
}

/// Distinct-token overlap as a percentage. The divisor is the
/// job-description vocabulary alone, not the union; zero distinct job
/// tokens score 0.
fn overlap_ratio(resume_text: &str, job_description: &str) -> f64 {
    let resume_words: HashSet<String> = resume_text
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let jd_words: HashSet<String> = job_description
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    if jd_words.is_empty() {
        return 0.0;
    }
    let common = resume_words.intersection(&jd_words).count();
    common as f64 / jd_words.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Senior engineer with Python, React and Docker experience. \
        Built data pipelines and led a team of five.";
    const JOB: &str = "We are hiring an engineer with Python and React skills. \
        Docker experience is a plus.";

    #[test]
    fn test_identical_texts_score_at_maximum() {
        let score = match_score(RESUME, RESUME);
        assert!(score > 99.9, "score was {score}");
        assert!(score <= 100.0);
    }

    #[test]
    fn test_related_texts_score_between_bounds() {
        let score = match_score(RESUME, JOB);
        assert!(score > 0.0, "score was {score}");
        assert!(score < 100.0, "score was {score}");
    }

    #[test]
    fn test_disjoint_vocabulary_scores_zero() {
        let score = match_score("alpha beta gamma", "delta epsilon zeta");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_empty_job_description_scores_zero() {
        assert_eq!(match_score(RESUME, ""), 0.0);
    }

    #[test]
    fn test_empty_resume_scores_zero() {
        assert_eq!(match_score("", JOB), 0.0);
    }

    #[test]
    fn test_single_character_inputs_do_not_panic() {
        // Single characters never tokenize; the fallback path handles them.
        let score = match_score("a", "b");
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn test_stop_word_only_texts_use_overlap_fallback() {
        // Every token is a stop word, so TF-IDF has no vocabulary; the raw
        // overlap ratio still produces a bounded score.
        let score = match_score("the and with", "the and with");
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_score_always_within_bounds() {
        let cases = [
            ("", ""),
            ("x", "x"),
            ("Python Python Python", "Python"),
            (RESUME, JOB),
            ("completely unrelated words here", "nothing shared at all"),
        ];
        for (resume, jd) in cases {
            let score = match_score(resume, jd);
            assert!(
                (0.0..=100.0).contains(&score),
                "score {score} out of bounds for {resume:?} / {jd:?}"
            );
        }
    }

    #[test]
    fn test_overlap_ratio_divides_by_job_vocabulary_only() {
        // Three of four distinct job tokens appear in the resume: 75%.
        let score = overlap_ratio("python react docker extra words", "python react docker sql");
        assert!((score - 75.0).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn test_bigrams_reward_phrase_matches() {
        let with_phrase = match_score("machine learning engineer", "machine learning role");
        let without_phrase = match_score("learning about machine parts", "machine learning role");
        assert!(
            with_phrase > without_phrase,
            "{with_phrase} vs {without_phrase}"
        );
    }
}
