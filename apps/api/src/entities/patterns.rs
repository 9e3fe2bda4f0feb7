//! Shared pattern rules for entity extraction.
//!
//! Both extraction strategies run these exact rules; the model-backed
//! strategy only changes the text they see. Collection outputs use set
//! semantics, so repeated mentions collapse to one entry and ordering
//! carries no meaning.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::entities::vocabulary;

/// Contact details found in the resume. Absent values stay unset rather than
/// serializing as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Structured candidate profile. Built once per request, immutable after.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub skills: BTreeSet<String>,
    pub experience: BTreeSet<String>,
    pub education: BTreeSet<String>,
    pub contact_info: ContactInfo,
}

/// A declarative extraction rule: a pattern plus a formatter producing the
/// final entry from its captures. Rules are applied in order; each match
/// yields at most one entry.
struct PatternRule {
    pattern: Regex,
    format: fn(&Captures) -> Option<String>,
}

static EXPERIENCE_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:experience|work history|employment)\b").unwrap());

static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})\s*[-\x{2013}]\s*(\d{4}|(?i:present|current))\s*[:\-]?\s*([A-Z][A-Za-z\s&,\.]+)")
        .unwrap()
});

static YEARS_OF_EXPERIENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)[\s\-]*(?:year|yr)s?\s*(?:of\s*)?(?:experience|exp)").unwrap());

static EDUCATION_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        // Degree keyword, optionally followed by a field of study.
        PatternRule {
            pattern: Regex::new(
                r"(?i)\b(?:bachelor|master|phd|doctorate|degree|diploma|certification|bs|ms|mba|ba|ma)\b(?:\s+(?:of|in)\s+[A-Za-z][A-Za-z ]*)?",
            )
            .unwrap(),
            format: whole_match,
        },
        // "<Capitalized> University" style institution names.
        PatternRule {
            pattern: Regex::new(r"\b[A-Z][a-z]+\s+(?i:university|college|institute)\b").unwrap(),
            format: whole_match,
        },
    ]
});

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}").unwrap()
});

fn whole_match(caps: &Captures) -> Option<String> {
    caps.get(0)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Runs every rule set over the text and assembles the profile.
pub fn extract_profile(text: &str) -> CandidateProfile {
    CandidateProfile {
        skills: extract_skills(text),
        experience: extract_experience(text),
        education: extract_education(text),
        contact_info: extract_contact_info(text),
    }
}

/// Case-insensitive containment of each vocabulary entry in the text.
/// Matches are lower-case by construction (the vocabulary is).
pub fn extract_skills(text: &str) -> BTreeSet<String> {
    let text_lower = text.to_lowercase();
    vocabulary::all_skills()
        .filter(|skill| text_lower.contains(skill))
        .map(str::to_string)
        .collect()
}

/// Date-range entries from experience sections, plus the single maximal
/// "N years of experience" phrase found anywhere in the text.
pub fn extract_experience(text: &str) -> BTreeSet<String> {
    let mut entries = BTreeSet::new();

    for section in experience_sections(text) {
        for caps in DATE_RANGE_RE.captures_iter(&section) {
            let name = caps[3].trim();
            if name.len() > 3 {
                entries.insert(format!("{} ({}-{})", name, &caps[1], &caps[2]));
            }
        }
    }

    let max_years = YEARS_OF_EXPERIENCE_RE
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .max();
    if let Some(years) = max_years {
        entries.insert(format!("{years} years of experience"));
    }

    entries
}

/// Sections introduced by an experience/work-history/employment header,
/// running until the next blank line or the next capitalized header line.
fn experience_sections(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let mut sections = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if EXPERIENCE_HEADER_RE.is_match(lines[i]) {
            let mut section = lines[i].to_string();
            let mut j = i + 1;
            while j < lines.len() && !is_section_break(lines[j]) {
                section.push('\n');
                section.push_str(lines[j]);
                j += 1;
            }
            sections.push(section);
            i = j;
        } else {
            i += 1;
        }
    }
    sections
}

fn is_section_break(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with(|c: char| c.is_ascii_uppercase())
}

/// Applies the ordered education rules; each match becomes one trimmed entry.
pub fn extract_education(text: &str) -> BTreeSet<String> {
    let mut entries = BTreeSet::new();
    for rule in EDUCATION_RULES.iter() {
        for caps in rule.pattern.captures_iter(text) {
            if let Some(entry) = (rule.format)(&caps) {
                entries.insert(entry);
            }
        }
    }
    entries
}

/// First email-shaped and first phone-shaped substrings, if any.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    ContactInfo {
        email: EMAIL_RE.find(text).map(|m| m.as_str().to_string()),
        phone: PHONE_RE.find(text).map(|m| m.as_str().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "\
John Smith
Email: john.smith@email.com | Phone: (555) 123-4567

Skills: Python, JavaScript, React, Docker, leadership

Work Experience
2019 - 2022: Acme Corporation, Senior Engineer
2016 - 2019: Initech Systems

Education
Bachelor of Science in Computer Science
Stanford University";

    #[test]
    fn test_skills_matched_lowercase_and_deduplicated() {
        let text = "Python python PYTHON and React. Also react native.";
        let skills = extract_skills(text);
        assert!(skills.contains("python"));
        assert!(skills.contains("react"));
        // Set semantics: each matched vocabulary entry appears exactly once.
        assert_eq!(skills.iter().filter(|s| s.as_str() == "python").count(), 1);
    }

    #[test]
    fn test_sample_resume_skills_cover_declared_stack() {
        let skills = extract_skills(SAMPLE_RESUME);
        for expected in ["python", "javascript", "react", "docker", "leadership"] {
            assert!(skills.contains(expected), "missing {expected}: {skills:?}");
        }
    }

    #[test]
    fn test_contact_info_from_sample_resume() {
        let contact = extract_contact_info(SAMPLE_RESUME);
        assert_eq!(contact.email.as_deref(), Some("john.smith@email.com"));
        assert_eq!(contact.phone.as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn test_contact_info_absent_keys_stay_unset() {
        let contact = extract_contact_info("no contact details in this text");
        assert_eq!(contact.email, None);
        assert_eq!(contact.phone, None);
    }

    #[test]
    fn test_phone_variants_match() {
        for text in [
            "555-123-4567",
            "555.123.4567",
            "(555) 123-4567",
            "+1 555 123 4567",
            "1-555-123-4567",
        ] {
            let contact = extract_contact_info(text);
            assert!(contact.phone.is_some(), "no match for {text:?}");
        }
    }

    #[test]
    fn test_experience_date_ranges_inside_section() {
        let experience = extract_experience(SAMPLE_RESUME);
        assert!(
            experience.contains("Acme Corporation, Senior Engineer (2019-2022)"),
            "{experience:?}"
        );
        assert!(experience.contains("Initech Systems (2016-2019)"), "{experience:?}");
    }

    #[test]
    fn test_experience_open_ended_range() {
        let text = "Employment\n2020 - present: Globex Industries";
        let experience = extract_experience(text);
        assert!(
            experience.contains("Globex Industries (2020-present)"),
            "{experience:?}"
        );
    }

    #[test]
    fn test_date_ranges_outside_sections_are_ignored() {
        let text = "Projects\n2019 - 2022: Acme Corporation";
        let experience = extract_experience(text);
        assert!(experience.is_empty(), "{experience:?}");
    }

    #[test]
    fn test_section_ends_at_blank_line() {
        let text = "Experience\n2019 - 2022: Acme Corporation\n\n2010 - 2012: Oldjob Inc";
        let experience = extract_experience(text);
        assert!(experience.contains("Acme Corporation (2019-2022)"));
        assert!(!experience.iter().any(|e| e.contains("Oldjob")), "{experience:?}");
    }

    #[test]
    fn test_years_of_experience_keeps_maximum() {
        let text = "I have 5 years of experience in Python and 12 years of experience overall.";
        let experience = extract_experience(text);
        assert!(experience.contains("12 years of experience"), "{experience:?}");
        assert!(!experience.contains("5 years of experience"));
    }

    #[test]
    fn test_years_of_experience_phrasing_variants() {
        for text in ["8 years experience", "8 Years of Experience", "8 yrs exp"] {
            let experience = extract_experience(text);
            assert!(
                experience.contains("8 years of experience"),
                "no match for {text:?}: {experience:?}"
            );
        }
    }

    #[test]
    fn test_education_degree_with_field() {
        let education = extract_education("Bachelor of Science in Computer Science, 2015");
        assert!(
            education.iter().any(|e| e.starts_with("Bachelor of Science")),
            "{education:?}"
        );
    }

    #[test]
    fn test_education_institution_name() {
        let education = extract_education("Studied at Stanford University and elsewhere");
        assert!(education.contains("Stanford University"), "{education:?}");
    }

    #[test]
    fn test_education_bare_degree_keyword() {
        let education = extract_education("Holds an MBA and a diploma");
        assert!(education.contains("MBA"), "{education:?}");
        assert!(education.contains("diploma"), "{education:?}");
    }

    #[test]
    fn test_education_deduplicated() {
        let education = extract_education("Stanford University. Stanford University again.");
        assert_eq!(
            education.iter().filter(|e| e.as_str() == "Stanford University").count(),
            1
        );
    }

    #[test]
    fn test_extract_profile_is_stable_across_runs() {
        let first = extract_profile(SAMPLE_RESUME);
        let second = extract_profile(SAMPLE_RESUME);
        assert_eq!(first.skills, second.skills);
        assert_eq!(first.experience, second.experience);
        assert_eq!(first.education, second.education);
        assert_eq!(first.contact_info, second.contact_info);
    }
}
