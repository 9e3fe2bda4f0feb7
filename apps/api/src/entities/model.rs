//! Lexical preprocessing model.
//!
//! Plays the role a full language model plays in heavier stacks: a
//! dictionary-backed normalization pass run over the text before the pattern
//! rules. The rules themselves are identical with or without it; only the
//! text they see changes.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static HYPHEN_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)-\n\s*(\w+)").unwrap());

/// Word dictionary loaded once at startup. Read-only afterwards; safe to
/// share across concurrent requests.
pub struct Lexicon {
    words: HashSet<String>,
}

impl Lexicon {
    /// Loads a word list from disk: one token per line, `#` comments allowed.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon at '{}'", path.display()))?;

        let words: HashSet<String> = raw
            .lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();

        anyhow::ensure!(
            !words.is_empty(),
            "Lexicon at '{}' contains no words",
            path.display()
        );
        Ok(Self { words })
    }

    /// Builds an in-memory lexicon without touching disk.
    #[cfg(test)]
    pub(crate) fn load_for_tests(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Normalizes text before rule matching: rejoins words hyphenated across
    /// line breaks when the joined form is in the dictionary, and collapses
    /// runs of spaces and tabs within lines. Line structure is preserved;
    /// section scanning depends on it.
    pub fn preprocess(&self, text: &str) -> String {
        let joined = HYPHEN_BREAK_RE.replace_all(text, |caps: &Captures| {
            let candidate = format!("{}{}", &caps[1], &caps[2]);
            if self.contains(&candidate) {
                candidate
            } else {
                caps[0].to_string()
            }
        });

        joined
            .lines()
            .map(|line| {
                line.split([' ', '\t'])
                    .filter(|word| !word.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
