//! Curated skill vocabulary matched against resume text.
//!
//! Entries are stored lower-case; matching is substring containment over the
//! lower-cased text, so multi-word entries ("machine learning") work without
//! tokenization.

/// Technical terms: languages, frameworks, data stores, platforms, tooling.
pub const TECHNICAL_SKILLS: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "react",
    "angular",
    "vue",
    "node.js",
    "express",
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "html",
    "css",
    "java",
    "c++",
    "c#",
    "php",
    "ruby",
    "go",
    "rust",
    "swift",
    "kotlin",
    "dart",
    "flutter",
    "machine learning",
    "data science",
    "data analysis",
    "artificial intelligence",
    "deep learning",
    "tensorflow",
    "pytorch",
    "scikit-learn",
    "pandas",
    "numpy",
    "matplotlib",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "jenkins",
    "git",
    "github",
    "gitlab",
    "ci/cd",
    "devops",
    "agile",
    "scrum",
    "project management",
];

/// Soft-skill terms.
pub const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "teamwork",
    "problem solving",
    "analytical",
    "critical thinking",
    "time management",
    "adaptability",
    "creativity",
    "attention to detail",
    "multitasking",
    "interpersonal",
    "negotiation",
];

/// All recognized skill terms, technical first.
pub fn all_skills() -> impl Iterator<Item = &'static str> {
    TECHNICAL_SKILLS.iter().chain(SOFT_SKILLS.iter()).copied()
}
