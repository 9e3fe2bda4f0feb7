// Prompt constants for the suggestion generator. Placeholders are replaced
// by `build_prompt` before sending.

/// System prompt for the suggestion call.
pub const SUGGESTION_SYSTEM: &str =
    "You are an expert resume analyst and career advisor. Provide specific, \
     actionable feedback to improve resumes for better job matching.";

/// Suggestion prompt template. The resume and job description are truncated
/// before substitution; the extracted lists are capped.
pub const SUGGESTION_PROMPT_TEMPLATE: &str = r#"Analyze this resume against the job description and provide specific improvement suggestions.

RESUME CONTENT:
{resume_text}

JOB DESCRIPTION:
{job_description}

EXTRACTED DATA:
- Skills: {skills}
- Experience: {experience}
- Education: {education}

MATCH SCORE: {match_score}%

Please provide 3-5 specific, actionable suggestions to improve this resume for the target job. Focus on:
1. Missing skills or keywords from the job description
2. Experience gaps or improvements
3. Format and presentation enhancements
4. Quantifiable achievements to add

Return ONLY the suggestions as a numbered list, one suggestion per line."#;
