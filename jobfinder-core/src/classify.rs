//! Heuristics that turn scraped listings into insertable drafts
//!
//! Scraped text is messy; student level and skills are inferred from
//! keywords, and missing required fields get conservative defaults.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::posting::{PostingDraft, StudentLevel};

const FIRST_YEAR_KEYWORDS: &[&str] = &[
    "first year",
    "1st year",
    "freshman",
    "vacation program",
    "summer vacation",
];

const PENULTIMATE_KEYWORDS: &[&str] = &[
    "penultimate",
    "second-to-last year",
    "industrial placement",
    "12 month",
];

const FINAL_YEAR_KEYWORDS: &[&str] = &[
    "final year",
    "graduating",
    "graduate program",
    "honours",
    "honors",
];

const SKILL_VOCABULARY: &[&str] = &[
    "JavaScript",
    "Python",
    "Java",
    "C++",
    "C#",
    "TypeScript",
    "React",
    "Node.js",
    "Angular",
    "Vue",
    "SQL",
    "MongoDB",
    "PostgreSQL",
    "Git",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "GCP",
    "Machine Learning",
    "AI",
    "Data Science",
    "HTML",
    "CSS",
    "REST API",
];

/// Skill name paired with a matcher that refuses to match inside a longer
/// word ("Java" in "JavaScript", "AI" in "maintain").
static SKILL_MATCHERS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    SKILL_VOCABULARY
        .iter()
        .map(|skill| {
            let pattern = format!(r"(?i)(?:^|[^a-z0-9+#.]){}(?:$|[^a-z0-9+#])", regex::escape(skill));
            (*skill, Regex::new(&pattern).expect("invalid skill pattern"))
        })
        .collect()
});

pub const DEFAULT_LOCATION: &str = "Sydney, NSW";
pub const DEFAULT_JOB_TYPE: &str = "Internship";
pub const DEFAULT_SOURCE: &str = "scraped";
pub const DEFAULT_DEGREES: &str = "Computer Science, Software Engineering, IT";

/// Listing as a scraper sees it, before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPosting {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub pay_rate: Option<String>,
    pub application_url: Option<String>,
    pub source: Option<String>,
    pub experience_required: bool,
    pub flexible_hours: bool,
    pub remote_option: bool,
    pub degree_requirements: Option<String>,
    pub application_deadline: Option<NaiveDate>,
}

/// Infer the targeted cohort from free text. Earlier cohorts win when
/// several match; no match means `any`.
pub fn determine_student_level(text: &str) -> StudentLevel {
    let lower = text.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if mentions(FIRST_YEAR_KEYWORDS) {
        StudentLevel::FirstYear
    } else if mentions(PENULTIMATE_KEYWORDS) {
        StudentLevel::Penultimate
    } else if mentions(FINAL_YEAR_KEYWORDS) {
        StudentLevel::FinalYear
    } else {
        StudentLevel::Any
    }
}

/// Comma-joined skills from the fixed vocabulary, in vocabulary order.
pub fn extract_skills(text: &str) -> Option<String> {
    let found: Vec<&str> = SKILL_MATCHERS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(skill, _)| *skill)
        .collect();

    (!found.is_empty()).then(|| found.join(", "))
}

/// Fill defaults and derive level and skills for a scraped listing.
pub fn normalize(raw: RawPosting) -> PostingDraft {
    let text = [
        raw.title.as_deref(),
        raw.description.as_deref(),
        raw.requirements.as_deref(),
    ]
    .iter()
    .flatten()
    .copied()
    .collect::<Vec<_>>()
    .join(" ");

    let mut draft = PostingDraft::new(
        non_blank(raw.title).unwrap_or_else(|| "Unknown".to_owned()),
        non_blank(raw.company).unwrap_or_else(|| "Unknown".to_owned()),
        non_blank(raw.location).unwrap_or_else(|| DEFAULT_LOCATION.to_owned()),
        DEFAULT_JOB_TYPE,
    );

    draft.experience_required = raw.experience_required;
    draft.description = Some(raw.description.unwrap_or_default());
    draft.requirements = Some(raw.requirements.unwrap_or_default());
    draft.pay_rate = non_blank(raw.pay_rate);
    draft.application_url = raw.application_url;
    draft.source = Some(non_blank(raw.source).unwrap_or_else(|| DEFAULT_SOURCE.to_owned()));
    draft.flexible_hours = raw.flexible_hours;
    draft.remote_option = raw.remote_option;
    draft.student_level = determine_student_level(&text);
    draft.skills = extract_skills(&text);
    draft.degree_requirements =
        Some(non_blank(raw.degree_requirements).unwrap_or_else(|| DEFAULT_DEGREES.to_owned()));
    draft.application_deadline = raw.application_deadline;
    draft
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
