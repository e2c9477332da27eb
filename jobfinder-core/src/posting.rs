//! Posting records and the student-level vocabulary

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::JobfinderError;

/// Which cohort of students a posting targets.
///
/// `Any` is a wildcard: a posting tagged `any` satisfies every level filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentLevel {
    FirstYear,
    Penultimate,
    FinalYear,
    #[default]
    Any,
}

impl StudentLevel {
    /// Levels that name a concrete cohort (everything except the wildcard)
    pub const SPECIFIC: [StudentLevel; 3] = [
        StudentLevel::FirstYear,
        StudentLevel::Penultimate,
        StudentLevel::FinalYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstYear => "first_year",
            Self::Penultimate => "penultimate",
            Self::FinalYear => "final_year",
            Self::Any => "any",
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl fmt::Display for StudentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentLevel {
    type Err = JobfinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first_year" => Ok(Self::FirstYear),
            "penultimate" => Ok(Self::Penultimate),
            "final_year" => Ok(Self::FinalYear),
            "any" => Ok(Self::Any),
            other => Err(JobfinderError::unknown_student_level(other)),
        }
    }
}

/// A stored job or internship posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub experience_required: bool,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub pay_rate: Option<String>,
    pub application_url: Option<String>,
    pub source: Option<String>,
    pub flexible_hours: bool,
    pub weekend_availability: bool,
    pub remote_option: bool,
    pub near_campus: bool,
    pub student_level: StudentLevel,
    pub skills: Option<String>,
    pub degree_requirements: Option<String>,
    pub application_deadline: Option<NaiveDate>,
    pub date_posted: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert shape for a posting.
///
/// The store assigns `id` and the timestamps; a missing `date_posted`
/// becomes the store's current date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    #[serde(default)]
    pub experience_required: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub pay_rate: Option<String>,
    #[serde(default)]
    pub application_url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub flexible_hours: bool,
    #[serde(default)]
    pub weekend_availability: bool,
    #[serde(default)]
    pub remote_option: bool,
    #[serde(default)]
    pub near_campus: bool,
    #[serde(default)]
    pub student_level: StudentLevel,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub degree_requirements: Option<String>,
    #[serde(default)]
    pub application_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub date_posted: Option<NaiveDate>,
}

impl PostingDraft {
    /// Minimal draft with every optional field empty and every flag off.
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
        job_type: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            location: location.into(),
            job_type: job_type.into(),
            experience_required: false,
            description: None,
            requirements: None,
            pay_rate: None,
            application_url: None,
            source: None,
            flexible_hours: false,
            weekend_availability: false,
            remote_option: false,
            near_campus: false,
            student_level: StudentLevel::Any,
            skills: None,
            degree_requirements: None,
            application_deadline: None,
            date_posted: None,
        }
    }
}
