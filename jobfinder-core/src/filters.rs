//! Listing filter model
//!
//! A [`ListingFilters`] value is the predicate chain for one request: every
//! populated field adds one conjunct. Rendering it to SQL is the store's job;
//! this module only describes *what* to match.

use std::collections::BTreeSet;

use crate::posting::StudentLevel;

/// Free-text columns that keyword search can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Title,
    Company,
    Description,
    Skills,
}

impl TextField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Company => "company",
            Self::Description => "description",
            Self::Skills => "skills",
        }
    }
}

/// Fields matched by the `search` query parameter
pub const SEARCH_FIELDS: &[TextField] = &[
    TextField::Title,
    TextField::Company,
    TextField::Description,
    TextField::Skills,
];

/// Fields matched by each entry of an advanced-search `keywords` list
pub const KEYWORD_FIELDS: &[TextField] =
    &[TextField::Title, TextField::Company, TextField::Description];

/// Boolean toggles. Each one, when active, restricts results to rows whose
/// stored flag has the required value. Inactive toggles never filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flag {
    NoExperience,
    FlexibleHours,
    RemoteOption,
    WeekendAvailability,
    NearCampus,
}

impl Flag {
    pub const ALL: [Flag; 5] = [
        Flag::NoExperience,
        Flag::FlexibleHours,
        Flag::RemoteOption,
        Flag::WeekendAvailability,
        Flag::NearCampus,
    ];

    /// Stored column the toggle inspects
    pub fn column(&self) -> &'static str {
        match self {
            Self::NoExperience => "experience_required",
            Self::FlexibleHours => "flexible_hours",
            Self::RemoteOption => "remote_option",
            Self::WeekendAvailability => "weekend_availability",
            Self::NearCampus => "near_campus",
        }
    }

    /// Value the column must hold when the toggle is active
    pub fn required_value(&self) -> bool {
        !matches!(self, Self::NoExperience)
    }

    /// Query-string / feature-list name
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoExperience => "no_experience",
            Self::FlexibleHours => "flexible_hours",
            Self::RemoteOption => "remote_option",
            Self::WeekendAvailability => "weekend_availability",
            Self::NearCampus => "near_campus",
        }
    }

    /// Parse an advanced-search feature name. `no_experience` is not a
    /// feature there; it has its own field.
    pub fn from_feature(name: &str) -> Option<Flag> {
        match name {
            "flexible_hours" => Some(Self::FlexibleHours),
            "weekend_availability" => Some(Self::WeekendAvailability),
            "remote_option" => Some(Self::RemoteOption),
            "near_campus" => Some(Self::NearCampus),
            _ => None,
        }
    }
}

/// Conjunction of all active filter conditions for one request
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFilters {
    /// Any keyword may match any of `keyword_fields`
    pub keywords: Vec<String>,
    pub keyword_fields: &'static [TextField],
    /// Substring match on location, any entry may match
    pub locations: Vec<String>,
    /// Exact match on job type, any entry may match
    pub job_types: Vec<String>,
    /// Specific levels also match rows tagged `any`; `Some(Any)` matches only those rows.
    pub student_level: Option<StudentLevel>,
    pub skills: Option<String>,
    pub flags: BTreeSet<Flag>,
}

impl Default for ListingFilters {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            keyword_fields: SEARCH_FIELDS,
            locations: Vec::new(),
            job_types: Vec::new(),
            student_level: None,
            skills: None,
            flags: BTreeSet::new(),
        }
    }
}

impl ListingFilters {
    /// True when no condition is active
    pub fn is_unrestricted(&self) -> bool {
        self.keywords.is_empty()
            && self.locations.is_empty()
            && self.job_types.is_empty()
            && self.student_level.is_none()
            && self.skills.is_none()
            && self.flags.is_empty()
    }

    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.flags.insert(flag);
        self
    }

    pub fn with_student_level(mut self, level: StudentLevel) -> Self {
        self.student_level = Some(level);
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.locations.push(location.into());
        self
    }

    pub fn with_job_type(mut self, job_type: impl Into<String>) -> Self {
        self.job_types.push(job_type.into());
        self
    }
}

/// Sortable columns. Only these ever reach an ORDER BY clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    DatePosted,
    Title,
    Company,
    CreatedAt,
    ApplicationDeadline,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::DatePosted => "date_posted",
            Self::Title => "title",
            Self::Company => "company",
            Self::CreatedAt => "created_at",
            Self::ApplicationDeadline => "application_deadline",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "date_posted" => Some(Self::DatePosted),
            "title" => Some(Self::Title),
            "company" => Some(Self::Company),
            "created_at" => Some(Self::CreatedAt),
            "application_deadline" => Some(Self::ApplicationDeadline),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `asc` in any case selects ascending; anything else is descending.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Validated ordering for a listing query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            field: SortField::DatePosted,
            order: SortOrder::Desc,
        }
    }
}

impl Sort {
    /// Resolve client-supplied sort parameters against an allow-list.
    ///
    /// Unknown or disallowed fields fall back to `date_posted`.
    pub fn resolve(sort_by: Option<&str>, sort_order: Option<&str>, allowed: &[SortField]) -> Self {
        let field = match sort_by.map(str::trim).and_then(SortField::from_name) {
            Some(field) if allowed.contains(&field) => field,
            Some(_) | None => {
                if let Some(raw) = sort_by {
                    tracing::debug!(sort_by = raw, "sort field not allowed, using date_posted");
                }
                SortField::DatePosted
            }
        };

        Self {
            field,
            order: SortOrder::parse(sort_order),
        }
    }
}

/// Escape character used in LIKE patterns built by [`contains_pattern`]
pub const LIKE_ESCAPE: char = '\\';

/// Build a LIKE pattern matching `term` as a literal substring.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SORTS: &[SortField] = &[
        SortField::DatePosted,
        SortField::Title,
        SortField::Company,
        SortField::CreatedAt,
        SortField::ApplicationDeadline,
    ];

    #[test]
    fn unknown_sort_field_falls_back_to_date_posted() {
        let sort = Sort::resolve(Some("salary; DROP TABLE postings"), Some("asc"), ALL_SORTS);
        assert_eq!(sort.field, SortField::DatePosted);
        assert_eq!(sort.order, SortOrder::Asc);
    }

    #[test]
    fn sort_field_outside_allow_list_is_rejected() {
        let sort = Sort::resolve(Some("created_at"), None, &[SortField::DatePosted, SortField::Title]);
        assert_eq!(sort.field, SortField::DatePosted);
    }

    #[test]
    fn sort_order_is_case_insensitive_and_defaults_desc() {
        assert_eq!(SortOrder::parse(Some("ASC")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("Asc")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("sideways")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(None), SortOrder::Desc);
    }

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("sydney"), "%sydney%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("c_sharp"), "%c\\_sharp%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn wildcard_level_is_still_a_restriction() {
        let filters = ListingFilters::default().with_student_level(StudentLevel::Any);
        assert_eq!(filters.student_level, Some(StudentLevel::Any));
        assert!(!filters.is_unrestricted());

        let filters = filters.with_student_level(StudentLevel::FinalYear);
        assert_eq!(filters.student_level, Some(StudentLevel::FinalYear));
    }

    #[test]
    fn no_experience_requires_false_flag() {
        assert!(!Flag::NoExperience.required_value());
        assert!(Flag::RemoteOption.required_value());
        assert_eq!(Flag::NoExperience.column(), "experience_required");
    }

    #[test]
    fn feature_names_map_to_flags() {
        assert_eq!(Flag::from_feature("near_campus"), Some(Flag::NearCampus));
        assert_eq!(Flag::from_feature("no_experience"), None);
        assert_eq!(Flag::from_feature("parking"), None);
    }
}
