//! Listing verticals
//!
//! The jobs and internships listings share one query engine. A [`Vertical`]
//! selects which filter dimensions a listing honours, its sort allow-list,
//! its default location and the key its rows are returned under.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::filters::{Flag, ListingFilters, Sort, SortField, KEYWORD_FIELDS, SEARCH_FIELDS};
use crate::page::{parse_positive, Pagination, DEFAULT_LIMIT};
use crate::posting::StudentLevel;

/// A filter dimension a vertical may accept from the query string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Search,
    Location,
    JobType,
    StudentLevel,
    Skills,
    Toggle(Flag),
}

/// Static configuration of one listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertical {
    pub name: &'static str,
    /// JSON key the rows are returned under
    pub collection_key: &'static str,
    /// Applied when the request carries no `location` parameter at all
    pub default_location: Option<&'static str>,
    pub dimensions: &'static [Dimension],
    pub sortable: &'static [SortField],
    pub default_limit: u32,
}

impl Vertical {
    pub const JOBS: Vertical = Vertical {
        name: "jobs",
        collection_key: "jobs",
        default_location: None,
        dimensions: &[
            Dimension::Search,
            Dimension::Location,
            Dimension::JobType,
            Dimension::StudentLevel,
            Dimension::Skills,
            Dimension::Toggle(Flag::NoExperience),
            Dimension::Toggle(Flag::FlexibleHours),
            Dimension::Toggle(Flag::RemoteOption),
            Dimension::Toggle(Flag::WeekendAvailability),
            Dimension::Toggle(Flag::NearCampus),
        ],
        sortable: &[
            SortField::DatePosted,
            SortField::Title,
            SortField::Company,
            SortField::CreatedAt,
            SortField::ApplicationDeadline,
        ],
        default_limit: DEFAULT_LIMIT,
    };

    pub const INTERNSHIPS: Vertical = Vertical {
        name: "internships",
        collection_key: "internships",
        default_location: Some("Sydney"),
        dimensions: &[
            Dimension::StudentLevel,
            Dimension::Search,
            Dimension::Location,
            Dimension::Skills,
            Dimension::Toggle(Flag::RemoteOption),
        ],
        sortable: &[
            SortField::DatePosted,
            SortField::Title,
            SortField::Company,
            SortField::ApplicationDeadline,
        ],
        default_limit: DEFAULT_LIMIT,
    };

    pub fn accepts(&self, dimension: Dimension) -> bool {
        self.dimensions.contains(&dimension)
    }

    /// Turn raw query-string values into a validated request.
    ///
    /// Nothing here fails: unusable values are dropped or replaced with
    /// defaults.
    pub fn parse(&self, params: &ListingParams) -> ListingRequest {
        let mut filters = ListingFilters {
            keyword_fields: SEARCH_FIELDS,
            ..ListingFilters::default()
        };

        if self.accepts(Dimension::Search) {
            if let Some(search) = present(&params.search) {
                filters.keywords.push(search.to_owned());
            }
        }

        if self.accepts(Dimension::Location) {
            let location = match params.location.as_deref() {
                None => self.default_location,
                Some(raw) => Some(raw.trim()).filter(|s| !s.is_empty()),
            };
            if let Some(location) = location {
                filters.locations.push(location.to_owned());
            }
        }

        if self.accepts(Dimension::JobType) {
            if let Some(job_type) = present(&params.job_type) {
                filters.job_types.push(job_type.to_owned());
            }
        }

        if self.accepts(Dimension::StudentLevel) {
            if let Some(raw) = present(&params.student_level) {
                match raw.parse::<StudentLevel>() {
                    Ok(level) => filters = filters.with_student_level(level),
                    Err(e) => tracing::debug!(error = %e, "ignoring student level filter"),
                }
            }
        }

        if self.accepts(Dimension::Skills) {
            filters.skills = present(&params.skills).map(str::to_owned);
        }

        for flag in Flag::ALL {
            if self.accepts(Dimension::Toggle(flag)) && toggle(params.toggle(flag)) {
                filters.flags.insert(flag);
            }
        }

        ListingRequest {
            filters,
            sort: Sort::resolve(
                params.sort_by.as_deref(),
                params.sort_order.as_deref(),
                self.sortable,
            ),
            pagination: Pagination::from_raw(
                params.page.as_deref(),
                params.limit.as_deref(),
                self.default_limit,
            ),
        }
    }
}

/// Raw query-string parameters of a listing request.
///
/// Everything is kept as text so that malformed values degrade to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    pub search: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub student_level: Option<String>,
    pub skills: Option<String>,
    pub no_experience: Option<String>,
    pub flexible_hours: Option<String>,
    pub remote_option: Option<String>,
    pub weekend_availability: Option<String>,
    pub near_campus: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListingParams {
    /// Build from decoded query pairs. A repeated key keeps its last value
    /// and unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "search" => &mut params.search,
                "location" => &mut params.location,
                "job_type" => &mut params.job_type,
                "student_level" => &mut params.student_level,
                "skills" => &mut params.skills,
                "no_experience" => &mut params.no_experience,
                "flexible_hours" => &mut params.flexible_hours,
                "remote_option" => &mut params.remote_option,
                "weekend_availability" => &mut params.weekend_availability,
                "near_campus" => &mut params.near_campus,
                "sort_by" => &mut params.sort_by,
                "sort_order" => &mut params.sort_order,
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        params
    }

    fn toggle(&self, flag: Flag) -> Option<&str> {
        match flag {
            Flag::NoExperience => self.no_experience.as_deref(),
            Flag::FlexibleHours => self.flexible_hours.as_deref(),
            Flag::RemoteOption => self.remote_option.as_deref(),
            Flag::WeekendAvailability => self.weekend_availability.as_deref(),
            Flag::NearCampus => self.near_campus.as_deref(),
        }
    }
}

/// A validated listing request: predicate, ordering and page window
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRequest {
    pub filters: ListingFilters,
    pub sort: Sort,
    pub pagination: Pagination,
}

/// Body of the advanced search endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    #[serde(deserialize_with = "string_list")]
    pub keywords: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub locations: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub job_types: Vec<String>,
    #[serde(deserialize_with = "truthy")]
    pub no_experience: bool,
    #[serde(deserialize_with = "string_list")]
    pub features: Vec<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub page: Option<u32>,
    #[serde(deserialize_with = "lenient_number")]
    pub limit: Option<u32>,
}

/// Sort columns the advanced search accepts
pub const SEARCH_SORTABLE: &[SortField] = &[
    SortField::DatePosted,
    SortField::Title,
    SortField::Company,
    SortField::CreatedAt,
];

impl SearchRequest {
    /// Resolve against [`SEARCH_SORTABLE`] and the jobs page limits.
    pub fn into_listing_request(self) -> ListingRequest {

        let mut filters = ListingFilters {
            keywords: non_empty(self.keywords),
            keyword_fields: KEYWORD_FIELDS,
            locations: non_empty(self.locations),
            job_types: non_empty(self.job_types),
            ..ListingFilters::default()
        };

        if self.no_experience {
            filters.flags.insert(Flag::NoExperience);
        }
        for feature in &self.features {
            match Flag::from_feature(feature) {
                Some(flag) => {
                    filters.flags.insert(flag);
                }
                None => tracing::debug!(feature = %feature, "ignoring unknown feature"),
            }
        }

        ListingRequest {
            filters,
            sort: Sort::resolve(
                self.sort_by.as_deref(),
                self.sort_order.as_deref(),
                SEARCH_SORTABLE,
            ),
            pagination: Pagination::new(
                self.page.unwrap_or(1),
                self.limit.unwrap_or(Vertical::JOBS.default_limit),
            ),
        }
    }
}

/// A toggle is active only for the literal values `true` and `1`.
pub fn toggle(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("true") | Some("1"))
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn non_empty(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .collect()
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => vec![s],
        _ => Vec::new(),
    })
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => toggle(Some(&s)),
        _ => false,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => parse_positive(&n.to_string()),
        Some(Value::String(s)) => parse_positive(&s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::SortOrder;

    fn params(pairs: &[(&str, &str)]) -> ListingParams {
        let object = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        serde_json::from_value(Value::Object(object)).unwrap()
    }

    #[test]
    fn toggles_only_activate_on_true_or_one() {
        assert!(toggle(Some("true")));
        assert!(toggle(Some("1")));
        assert!(!toggle(Some("false")));
        assert!(!toggle(Some("yes")));
        assert!(!toggle(Some("TRUE")));
        assert!(!toggle(None));
    }

    #[test]
    fn jobs_vertical_reads_every_dimension() {
        let req = Vertical::JOBS.parse(&params(&[
            ("search", "coffee"),
            ("location", "Boston"),
            ("job_type", "Part-time"),
            ("student_level", "final_year"),
            ("skills", "Python"),
            ("no_experience", "true"),
            ("near_campus", "1"),
            ("weekend_availability", "0"),
        ]));

        assert_eq!(req.filters.keywords, vec!["coffee"]);
        assert_eq!(req.filters.keyword_fields, SEARCH_FIELDS);
        assert_eq!(req.filters.locations, vec!["Boston"]);
        assert_eq!(req.filters.job_types, vec!["Part-time"]);
        assert_eq!(req.filters.student_level, Some(StudentLevel::FinalYear));
        assert_eq!(req.filters.skills.as_deref(), Some("Python"));
        assert!(req.filters.flags.contains(&Flag::NoExperience));
        assert!(req.filters.flags.contains(&Flag::NearCampus));
        assert!(!req.filters.flags.contains(&Flag::WeekendAvailability));
    }

    #[test]
    fn internships_default_to_sydney_unless_location_given() {
        let req = Vertical::INTERNSHIPS.parse(&ListingParams::default());
        assert_eq!(req.filters.locations, vec!["Sydney"]);

        let req = Vertical::INTERNSHIPS.parse(&params(&[("location", "Melbourne")]));
        assert_eq!(req.filters.locations, vec!["Melbourne"]);

        let req = Vertical::INTERNSHIPS.parse(&params(&[("location", "")]));
        assert!(req.filters.locations.is_empty());
    }

    #[test]
    fn internships_ignore_dimensions_they_do_not_offer() {
        let req = Vertical::INTERNSHIPS.parse(&params(&[
            ("job_type", "Casual"),
            ("no_experience", "true"),
            ("remote_option", "true"),
            ("sort_by", "created_at"),
        ]));

        assert!(req.filters.job_types.is_empty());
        assert!(!req.filters.flags.contains(&Flag::NoExperience));
        assert!(req.filters.flags.contains(&Flag::RemoteOption));
        assert_eq!(req.sort.field, SortField::DatePosted);
    }

    #[test]
    fn unknown_student_level_applies_no_filter() {
        let req = Vertical::JOBS.parse(&params(&[("student_level", "postdoc")]));
        assert!(req.filters.student_level.is_none());
    }

    #[test]
    fn wildcard_student_level_is_kept_as_a_filter() {
        let req = Vertical::JOBS.parse(&params(&[("student_level", "any")]));
        assert_eq!(req.filters.student_level, Some(StudentLevel::Any));
    }

    #[test]
    fn malformed_paging_uses_defaults() {
        let req = Vertical::JOBS.parse(&params(&[("page", "two"), ("limit", "0")]));
        assert_eq!(req.pagination, Pagination::new(1, DEFAULT_LIMIT));
    }

    #[test]
    fn search_request_accepts_loose_json() {
        let body = r#"{
            "keywords": ["tutor", ""],
            "locations": "Remote",
            "job_types": ["Casual", "Part-time"],
            "no_experience": "true",
            "features": ["remote_option", "hot_desk"],
            "sort_by": "title",
            "sort_order": "ASC",
            "page": "2",
            "limit": 5
        }"#;
        let req: SearchRequest = serde_json::from_str(body).unwrap();
        let req = req.into_listing_request();

        assert_eq!(req.filters.keywords, vec!["tutor"]);
        assert_eq!(req.filters.keyword_fields, KEYWORD_FIELDS);
        assert_eq!(req.filters.locations, vec!["Remote"]);
        assert_eq!(req.filters.job_types, vec!["Casual", "Part-time"]);
        assert!(req.filters.flags.contains(&Flag::NoExperience));
        assert!(req.filters.flags.contains(&Flag::RemoteOption));
        assert_eq!(req.filters.flags.len(), 2);
        assert_eq!(req.sort.field, SortField::Title);
        assert_eq!(req.pagination, Pagination::new(2, 5));
    }

    #[test]
    fn search_does_not_sort_by_deadline() {
        let req: SearchRequest =
            serde_json::from_str(r#"{"sort_by": "application_deadline", "sort_order": "asc"}"#)
                .unwrap();
        let req = req.into_listing_request();
        assert_eq!(req.sort.field, SortField::DatePosted);
        assert_eq!(req.sort.order, SortOrder::Asc);

        let req = Vertical::JOBS.parse(&params(&[("sort_by", "application_deadline")]));
        assert_eq!(req.sort.field, SortField::ApplicationDeadline);
    }

    #[test]
    fn repeated_query_keys_keep_the_last_value() {
        let params = ListingParams::from_pairs([
            ("search", "tutor"),
            ("utm_source", "newsletter"),
            ("search", "barista"),
            ("page", "2"),
        ]);
        assert_eq!(params.search.as_deref(), Some("barista"));
        assert_eq!(params.page.as_deref(), Some("2"));

        let req = Vertical::JOBS.parse(&params);
        assert_eq!(req.filters.keywords, vec!["barista"]);
    }

    #[test]
    fn empty_search_body_is_unrestricted() {
        let req: SearchRequest = serde_json::from_str("{}").unwrap();
        let req = req.into_listing_request();
        assert!(req.filters.is_unrestricted());
        assert_eq!(req.pagination, Pagination::default());
    }
}
