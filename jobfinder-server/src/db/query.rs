//! Renders [`ListingFilters`] into parameterized SQL
//!
//! Every user value is bound, never spliced. Column names come only from
//! the closed enums in `jobfinder_core::filters`.

use jobfinder_core::filters::contains_pattern;
use jobfinder_core::{ListingFilters, ListingRequest, Sort, StudentLevel};
use sqlx::{QueryBuilder, Sqlite};

/// Columns selected for a full posting row, in [`super::postings::PostingRow`] order
pub const POSTING_COLUMNS: &str = "id, title, company, location, job_type, experience_required, \
     description, requirements, pay_rate, application_url, source, flexible_hours, \
     weekend_availability, remote_option, near_campus, student_level, skills, \
     degree_requirements, application_deadline, date_posted, created_at, updated_at";

const ESCAPE: &str = " ESCAPE '\\'";

/// Append the WHERE clause for `filters`.
///
/// Shared by [`select_page`] and [`count`] so a page and its total can
/// never disagree about which rows match.
pub fn push_predicate(qb: &mut QueryBuilder<'static, Sqlite>, filters: &ListingFilters) {
    qb.push(" WHERE 1=1");

    if !filters.keywords.is_empty() && !filters.keyword_fields.is_empty() {
        qb.push(" AND (");
        for (i, keyword) in filters.keywords.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            let pattern = contains_pattern(keyword);
            qb.push("(");
            for (j, field) in filters.keyword_fields.iter().enumerate() {
                if j > 0 {
                    qb.push(" OR ");
                }
                qb.push(field.column())
                    .push(" LIKE ")
                    .push_bind(pattern.clone())
                    .push(ESCAPE);
            }
            qb.push(")");
        }
        qb.push(")");
    }

    if !filters.locations.is_empty() {
        qb.push(" AND (");
        for (i, location) in filters.locations.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push("location LIKE ")
                .push_bind(contains_pattern(location))
                .push(ESCAPE);
        }
        qb.push(")");
    }

    if !filters.job_types.is_empty() {
        qb.push(" AND job_type IN (");
        let mut list = qb.separated(", ");
        for job_type in &filters.job_types {
            list.push_bind(job_type.clone());
        }
        list.push_unseparated(")");
    }

    match filters.student_level {
        Some(level) if level.is_wildcard() => {
            qb.push(" AND student_level = ").push_bind(level.as_str());
        }
        Some(level) => {
            qb.push(" AND (student_level = ")
                .push_bind(level.as_str())
                .push(" OR student_level = ")
                .push_bind(StudentLevel::Any.as_str())
                .push(")");
        }
        None => {}
    }

    if let Some(skills) = &filters.skills {
        qb.push(" AND skills LIKE ")
            .push_bind(contains_pattern(skills))
            .push(ESCAPE);
    }

    for flag in &filters.flags {
        qb.push(" AND ")
            .push(flag.column())
            .push(" = ")
            .push_bind(flag.required_value());
    }
}

fn push_order(qb: &mut QueryBuilder<'static, Sqlite>, sort: Sort) {
    let direction = sort.order.as_sql();
    qb.push(" ORDER BY ")
        .push(sort.field.column())
        .push(" ")
        .push(direction)
        .push(", id ")
        .push(direction);
}

/// One page of matching rows, ordered with `id` as the tie-break.
pub fn select_page(request: &ListingRequest) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new(format!("SELECT {POSTING_COLUMNS} FROM postings"));
    push_predicate(&mut qb, &request.filters);
    push_order(&mut qb, request.sort);
    qb.push(" LIMIT ")
        .push_bind(i64::from(request.pagination.limit))
        .push(" OFFSET ")
        .push_bind(request.pagination.offset());
    qb
}

/// Number of rows matching `filters`, ignoring pagination.
pub fn count(filters: &ListingFilters) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM postings");
    push_predicate(&mut qb, filters);
    qb
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobfinder_core::{Flag, Pagination, SortField, SortOrder};

    fn where_clause(sql: &str) -> &str {
        let (_, rest) = sql.split_once(" FROM postings").unwrap();
        rest.split_once(" ORDER BY").map_or(rest, |(w, _)| w)
    }

    fn busy_filters() -> ListingFilters {
        ListingFilters::default()
            .with_keyword("rust")
            .with_keyword("tutor")
            .with_location("Sydney")
            .with_job_type("Casual")
            .with_job_type("Part-time")
            .with_student_level(StudentLevel::Penultimate)
            .with_flag(Flag::NoExperience)
            .with_flag(Flag::RemoteOption)
    }

    #[test]
    fn page_and_count_share_the_predicate() {
        let request = ListingRequest {
            filters: busy_filters(),
            sort: Sort::default(),
            pagination: Pagination::new(2, 10),
        };

        let page = select_page(&request);
        let total = count(&request.filters);
        assert_eq!(where_clause(page.sql()), where_clause(total.sql()));
    }

    #[test]
    fn unrestricted_filters_match_everything() {
        let qb = count(&ListingFilters::default());
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM postings WHERE 1=1");
    }

    #[test]
    fn values_are_bound_not_spliced() {
        let filters = ListingFilters::default().with_keyword("'; DROP TABLE postings; --");
        let qb = count(&filters);
        assert!(!qb.sql().contains("DROP"));
        assert!(qb.sql().contains("title LIKE ?"));
    }

    #[test]
    fn order_has_id_tie_break() {
        let request = ListingRequest {
            filters: ListingFilters::default(),
            sort: Sort {
                field: SortField::Company,
                order: SortOrder::Asc,
            },
            pagination: Pagination::default(),
        };
        let qb = select_page(&request);
        assert!(qb.sql().contains("ORDER BY company ASC, id ASC LIMIT ? OFFSET ?"));
    }

    #[test]
    fn wildcard_level_matches_only_any_rows() {
        let filters = ListingFilters::default().with_student_level(StudentLevel::Any);
        assert_eq!(
            count(&filters).sql(),
            "SELECT COUNT(*) FROM postings WHERE 1=1 AND student_level = ?"
        );
    }

    #[test]
    fn specific_level_also_matches_any_rows() {
        let filters = ListingFilters::default().with_student_level(StudentLevel::FinalYear);
        assert!(count(&filters)
            .sql()
            .ends_with(" AND (student_level = ? OR student_level = ?)"));
    }
}
