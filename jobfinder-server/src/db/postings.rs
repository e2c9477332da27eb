//! Posting repository
//!
//! Handles posting reads and writes with:
//! - Paginated, filtered listing (row query and count share one predicate)
//! - Aggregate stats for the dashboard
//! - Batch inserts inside a single transaction

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use jobfinder_core::{
    Flag, ListingFilters, ListingRequest, Page, Posting, PostingDraft, StudentLevel,
};
use serde::Serialize;
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};

use super::query::{self, POSTING_COLUMNS};
use super::DbError;

const INSERT_POSTING: &str = r#"
    INSERT INTO postings (
        title, company, location, job_type, experience_required,
        description, requirements, pay_rate, application_url, source,
        flexible_hours, weekend_availability, remote_option, near_campus,
        student_level, skills, degree_requirements, application_deadline, date_posted
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, COALESCE(?, date('now')))
"#;

/// Posting as stored; `student_level` is still raw text
#[derive(Debug, Clone, FromRow)]
pub struct PostingRow {
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
    pub student_level: String,
    pub skills: Option<String>,
    pub degree_requirements: Option<String>,
    pub application_deadline: Option<NaiveDate>,
    pub date_posted: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<PostingRow> for Posting {
    type Error = DbError;

    fn try_from(row: PostingRow) -> Result<Self, Self::Error> {
        let student_level =
            row.student_level
                .parse::<StudentLevel>()
                .map_err(|_| DbError::InvalidRow {
                    id: row.id,
                    column: "student_level",
                    value: row.student_level.clone(),
                })?;

        Ok(Posting {
            id: row.id,
            title: row.title,
            company: row.company,
            location: row.location,
            job_type: row.job_type,
            experience_required: row.experience_required,
            description: row.description,
            requirements: row.requirements,
            pay_rate: row.pay_rate,
            application_url: row.application_url,
            source: row.source,
            flexible_hours: row.flexible_hours,
            weekend_availability: row.weekend_availability,
            remote_option: row.remote_option,
            near_campus: row.near_campus,
            student_level,
            skills: row.skills,
            degree_requirements: row.degree_requirements,
            application_deadline: row.application_deadline,
            date_posted: row.date_posted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Dashboard aggregates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_jobs: i64,
    pub no_experience_jobs: i64,
    pub remote_jobs: i64,
    pub first_year_jobs: i64,
    pub penultimate_jobs: i64,
    pub final_year_jobs: i64,
    pub job_type_counts: BTreeMap<String, i64>,
    pub locations: Vec<String>,
    pub companies: Vec<String>,
    pub job_types: Vec<String>,
}

/// Posting repository
pub struct PostingRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostingRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// One page of postings plus the total match count.
    pub async fn list(&self, request: &ListingRequest) -> Result<Page<Posting>, DbError> {
        let rows: Vec<PostingRow> = query::select_page(request)
            .build_query_as()
            .fetch_all(self.pool)
            .await?;
        let total = self.count_matching(&request.filters).await?;

        let items = rows
            .into_iter()
            .map(Posting::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            items,
            total,
            page: request.pagination.page,
            limit: request.pagination.limit,
        })
    }

    /// Rows matching `filters`, ignoring pagination.
    pub async fn count_matching(&self, filters: &ListingFilters) -> Result<i64, DbError> {
        let total: i64 = query::count(filters)
            .build_query_scalar()
            .fetch_one(self.pool)
            .await?;
        Ok(total)
    }

    pub async fn count_all(&self) -> Result<i64, DbError> {
        self.count_matching(&ListingFilters::default()).await
    }

    /// Get a single posting by id.
    pub async fn get(&self, id: i64) -> Result<Option<Posting>, DbError> {
        let row: Option<PostingRow> =
            sqlx::query_as(&format!("SELECT {POSTING_COLUMNS} FROM postings WHERE id = ?"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        row.map(Posting::try_from).transpose()
    }

    /// Aggregates for the stats endpoint.
    ///
    /// Counts reuse the listing predicate, so `remoteJobs` always equals the
    /// total of a listing filtered on remote.
    pub async fn stats(&self) -> Result<Stats, DbError> {
        let any = ListingFilters::default();

        let total_jobs = self.count_matching(&any).await?;
        let no_experience_jobs = self
            .count_matching(&any.clone().with_flag(Flag::NoExperience))
            .await?;
        let remote_jobs = self
            .count_matching(&any.clone().with_flag(Flag::RemoteOption))
            .await?;
        let first_year_jobs = self
            .count_matching(&any.clone().with_student_level(StudentLevel::FirstYear))
            .await?;
        let penultimate_jobs = self
            .count_matching(&any.clone().with_student_level(StudentLevel::Penultimate))
            .await?;
        let final_year_jobs = self
            .count_matching(&any.clone().with_student_level(StudentLevel::FinalYear))
            .await?;

        let job_type_counts: Vec<(String, i64)> = sqlx::query_as(
            "SELECT job_type, COUNT(*) FROM postings GROUP BY job_type ORDER BY job_type",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(Stats {
            total_jobs,
            no_experience_jobs,
            remote_jobs,
            first_year_jobs,
            penultimate_jobs,
            final_year_jobs,
            job_types: job_type_counts.iter().map(|(t, _)| t.clone()).collect(),
            job_type_counts: job_type_counts.into_iter().collect(),
            locations: self.distinct("location").await?,
            companies: self.distinct("company").await?,
        })
    }

    /// Sorted distinct values of a text column. `column` is never user input.
    async fn distinct(&self, column: &'static str) -> Result<Vec<String>, DbError> {
        let values = sqlx::query_scalar(&format!(
            "SELECT DISTINCT {column} FROM postings ORDER BY {column}"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(values)
    }

    /// Insert drafts atomically; either all rows land or none do.
    pub async fn insert_batch(&self, drafts: &[PostingDraft]) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;
        let inserted = insert_all(&mut tx, drafts).await?;
        tx.commit().await?;

        tracing::debug!(inserted, "inserted postings");
        Ok(inserted)
    }

    /// Replace every posting with `drafts` in one transaction.
    ///
    /// Ids keep increasing across resets.
    pub async fn reset_with(&self, drafts: &[PostingDraft]) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;
        let removed = sqlx::query("DELETE FROM postings")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let inserted = insert_all(&mut tx, drafts).await?;
        tx.commit().await?;

        tracing::debug!(removed, inserted, "reset postings");
        Ok(inserted)
    }
}

async fn insert_all(
    tx: &mut Transaction<'_, Sqlite>,
    drafts: &[PostingDraft],
) -> Result<u64, DbError> {
    let mut inserted = 0;
    for draft in drafts {
        inserted += sqlx::query(INSERT_POSTING)
            .bind(&draft.title)
            .bind(&draft.company)
            .bind(&draft.location)
            .bind(&draft.job_type)
            .bind(draft.experience_required)
            .bind(&draft.description)
            .bind(&draft.requirements)
            .bind(&draft.pay_rate)
            .bind(&draft.application_url)
            .bind(&draft.source)
            .bind(draft.flexible_hours)
            .bind(draft.weekend_availability)
            .bind(draft.remote_option)
            .bind(draft.near_campus)
            .bind(draft.student_level.as_str())
            .bind(&draft.skills)
            .bind(&draft.degree_requirements)
            .bind(draft.application_deadline)
            .bind(draft.date_posted)
            .execute(&mut **tx)
            .await?
            .rows_affected();
    }
    Ok(inserted)
}
