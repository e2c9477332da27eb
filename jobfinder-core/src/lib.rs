//! jobfinder-core: postings, listing filters and ingestion heuristics
//!
//! Storage-agnostic. The server crate renders [`ListingFilters`] into SQL
//! and persists [`PostingDraft`]s.

pub mod classify;
pub mod config;
pub mod error;
pub mod filters;
pub mod fixtures;
pub mod page;
pub mod posting;
pub mod vertical;

pub use classify::{determine_student_level, extract_skills, normalize, RawPosting};
pub use config::JobfinderConfig;
pub use error::{JobfinderError, Result};
pub use filters::{Flag, ListingFilters, Sort, SortField, SortOrder, TextField};
pub use page::{Page, PageMeta, Pagination};
pub use posting::{Posting, PostingDraft, StudentLevel};
pub use vertical::{ListingParams, ListingRequest, SearchRequest, Vertical};
