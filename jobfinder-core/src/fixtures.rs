//! Built-in sample postings used by `jobfinder seed`

use crate::error::{JobfinderError, Result};
use crate::posting::PostingDraft;

const SAMPLE_POSTINGS: &str = include_str!("../fixtures/postings.json");

/// Parse the bundled sample postings.
pub fn sample_postings() -> Result<Vec<PostingDraft>> {
    serde_json::from_str(SAMPLE_POSTINGS)
        .map_err(|e| JobfinderError::json("fixtures/postings.json", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posting::StudentLevel;

    #[test]
    fn fixtures_parse() {
        let postings = sample_postings().unwrap();
        assert_eq!(postings.len(), 20);
        assert!(postings.iter().all(|p| !p.experience_required));
        assert!(postings.iter().all(|p| p.date_posted.is_none()));
    }

    #[test]
    fn fixtures_cover_each_level() {
        let postings = sample_postings().unwrap();
        for level in StudentLevel::SPECIFIC {
            assert_eq!(
                postings.iter().filter(|p| p.student_level == level).count(),
                1,
                "expected one {level} posting"
            );
        }
    }
}
