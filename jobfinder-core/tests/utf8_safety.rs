/// UTF-8 safety of the text heuristics.
///
/// Scraped text arrives in any script; keyword and skill matching must
/// never slice inside a multi-byte character.
use jobfinder_core::filters::contains_pattern;
use jobfinder_core::{determine_student_level, extract_skills, normalize, RawPosting, StudentLevel};

#[test]
fn skills_found_next_to_emoji() {
    let skills = extract_skills("🚀Python🚀 und Docker—Kubernetes");
    assert_eq!(skills.as_deref(), Some("Python, Docker, Kubernetes"));
}

#[test]
fn level_detection_with_cjk_text() {
    assert_eq!(
        determine_student_level("インターン final year 学生 募集"),
        StudentLevel::FinalYear
    );
    assert_eq!(determine_student_level("你好世界"), StudentLevel::Any);
}

#[test]
fn normalize_multibyte_fields() {
    let draft = normalize(RawPosting {
        title: Some("Développeur stagiaire – première année".into()),
        company: Some("Société Générale".into()),
        ..RawPosting::default()
    });

    assert_eq!(draft.company, "Société Générale");
    assert_eq!(draft.student_level, StudentLevel::Any);
}

#[test]
fn like_pattern_preserves_multibyte_characters() {
    assert_eq!(contains_pattern("Zürich_%"), "%Zürich\\_\\%%");
}
