//! Question routing: technical or general.

use super::types::QuestionType;
use super::vocabulary::mentions_domain;

/// Classify a question by substring match against the domain vocabulary.
///
/// Matching is not word-aware: "api" inside "rapid" counts.
pub fn classify(query: &str) -> QuestionType {
    if mentions_domain(&query.to_lowercase()) {
        QuestionType::Technical
    } else {
        QuestionType::General
    }
}
