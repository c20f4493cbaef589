//! Relevance filtering of retrieved chunks.

use super::types::CandidateChunk;

/// Maximum chunks that may back one answer.
pub const MAX_RELEVANT_CHUNKS: usize = 3;

/// Lower-cased query tokens longer than two characters.
pub fn significant_words(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() > 2)
        .collect()
}

/// Keep candidates whose content contains a significant query word.
///
/// Retrieval order is preserved and at most [`MAX_RELEVANT_CHUNKS`] are kept.
pub fn filter(query: &str, candidates: Vec<CandidateChunk>) -> Vec<CandidateChunk> {
    let words = significant_words(query);
    if words.is_empty() {
        return Vec::new();
    }

    candidates
        .into_iter()
        .filter(|chunk| {
            let content = chunk.content.to_lowercase();
            words.iter().any(|w| content.contains(w.as_str()))
        })
        .take(MAX_RELEVANT_CHUNKS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(texts: &[&str]) -> Vec<CandidateChunk> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| CandidateChunk::new(*t, format!("doc{}.md", i)))
            .collect()
    }

    #[test]
    fn test_significant_words() {
        assert_eq!(
            significant_words("What IS an API?"),
            vec!["what".to_string(), "api?".to_string()]
        );
    }

    #[test]
    fn test_keeps_order_and_limit() {
        let input = chunks(&[
            "Docker builds images",
            "unrelated text",
            "docker compose",
            "DOCKER swarm",
            "docker again",
        ]);

        let kept = filter("docker basics", input);
        assert_eq!(kept.len(), MAX_RELEVANT_CHUNKS);
        assert_eq!(kept[0].content, "Docker builds images");
        assert_eq!(kept[1].content, "docker compose");
        assert_eq!(kept[2].content, "DOCKER swarm");
    }

    #[test]
    fn test_short_word_query_yields_nothing() {
        assert!(filter("is it ok", chunks(&["is it ok"])).is_empty());
    }

    #[test]
    fn test_empty_candidates() {
        assert!(filter("kubernetes pods", Vec::new()).is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(filter("kubernetes?", chunks(&["pandas dataframes"])).is_empty());
    }
}
