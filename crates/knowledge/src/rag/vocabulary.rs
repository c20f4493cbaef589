//! Shared domain vocabulary.
//!
//! The question router and the conversational responder both read this
//! table, so a keyword added here changes both decisions together.

use serde::Serialize;

/// Keywords marking a question as technical. Matched as lower-case substrings.
pub const DOMAIN_KEYWORDS: &[&str] = &[
    // Machine learning / AI
    "machine learning",
    "ml",
    "artificial intelligence",
    "ai",
    "neural network",
    "deep learning",
    "supervised learning",
    "unsupervised learning",
    "reinforcement learning",
    "algorithm",
    "model",
    "training",
    "prediction",
    "classification",
    "regression",
    "clustering",
    "overfitting",
    "underfitting",
    "feature engineering",
    // Web development
    "web development",
    "html",
    "css",
    "javascript",
    "frontend",
    "backend",
    "react",
    "vue",
    "angular",
    "node.js",
    "api",
    "database",
    "server",
    "website",
    "web app",
    "framework",
    "library",
    "programming",
    // Data science
    "data science",
    "data analysis",
    "statistics",
    "pandas",
    "numpy",
    "matplotlib",
    "jupyter",
    "data visualization",
    "data cleaning",
    "data preprocessing",
    "big data",
    "analytics",
    "business intelligence",
    // Cloud computing
    "cloud",
    "aws",
    "azure",
    "google cloud",
    "gcp",
    "docker",
    "kubernetes",
    "serverless",
    "infrastructure",
    "deployment",
    "scalability",
    "microservices",
    // General tech
    "software",
    "development",
    "coding",
    "computer science",
    "technology",
    "tech",
    "developer",
    "engineer",
];

/// Whether already lower-cased text mentions any domain keyword.
pub fn mentions_domain(lowered: &str) -> bool {
    DOMAIN_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// A supported topic area, as advertised by the HTTP service.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Topic {
    pub name: &'static str,
    pub description: &'static str,
    pub examples: &'static [&'static str],
}

pub const TOPICS: &[Topic] = &[
    Topic {
        name: "Machine Learning",
        description: "AI, algorithms, models, training",
        examples: &["What is supervised learning?", "How does neural network work?"],
    },
    Topic {
        name: "Web Development",
        description: "Frontend, backend, frameworks, APIs",
        examples: &["How does React work?", "What is Node.js?"],
    },
    Topic {
        name: "Data Science",
        description: "Analysis, visualization, statistics",
        examples: &["What is data cleaning?", "How to use pandas?"],
    },
    Topic {
        name: "Cloud Computing",
        description: "AWS, Azure, deployment, scalability",
        examples: &["What is serverless?", "How does Docker work?"],
    },
];

/// Topic names in display order.
pub fn topic_names() -> Vec<&'static str> {
    TOPICS.iter().map(|t| t.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_lowercase() {
        for kw in DOMAIN_KEYWORDS {
            assert_eq!(*kw, kw.to_lowercase());
        }
    }

    #[test]
    fn test_mentions_domain_substring() {
        assert!(mentions_domain("a rapid prototype"));
        assert!(mentions_domain("how do i use kubernetes"));
        assert!(!mentions_domain("where is paris"));
    }

    #[test]
    fn test_four_topics() {
        assert_eq!(
            topic_names(),
            vec![
                "Machine Learning",
                "Web Development",
                "Data Science",
                "Cloud Computing"
            ]
        );
    }
}
