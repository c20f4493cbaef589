//! Canned replies for general or unanswerable questions.

use super::vocabulary::mentions_domain;

const QUESTION_WORDS: &[&str] = &["what", "where", "when", "why", "how", "who"];

/// Reply category, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyCategory {
    WellBeing,
    Greeting,
    Thanks,
    Farewell,
    OutOfDomain,
    Fallback,
}

impl ReplyCategory {
    pub fn reply(&self) -> &'static str {
        match self {
            ReplyCategory::WellBeing => "I'm doing well, thank you! I'm here to help with questions about machine learning, web development, data science, and cloud computing. What would you like to know about these topics?",
            ReplyCategory::Greeting => "Hello! I'm your technical assistant specializing in machine learning, web development, data science, and cloud computing. How can I help you today?",
            ReplyCategory::Thanks => "You're welcome! Feel free to ask me more questions about technology topics.",
            ReplyCategory::Farewell => "Goodbye! Have a great day!",
            ReplyCategory::OutOfDomain => "I'm sorry, but I specialize in technical topics like machine learning, web development, data science, and cloud computing. I don't have information about general knowledge questions. Would you like to ask me something about these technical areas instead?",
            ReplyCategory::Fallback => "I'm a technical assistant focused on machine learning, web development, data science, and cloud computing. I don't have information about that topic. What technical question can I help you with?",
        }
    }

    fn patterns(&self) -> &'static [&'static str] {
        match self {
            ReplyCategory::WellBeing => &["how are you", "how do you do"],
            ReplyCategory::Greeting => &[
                "hello",
                "hi",
                "hey",
                "good morning",
                "good afternoon",
                "good evening",
            ],
            ReplyCategory::Thanks => &["thank you", "thanks"],
            ReplyCategory::Farewell => &["goodbye", "bye", "see you", "farewell"],
            ReplyCategory::OutOfDomain | ReplyCategory::Fallback => &[],
        }
    }
}

const PATTERN_CATEGORIES: [ReplyCategory; 4] = [
    ReplyCategory::WellBeing,
    ReplyCategory::Greeting,
    ReplyCategory::Thanks,
    ReplyCategory::Farewell,
];

/// Pick the reply category for a query. Substring matching, first match wins.
pub fn categorize(query: &str) -> ReplyCategory {
    let lowered = query.to_lowercase();

    if let Some(category) = PATTERN_CATEGORIES
        .iter()
        .find(|c| c.patterns().iter().any(|p| lowered.contains(p)))
    {
        return *category;
    }

    let asks_question = QUESTION_WORDS.iter().any(|w| lowered.contains(w));
    if asks_question && !mentions_domain(&lowered) {
        return ReplyCategory::OutOfDomain;
    }

    ReplyCategory::Fallback
}

/// Canned reply for a query.
pub fn respond(query: &str) -> &'static str {
    categorize(query).reply()
}
