//! Answer synthesis from relevant chunks.

use super::relevance::MAX_RELEVANT_CHUNKS;
use super::responder;
use super::types::{Answer, CandidateChunk, QuestionType, SourceRef};
use ragassist_core::{AppError, AppResult};
use ragassist_llm::{LlmClient, LlmRequest};
use ragassist_prompt::{build_prompt, PromptDefinition};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Marker prefixed to extractive answers.
pub const EXTRACTIVE_PREFIX: &str = "Based on my knowledge: ";

const EXTRACTIVE_MAX_CHARS: usize = 1000;
const PREVIEW_MAX_CHARS: usize = 100;
const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Language model settings for generated answers.
#[derive(Clone)]
pub struct GeneratedAnswer {
    pub client: Arc<dyn LlmClient>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub prompt: PromptDefinition,
}

/// How technical answers are produced. Chosen once at startup.
#[derive(Clone)]
pub enum AnswerMode {
    /// Quote retrieved text directly
    Extractive,
    /// Ask a language model, grounded on retrieved text
    Generated(GeneratedAnswer),
}

impl AnswerMode {
    pub fn name(&self) -> &'static str {
        match self {
            AnswerMode::Extractive => "extractive",
            AnswerMode::Generated(_) => "generated",
        }
    }
}

impl std::fmt::Debug for AnswerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerMode::Extractive => f.write_str("Extractive"),
            AnswerMode::Generated(g) => f
                .debug_struct("Generated")
                .field("provider", &g.client.provider_name())
                .field("model", &g.model)
                .finish(),
        }
    }
}

/// Produce the answer for a classified question.
///
/// General questions and technical questions without relevant chunks get
/// a canned reply with no sources.
pub async fn synthesize(
    mode: &AnswerMode,
    question: &str,
    question_type: QuestionType,
    relevant: &[CandidateChunk],
) -> AppResult<Answer> {
    if question_type == QuestionType::General || relevant.is_empty() {
        return Ok(Answer::canned(responder::respond(question)));
    }

    let relevant = &relevant[..relevant.len().min(MAX_RELEVANT_CHUNKS)];

    let text = match mode {
        AnswerMode::Extractive => extractive_answer(relevant),
        AnswerMode::Generated(generated) => {
            generated_answer(generated, question, relevant).await?
        }
    };

    Ok(Answer {
        text,
        sources: source_refs(relevant),
    })
}

fn extractive_answer(relevant: &[CandidateChunk]) -> String {
    let joined = relevant
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let truncated: String = joined.chars().take(EXTRACTIVE_MAX_CHARS).collect();

    format!("{}{}", EXTRACTIVE_PREFIX, sanitize(&truncated))
}

async fn generated_answer(
    generated: &GeneratedAnswer,
    question: &str,
    relevant: &[CandidateChunk],
) -> AppResult<String> {
    let context = relevant
        .iter()
        .map(|c| format!("Source: {}\n{}", c.source, c.content))
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR);

    let mut vars = HashMap::new();
    vars.insert("question".to_string(), question.to_string());
    vars.insert("context".to_string(), context);
    let built = build_prompt(&generated.prompt, vars)?;

    let mut request = LlmRequest::new(built.user, generated.model.clone())
        .with_temperature(generated.temperature);
    if let Some(max_tokens) = generated.max_tokens {
        request = request.with_max_tokens(max_tokens);
    }
    if let Some(system) = built.system {
        request = request.with_system(system);
    }

    tracing::debug!(
        provider = generated.client.provider_name(),
        model = %generated.model,
        "Requesting generated answer"
    );

    let response = generated.client.complete(&request).await.map_err(|e| match e {
        e @ AppError::Llm(_) => e,
        other => AppError::Llm(other.to_string()),
    })?;

    Ok(sanitize(&response.content))
}

/// Collapse whitespace runs to single spaces and trim.
pub fn sanitize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Source references for the chunks that backed an answer.
pub fn source_refs(relevant: &[CandidateChunk]) -> Vec<SourceRef> {
    relevant
        .iter()
        .enumerate()
        .map(|(i, chunk)| SourceRef {
            id: i + 1,
            source: display_name(&chunk.source),
            page: chunk.page.clone().unwrap_or_else(|| "N/A".to_string()),
            preview: preview(&chunk.content),
        })
        .collect()
}

fn display_name(source: &str) -> String {
    Path::new(source)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string())
}

fn preview(content: &str) -> String {
    content
        .chars()
        .take(PREVIEW_MAX_CHARS)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragassist_llm::{LlmResponse, LlmUsage};
    use ragassist_prompt::default_answer_prompt;
    use std::sync::Mutex;

    struct ScriptedClient {
        reply: Result<String, String>,
        seen: Mutex<Option<LlmRequest>>,
    }

    #[async_trait::async_trait]
    impl LlmClient for ScriptedClient {
        fn provider_name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            *self.seen.lock().unwrap() = Some(request.clone());
            match &self.reply {
                Ok(content) => Ok(LlmResponse {
                    content: content.clone(),
                    model: request.model.clone(),
                    usage: LlmUsage::default(),
                }),
                Err(msg) => Err(AppError::Llm(msg.clone())),
            }
        }
    }

    fn generated(reply: Result<&str, &str>) -> (AnswerMode, Arc<ScriptedClient>) {
        let client = Arc::new(ScriptedClient {
            reply: reply.map(str::to_string).map_err(str::to_string),
            seen: Mutex::new(None),
        });
        let mode = AnswerMode::Generated(GeneratedAnswer {
            client: client.clone(),
            model: "test-model".to_string(),
            temperature: 0.1,
            max_tokens: None,
            prompt: default_answer_prompt(),
        });
        (mode, client)
    }

    fn chunk(text: &str) -> CandidateChunk {
        CandidateChunk::new(text, "data/docs/ml_basics.txt")
    }

    #[tokio::test]
    async fn test_general_question_is_canned() {
        let answer = synthesize(
            &AnswerMode::Extractive,
            "thanks!",
            QuestionType::General,
            &[chunk("anything")],
        )
        .await
        .unwrap();

        assert_eq!(answer.text, responder::respond("thanks!"));
        assert!(answer.sources.is_empty());
    }

    #[tokio::test]
    async fn test_technical_without_chunks_is_canned() {
        let answer = synthesize(
            &AnswerMode::Extractive,
            "What is kubernetes?",
            QuestionType::Technical,
            &[],
        )
        .await
        .unwrap();

        assert!(answer.sources.is_empty());
        assert!(answer.text.starts_with("I'm a technical assistant"));
    }

    #[tokio::test]
    async fn test_extractive_answer() {
        let long = "word ".repeat(400);
        let answer = synthesize(
            &AnswerMode::Extractive,
            "What is machine learning?",
            QuestionType::Technical,
            &[chunk("Machine   learning\nlearns."), chunk(&long)],
        )
        .await
        .unwrap();

        assert!(answer.text.starts_with(EXTRACTIVE_PREFIX));
        assert!(answer.text.contains("Machine learning learns."));
        let body = &answer.text[EXTRACTIVE_PREFIX.len()..];
        assert!(body.chars().count() <= EXTRACTIVE_MAX_CHARS);
        assert_eq!(answer.sources.len(), 2);
        assert_eq!(answer.sources[0].id, 1);
        assert_eq!(answer.sources[0].source, "ml_basics.txt");
        assert_eq!(answer.sources[0].page, "N/A");
    }

    #[tokio::test]
    async fn test_generated_answer_uses_context() {
        let (mode, client) = generated(Ok("  Supervised\n learning uses labels. "));
        let answer = synthesize(
            &mode,
            "What is supervised learning?",
            QuestionType::Technical,
            &[chunk("Supervised learning uses labelled data.").with_page("2")],
        )
        .await
        .unwrap();

        assert_eq!(answer.text, "Supervised learning uses labels.");
        assert_eq!(answer.sources[0].page, "2");

        let request = client.seen.lock().unwrap().clone().unwrap();
        assert_eq!(request.model, "test-model");
        assert!(request
            .prompt
            .contains("Source: data/docs/ml_basics.txt\nSupervised learning"));
        assert!(request.prompt.contains("What is supervised learning?"));
    }

    #[tokio::test]
    async fn test_generated_failure_propagates() {
        let (mode, _) = generated(Err("connection refused"));
        let err = synthesize(
            &mode,
            "What is docker?",
            QuestionType::Technical,
            &[chunk("docker images")],
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Llm(_)));
    }

    #[test]
    fn test_preview_is_short_and_single_line() {
        let text = format!("line one\nline two\r\n{}", "x".repeat(300));
        let refs = source_refs(&[CandidateChunk::new(text, "notes")]);

        assert!(refs[0].preview.chars().count() <= PREVIEW_MAX_CHARS);
        assert!(!refs[0].preview.contains('\n'));
        assert_eq!(refs[0].source, "notes");
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("  a \n\t b  "), "a b");
    }
}
