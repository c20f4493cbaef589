//! Route handlers.

use crate::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Html;
use axum::Json;
use ragassist_knowledge::rag::vocabulary::{topic_names, Topic, TOPICS};
use ragassist_knowledge::{Assistant, RagResponse};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub type SharedAssistant = Arc<Assistant>;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>RAG Assistant</title>
</head>
<body>
  <h1>RAG Assistant</h1>
  <p>Ask about machine learning, web development, data science or cloud computing.</p>
  <form id="ask">
    <input id="question" name="question" size="60" placeholder="What is supervised learning?">
    <button type="submit">Ask</button>
  </form>
  <pre id="answer"></pre>
  <script>
    document.getElementById("ask").addEventListener("submit", async (event) => {
      event.preventDefault();
      const question = document.getElementById("question").value;
      const res = await fetch("/ask", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({ question })
      });
      document.getElementById("answer").textContent = JSON.stringify(await res.json(), null, 2);
    });
  </script>
</body>
</html>
"#;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub topics: Vec<&'static str>,
    pub rag_system: RagSystemInfo,
}

#[derive(Debug, Serialize)]
pub struct RagSystemInfo {
    pub mode: &'static str,
    pub index_chunks: usize,
}

/// GET /health
pub async fn health(
    State(assistant): State<SharedAssistant>,
) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "healthy",
        message: "RAG Assistant API is running",
        version: env!("CARGO_PKG_VERSION"),
        topics: topic_names(),
        rag_system: RagSystemInfo {
            mode: assistant.mode().name(),
            index_chunks: assistant.index_chunks()?,
        },
    }))
}

/// GET /topics
pub async fn topics() -> Json<&'static [Topic]> {
    Json(TOPICS)
}

/// POST /ask
pub async fn ask(
    State(assistant): State<SharedAssistant>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RagResponse>, ApiError> {
    let Ok(Json(body)) = body else {
        return Err(ApiError::MissingQuestion);
    };
    let question = body
        .get("question")
        .and_then(Value::as_str)
        .ok_or(ApiError::MissingQuestion)?;

    tracing::info!("Question received: {:?}", question);
    Ok(Json(assistant.ask(question).await?))
}

/// Any unmatched route.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
