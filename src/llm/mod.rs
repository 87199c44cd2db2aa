//! Natural-language-to-SQL generation.
//!
//! The generator is a seam: the rest of the crate only needs "question plus
//! schema in, SQL text out". [`OpenAiClient`] is the production
//! implementation; tests substitute their own.

mod openai;

pub use openai::OpenAiClient;

use async_trait::async_trait;
use thiserror::Error;

/// Default system prompt for SQL generation.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert SQL query generator. \
Your task is to convert natural language queries into accurate and efficient \
SQL queries based on the provided table schema.";

/// Default user prompt template. `{table_schema}` and `{user_query}` are
/// substituted before sending.
pub const DEFAULT_USER_TEMPLATE: &str = "Given the following table schema:
{table_schema}
Generate a SQL query for the following user request:
{user_query}
Provide only the SQL query without any additional explanation.";

/// Result type for SQL generation.
pub type LlmResult<T> = Result<T, LlmError>;

/// Errors that can occur while generating SQL.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API key configured: set [llm] api_key in facet.toml or OPENAI_API_KEY")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("completion contained no SQL text")]
    EmptyCompletion,
}

/// Boundary for turning a question and a schema description into SQL.
#[async_trait]
pub trait SqlGenerator: Send + Sync {
    async fn generate_sql(&self, question: &str, schema: &str) -> LlmResult<String>;
}

/// Fill the user prompt template.
pub(crate) fn render_user_prompt(template: &str, schema: &str, question: &str) -> String {
    template
        .replace("{table_schema}", schema)
        .replace("{user_query}", question)
}
