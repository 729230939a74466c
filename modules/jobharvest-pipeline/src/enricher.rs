//! LLM enrichment of scraped post text.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use openai_client::{ChatRequest, Message, OpenAIClient};

const SYSTEM_PROMPT: &str = "You are a helpful assistant that extracts and structures job posting information. Process the data and give output in a clean and formatted manner (free of quotes and brackets) so its easy to read and look clean";

static STRUCTURAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[{}"]+"#).unwrap());
static COLON_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*:\s*").unwrap());
static COMMA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*").unwrap());

/// Produces the enrichment column for one post.
#[async_trait]
pub trait Enricher: Send + Sync {
    async fn enrich(&self, info: &str, more_info: &str) -> Result<String>;
}

pub struct OpenAiEnricher {
    client: OpenAIClient,
    model: String,
}

impl OpenAiEnricher {
    pub fn new(client: OpenAIClient, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl Enricher for OpenAiEnricher {
    async fn enrich(&self, info: &str, more_info: &str) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .message(Message::system(SYSTEM_PROMPT))
            .message(Message::user(build_prompt(info, more_info)))
            .temperature(0.0);

        let response = self
            .client
            .chat_completion(request)
            .await
            .context("Chat completion failed")?;

        debug!(chars = response.content.len(), "Enrichment reply received");
        Ok(format_reply(&response.content))
    }
}

fn build_prompt(info: &str, more_info: &str) -> String {
    format!(
        r#"Given the following data from a LinkedIn job post, extract and format the following information:
- Person to contact
- Email (if available)
- Phone number (if available)
- Job title
- Job location
- Company name
- Key job requirements
- Any other relevant details for a job application

Data:
Info: {info}
More Info: {more_info}

Please format the output as a structured JSON object."#
    )
}

/// Flatten the model's JSON-shaped reply into plain `key: value` lines.
/// Total on any input; text with no structure passes through unchanged.
pub fn format_reply(reply: &str) -> String {
    let text = STRUCTURAL_RE.replace_all(reply, "");
    let text = COLON_RE.replace_all(&text, ": ");
    let text = COMMA_RE.replace_all(&text, "\n");
    text.trim().to_string()
}
