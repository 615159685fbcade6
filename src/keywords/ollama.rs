//! Keyword extraction through an Ollama-compatible `/api/generate` endpoint

use async_trait::async_trait;
use fancy_regex::Regex;
use log::{debug, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;

use super::{KeywordExtractionError, KeywordExtractor};
use crate::config::KeywordModelConfig;

/// A comma-separated run of words, spaces and hyphens. The lookahead needs
/// fancy-regex.
static KEYWORD_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[\w\s-]+\b(?=,|$)").expect("KEYWORD_RUN_RE: hardcoded regex is valid")
});

fn keyword_prompt(instructions: &str) -> String {
    format!(
        "You are an intelligent keyword extraction assistant. Based on the following user query, \
         generate a list of highly relevant keywords and phrases that cover all key aspects of the \
         request. Include direct terms, synonyms, specific needs, and related concepts that could \
         help address the query.\n\
         The query is: '{instructions}'. Provide the keywords in a concise, comma-separated list."
    )
}

/// Pull the comma-separated keyword phrases out of a model response.
///
/// Preamble text that is not followed by a comma (for example
/// `"Keywords:"`) is ignored. Phrases are returned trimmed, in order.
#[must_use]
pub fn parse_keyword_response(response: &str) -> Vec<String> {
    let text = response.trim();
    KEYWORD_RUN_RE
        .find_iter(text)
        .filter_map(|m| match m {
            Ok(m) => Some(m.as_str().trim().to_string()),
            Err(e) => {
                warn!(target: "sitesift::keywords", "Keyword pattern failed on response: {e}");
                None
            }
        })
        .filter(|phrase| !phrase.is_empty())
        .collect()
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Asks a local language model for keywords.
#[derive(Debug, Clone)]
pub struct OllamaKeywordExtractor {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f32,
}

impl OllamaKeywordExtractor {
    /// # Errors
    ///
    /// Returns `KeywordExtractionError::Request` if the HTTP client cannot
    /// be built.
    pub fn new(config: &KeywordModelConfig) -> Result<Self, KeywordExtractionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs()))
            .build()?;
        let endpoint = format!("{}/api/generate", config.base_url().trim_end_matches('/'));
        Ok(Self {
            client,
            endpoint,
            model: config.model().to_string(),
            temperature: config.temperature(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl KeywordExtractor for OllamaKeywordExtractor {
    async fn extract_keywords(
        &self,
        instructions: &str,
    ) -> Result<Vec<String>, KeywordExtractionError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: keyword_prompt(instructions),
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
            },
        };

        debug!(target: "sitesift::keywords", "Requesting keywords from {} ({})", self.endpoint, self.model);
        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(KeywordExtractionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        debug!(target: "sitesift::keywords", "Model response: {}", parsed.response.trim());

        let phrases = parse_keyword_response(&parsed.response);
        if phrases.is_empty() {
            return Err(KeywordExtractionError::Empty);
        }
        info!(target: "sitesift::keywords", "Model suggested {} keyword phrases", phrases.len());
        Ok(phrases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_comma_list() {
        assert_eq!(
            parse_keyword_response("grant, financial assistance, housing-aid"),
            vec!["grant", "financial assistance", "housing-aid"]
        );
    }

    #[test]
    fn skips_preamble_without_comma() {
        assert_eq!(
            parse_keyword_response("Keywords: grants, rent relief\n"),
            vec!["grants", "rent relief"]
        );
    }

    #[test]
    fn single_term_is_kept() {
        assert_eq!(parse_keyword_response("scholarships"), vec!["scholarships"]);
    }

    #[test]
    fn empty_response_yields_nothing() {
        assert!(parse_keyword_response("").is_empty());
        assert!(parse_keyword_response(" , , ").is_empty());
    }

    #[test]
    fn prompt_embeds_instructions() {
        let prompt = keyword_prompt("find housing grants");
        assert!(prompt.contains("The query is: 'find housing grants'."));
        assert!(prompt.ends_with("comma-separated list."));
    }

    #[test]
    fn endpoint_joins_base_url() {
        let config = KeywordModelConfig::default().with_base_url("http://127.0.0.1:9999/");
        let extractor = OllamaKeywordExtractor::new(&config).unwrap();
        assert_eq!(extractor.endpoint(), "http://127.0.0.1:9999/api/generate");
    }
}
