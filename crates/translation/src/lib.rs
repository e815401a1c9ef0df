//! Best-effort translation of descriptive text.
//!
//! Translation is an enrichment: callers use [`translate_or_original`] so a
//! failing or slow service never blocks the computation that asked for it.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

const MYMEMORY_URL: &str = "https://api.mymemory.translated.net/get";

/// MyMemory rejects queries longer than this many characters.
pub const MAX_QUERY_CHARS: usize = 500;

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Translation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Translation service returned status {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Translation service returned an empty result")]
    Empty,
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslationError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    response_data: MyMemoryResponseData,
    #[serde(default)]
    response_status: serde_json::Value,
    #[serde(default)]
    response_details: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponseData {
    translated_text: Option<String>,
}

/// Translator backed by the MyMemory public API.
pub struct MyMemoryTranslator {
    client: reqwest::Client,
    source_lang: String,
}

impl MyMemoryTranslator {
    pub fn new(timeout: Duration) -> Result<Self, TranslationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            source_lang: "en".to_string(),
        })
    }

    pub fn with_source_lang(mut self, lang: impl Into<String>) -> Self {
        self.source_lang = lang.into();
        self
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslationError> {
        let query = truncate_chars(text, MAX_QUERY_CHARS);
        let langpair = format!("{}|{}", self.source_lang, target_lang);

        debug!("Translating {} chars to {}", query.chars().count(), target_lang);

        let response: MyMemoryResponse = self
            .client
            .get(MYMEMORY_URL)
            .query(&[("q", query), ("langpair", langpair.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_response(response)
    }
}

fn parse_response(response: MyMemoryResponse) -> Result<String, TranslationError> {
    // responseStatus arrives as either a number or a string
    let status = match &response.response_status {
        serde_json::Value::Number(n) => n.as_u64().unwrap_or(200) as u16,
        serde_json::Value::String(s) => s.parse().unwrap_or(200),
        _ => 200,
    };
    if status != 200 {
        return Err(TranslationError::Service {
            status,
            message: response.response_details.unwrap_or_default(),
        });
    }

    response
        .response_data
        .translated_text
        .filter(|t| !t.trim().is_empty())
        .ok_or(TranslationError::Empty)
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Translate `text`, returning it unchanged on any failure or when empty.
pub async fn translate_or_original(
    translator: &dyn Translator,
    text: &str,
    target_lang: &str,
) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }
    match translator.translate(text, target_lang).await {
        Ok(translated) => translated,
        Err(e) => {
            warn!("Translation failed, keeping original text: {}", e);
            text.to_string()
        }
    }
}
