use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use selcard_config::translator::TranslatorConfig;
use serde::Serialize;
use serde_json::Value;

use crate::{ProviderMetadata, TranslateError, Translation, Translator};

const SUCCESS_CODE: &str = "succ";

#[derive(Clone)]
pub struct TransmartTranslator {
    client: reqwest::Client,
    config: TranslatorConfig,
}

impl TransmartTranslator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn request_body<'a>(&'a self, text: &'a str) -> TransmartRequest<'a> {
        TransmartRequest {
            header: RequestHeader {
                r#fn: "auto_translation_block",
                client_key: &self.config.client_key,
            },
            source: RequestSource {
                lang: &self.config.from_lang,
                text_block: text,
                orig_text_block: text,
            },
            target: RequestTarget {
                lang: &self.config.to_lang,
            },
        }
    }
}

#[async_trait]
impl Translator for TransmartTranslator {
    async fn translate(&self, text: &str) -> Result<Translation, TranslateError> {
        tracing::debug!("Transmart request: {} chars", text.len());

        let response = self
            .client
            .post(&self.config.api_url)
            .header(ACCEPT, "application/json, text/plain, */*")
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, &self.config.user_agent)
            .json(&self.request_body(text))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: Value = response.json().await.map_err(|e| {
            TranslateError::MalformedResponse(format!("Failed to parse response: {}", e))
        })?;

        let translated = parse_response(&json)?;

        Ok(Translation {
            text: translated,
            from: self.config.from_lang.clone(),
            to: self.config.to_lang.clone(),
            provider: "transmart".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Tencent Transmart".to_string(),
            requires_api_key: false,
        }
    }
}

/// Extract the translation if `header.ret_code` reports success
fn parse_response(json: &Value) -> Result<String, TranslateError> {
    let ret_code = json["header"]["ret_code"].as_str().unwrap_or_default();
    if ret_code != SUCCESS_CODE {
        return Err(TranslateError::Unsuccessful(ret_code.to_string()));
    }

    match &json["auto_translation"] {
        Value::String(text) => Ok(text.clone()),
        Value::Array(blocks) => {
            let parts: Option<Vec<&str>> = blocks.iter().map(Value::as_str).collect();
            parts.map(|p| p.join("\n")).ok_or_else(|| {
                TranslateError::MalformedResponse("Non-text translation block".to_string())
            })
        }
        _ => Err(TranslateError::MalformedResponse(
            "No translation in response".to_string(),
        )),
    }
}

#[derive(Serialize)]
struct TransmartRequest<'a> {
    header: RequestHeader<'a>,
    source: RequestSource<'a>,
    target: RequestTarget<'a>,
}

#[derive(Serialize)]
struct RequestHeader<'a> {
    r#fn: &'a str,
    client_key: &'a str,
}

#[derive(Serialize)]
struct RequestSource<'a> {
    lang: &'a str,
    text_block: &'a str,
    orig_text_block: &'a str,
}

#[derive(Serialize)]
struct RequestTarget<'a> {
    lang: &'a str,
}
