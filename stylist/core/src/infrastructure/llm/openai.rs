// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// OpenAI Provider Adapter
//
// Anti-Corruption Layer for the OpenAI chat completions API.
// Also works with OpenAI-compatible APIs (LM Studio, vLLM, etc.)
// Serves both text generation and clothing image analysis.

use crate::domain::llm::{FinishReason, GenerationOptions, GenerationResponse, LLMError, LLMProvider, TokenUsage};
use crate::domain::vision::{AnalysisError, ImageAnalyzer, ImageUpload};
use crate::domain::wardrobe::DetectedAttributes;
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";

const VISION_MAX_TOKENS: u32 = 300;

const VISION_PROMPT: &str = r#"Analyze this clothing item and return a JSON object with:
{
  "category": one of ["top","bottom","shoes","outerwear","accessory","dress"],
  "subcategory": specific type like "t-shirt","jeans","sneakers","blazer",
  "colors": array of main colors,
  "style": one of ["casual","formal","sporty","streetwear","bohemian","minimalist"],
  "season": array of suitable seasons ["spring","summer","fall","winter"],
  "occasions": array of suitable occasions ["work","casual","date","party","gym","outdoor"]
}
Return JSON only."#;

pub struct OpenAIAdapter {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct OpenAIMessage {
    role: String,
    content: MessageContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    #[serde(default)]
    usage: Option<OpenAIUsage>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Transport-level failure, mapped per caller interface
enum CallError {
    Network(String),
    Authentication(String),
    RateLimit,
    ModelNotFound,
    Provider(String),
}

impl OpenAIAdapter {
    pub fn new(endpoint: Option<String>, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_OPENAI_ENDPOINT.to_string()),
            api_key,
            model,
        }
    }

    async fn complete(&self, request: &OpenAIRequest) -> Result<OpenAIResponse, CallError> {
        let url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));

        let mut builder = self.client.post(&url).json(request);
        if !self.api_key.is_empty() {
            builder = builder.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CallError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return Err(if status == 401 || status == 403 {
                CallError::Authentication(error_text)
            } else if status == 429 {
                CallError::RateLimit
            } else if status == 404 {
                CallError::ModelNotFound
            } else {
                CallError::Provider(format!("HTTP {}: {}", status, error_text))
            });
        }

        response
            .json()
            .await
            .map_err(|e| CallError::Provider(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl LLMProvider for OpenAIAdapter {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<GenerationResponse, LLMError> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: MessageContent::Text(prompt.to_string()),
            }],
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            response_format: options.json_output.then(|| ResponseFormat {
                kind: "json_object".to_string(),
            }),
        };

        let openai_response = self.complete(&request).await.map_err(|e| match e {
            CallError::Network(m) => LLMError::Network(m),
            CallError::Authentication(m) => LLMError::Authentication(m),
            CallError::RateLimit => LLMError::RateLimit,
            CallError::ModelNotFound => LLMError::ModelNotFound(self.model.clone()),
            CallError::Provider(m) => LLMError::Provider(m),
        })?;

        let usage = openai_response.usage;
        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::Provider("No response from model".into()))?;

        Ok(GenerationResponse {
            text: choice.message.content.unwrap_or_default(),
            usage: usage
                .map(|u| TokenUsage {
                    prompt_tokens: u.prompt_tokens,
                    completion_tokens: u.completion_tokens,
                    total_tokens: u.total_tokens,
                })
                .unwrap_or_default(),
            provider: "openai".to_string(),
            model: self.model.clone(),
            finish_reason: match choice.finish_reason.as_deref() {
                Some("length") => FinishReason::Length,
                Some("content_filter") => FinishReason::ContentFilter,
                _ => FinishReason::Stop,
            },
        })
    }
}

#[async_trait]
impl ImageAnalyzer for OpenAIAdapter {
    async fn analyze(&self, image: &ImageUpload) -> Result<DetectedAttributes, AnalysisError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&image.bytes);

        let request = OpenAIRequest {
            model: self.model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: VISION_PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:{};base64,{}", image.mime_type(), encoded),
                        },
                    },
                ]),
            }],
            max_tokens: Some(VISION_MAX_TOKENS),
            temperature: None,
            response_format: Some(ResponseFormat {
                kind: "json_object".to_string(),
            }),
        };

        let response = self.complete(&request).await.map_err(|e| match e {
            CallError::Network(m) => AnalysisError::Network(m),
            CallError::Authentication(m) => AnalysisError::Authentication(m),
            CallError::RateLimit => AnalysisError::Provider("rate limit exceeded".to_string()),
            CallError::ModelNotFound => AnalysisError::Provider(format!("model not found: {}", self.model)),
            CallError::Provider(m) => AnalysisError::Provider(m),
        })?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AnalysisError::Malformed("empty response".to_string()))?;

        serde_json::from_str(&content).map_err(|e| AnalysisError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wardrobe::{Category, Occasion, Style};
    use mockito::Matcher;

    fn completion(content: &str) -> String {
        serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }],
            "usage": { "prompt_tokens": 50, "completion_tokens": 20, "total_tokens": 70 }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_analyze_sends_data_url_and_parses_attributes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(serde_json::json!({
                    "model": "gpt-4o-mini",
                    "max_tokens": 300,
                    "response_format": { "type": "json_object" }
                })),
                Matcher::Regex("data:image/png;base64,AQID".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion(
                r#"{"category":"shoes","subcategory":"sneakers","colors":["white"],"style":"sporty","season":["spring","summer"],"occasions":["gym","casual"]}"#,
            ))
            .create_async()
            .await;

        let adapter = OpenAIAdapter::new(Some(server.url()), "sk-test".into(), "gpt-4o-mini".into());
        let upload = ImageUpload {
            bytes: vec![1, 2, 3],
            file_name: "kicks.png".to_string(),
            content_type: Some("image/png".to_string()),
        };

        let attributes = adapter.analyze(&upload).await.unwrap();

        mock.assert_async().await;
        assert_eq!(attributes.category, Category::Shoes);
        assert_eq!(attributes.subcategory.as_deref(), Some("sneakers"));
        assert_eq!(attributes.style, Style::Sporty);
        assert!(attributes.occasions.contains(&Occasion::Gym));
    }

    #[tokio::test]
    async fn test_analyze_rejects_unknown_vocabulary() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion(
                r#"{"category":"hat","colors":["red"],"style":"casual","season":[],"occasions":[]}"#,
            ))
            .create_async()
            .await;

        let adapter = OpenAIAdapter::new(Some(server.url()), "sk-test".into(), "gpt-4o-mini".into());
        let upload = ImageUpload {
            bytes: vec![1],
            file_name: "hat.jpg".to_string(),
            content_type: Some("image/jpeg".to_string()),
        };

        assert!(matches!(adapter.analyze(&upload).await, Err(AnalysisError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_generate_maps_rate_limit() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .create_async()
            .await;

        let adapter = OpenAIAdapter::new(Some(server.url()), "sk-test".into(), "gpt-4o-mini".into());
        let result = adapter.generate("hello", &GenerationOptions::default()).await;
        assert!(matches!(result, Err(LLMError::RateLimit)));
    }

    #[tokio::test]
    async fn test_generate_returns_text_and_usage() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion("{\"outfits\": []}"))
            .create_async()
            .await;

        let adapter = OpenAIAdapter::new(Some(server.url()), String::new(), "local-model".into());
        let response = adapter.generate("hello", &GenerationOptions::default()).await.unwrap();
        assert_eq!(response.text, "{\"outfits\": []}");
        assert_eq!(response.usage.total_tokens, 70);
        assert_eq!(response.finish_reason, FinishReason::Stop);
    }
}
