use super::payload::ImagePayload;
use super::VisionModel;
use crate::config::VisionConfig;
use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Prompt sent with every image. The labels must match what the parser looks for.
pub const IDENTIFY_PROMPT: &str = "Identify this plant and provide its name, scientific name, \
a brief description, estimate its quality of life based on the image (as a percentage), \
estimate its rarity (as a percentage where higher means rarer), and provide care instructions \
including watering, light, temperature, and soil requirements. Format the response as follows:\n\
Name: [plant name]\n\
Scientific name: [scientific name]\n\
Description: [description]\n\
Quality: [quality percentage]\n\
Rarity: [rarity percentage]\n\
Watering: [watering instructions]\n\
Light: [light requirements]\n\
Temperature: [temperature range]\n\
Soil: [soil type]";

/// Client for the Gemini `generateContent` REST endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: VisionConfig,
}

#[derive(Serialize, Debug)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize, Debug)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    Image { inline_data: InlineData<'a> },
}

#[derive(Serialize, Debug)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: String,
}

impl GeminiClient {
    pub fn new(config: VisionConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::new(VisionConfig::from_env())
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.config.endpoint, self.config.model)
    }

    fn build_request<'a>(prompt: &'a str, image: &'a ImagePayload) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt },
                    Part::Image {
                        inline_data: InlineData {
                            mime_type: &image.mime_type,
                            data: &image.data_base64,
                        },
                    },
                ],
            }],
        }
    }
}

impl VisionModel for GeminiClient {
    async fn describe(&self, image: &ImagePayload) -> Result<String, AppError> {
        // Fail before any network traffic when no key is configured
        let api_key = self.config.require_api_key()?;
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", api_key)
            .json(&Self::build_request(IDENTIFY_PROMPT, image))
            .send()
            .await?;

        // Read the body either way; error replies carry a JSON message
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                file = %image.file_name,
                "Model API request failed"
            );
            return Err(AppError::Api {
                status: status.as_u16(),
                body: api_error_message(&body),
            });
        }

        // Join the text parts of the first candidate
        let text = extract_text(&body)?;

        tracing::info!(
            model = %self.config.model,
            file = %image.file_name,
            elapsed_ms = %start.elapsed().as_millis(),
            text_len = text.len(),
            "Model response received"
        );

        Ok(text)
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(body: &str) -> Result<String, AppError> {
    let response: GenerateResponse = serde_json::from_str(body)?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect::<String>())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AppError::EmptyResponse);
    }
    Ok(text)
}

/// Prefer the API's own error message over the raw body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
