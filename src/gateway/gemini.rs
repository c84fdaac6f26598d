use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error};

use super::ExtractionGateway;
use crate::config::GatewayConfig;
use crate::error::AppError;
use crate::models::{AcquisitionInput, AcquisitionSource, ConsumptionRecord, IdentifiedFood};

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// Request/response shapes for the generateContent endpoint. Only the parts
// this client touches are modeled; unknown response fields are ignored.

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    InlineData { inline_data: InlineData },
    Text { text: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct InlineData {
    mime_type: String,
    data: String, // base64
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    message: String,
}

/// Gemini-backed extraction gateway. Both operations request structured JSON
/// output, so the model response body is itself the record array.
pub struct GeminiGateway {
    api_key: String,
    model: String,
    timeout_secs: u64,
    client: Client,
}

impl GeminiGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, AppError> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::Config(
                "GEMINI_API_KEY environment variable not set".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    /// Run one generateContent call and return the first candidate's text.
    async fn generate(&self, parts: Vec<Part>, schema: Value) -> Result<String, AppError> {
        let url = format!(
            "{API_BASE_URL}/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let request = GeminiRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            },
        };

        debug!(model = %self.model, "sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::GatewayTimeout(self.timeout_secs)
                } else {
                    AppError::GatewayUnavailable(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::GatewayUnavailable(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            let message = serde_json::from_str::<GeminiResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .map_or(body, |e| e.message);
            return Err(AppError::GatewayUnavailable(format!(
                "Gemini API error ({status}): {message}"
            )));
        }

        let parsed: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "failed to parse Gemini response envelope");
            AppError::GatewayMalformedResponse(format!("response envelope: {e}"))
        })?;
        if let Some(api_error) = parsed.error {
            return Err(AppError::GatewayUnavailable(format!(
                "Gemini API error: {}",
                api_error.message
            )));
        }

        parsed
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .and_then(|content| {
                content.parts.iter().find_map(|p| match p {
                    Part::Text { text } => Some(text.clone()),
                    Part::InlineData { .. } => None,
                })
            })
            .ok_or_else(|| {
                AppError::GatewayMalformedResponse("no text candidate in response".to_string())
            })
    }
}

#[async_trait]
impl ExtractionGateway for GeminiGateway {
    async fn extract_acquisitions(
        &self,
        input: &AcquisitionInput,
    ) -> Result<Vec<IdentifiedFood>, AppError> {
        let parts = match &input.source {
            AcquisitionSource::Text(text) => {
                // The storage hint rides inside the prompt text; the caller
                // still forces the override onto every synthesized item.
                let subject = match input.storage_override {
                    Some(storage) => format!(
                        "{text} (IMPORTANTE: armazenar todos os itens em: {storage})"
                    ),
                    None => text.clone(),
                };
                let prompt = format!(
                    "Identifique os alimentos descritos neste texto: \"{subject}\". \
                     Extraia quantidades e unidades de medida, sugerindo armazenamento e validade."
                );
                vec![Part::Text { text: prompt }]
            }
            AcquisitionSource::Image { data, mime_type } => {
                let prompt = "Analise esta imagem e identifique os alimentos presentes, \
                              suas quantidades aproximadas e unidades de medida. Sugira o \
                              melhor armazenamento e a validade média para cada item."
                    .to_string();
                vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.clone(),
                            data: STANDARD.encode(data),
                        },
                    },
                    Part::Text { text: prompt },
                ]
            }
        };

        let text = self.generate(parts, food_schema()).await?;
        serde_json::from_str(&text)
            .map_err(|e| AppError::GatewayMalformedResponse(format!("acquisition records: {e}")))
    }

    async fn extract_consumption(
        &self,
        text: &str,
    ) -> Result<Vec<ConsumptionRecord>, AppError> {
        let prompt = format!(
            "Interprete o seguinte comando de consumo de alimento: \"{text}\". \
             Retorne o nome do alimento e a quantidade que o usuário quer consumir."
        );
        let body = self
            .generate(vec![Part::Text { text: prompt }], consumption_schema())
            .await?;
        serde_json::from_str(&body)
            .map_err(|e| AppError::GatewayMalformedResponse(format!("consumption records: {e}")))
    }
}

/// Structured-output schema for acquisition extraction. The storage enum
/// doubles as the serde contract of `StorageType`.
fn food_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING", "description": "Nome comum do alimento em português" },
                "quantity": { "type": "NUMBER", "description": "Quantidade numérica identificada" },
                "unit": { "type": "STRING", "description": "Unidade de medida (ex: kg, g, unidade, litros)" },
                "storageType": {
                    "type": "STRING",
                    "enum": ["fora da geladeira", "geladeira", "freezer", "despensa"],
                    "description": "Melhor tipo de armazenamento para este alimento"
                },
                "expiryDays": { "type": "NUMBER", "description": "Estimativa de dias para vencimento se armazenado corretamente" },
                "estimatedPrice": { "type": "NUMBER", "description": "Preço médio nacional estimado para esta quantidade" }
            },
            "required": ["name", "quantity", "unit", "storageType", "expiryDays", "estimatedPrice"]
        }
    })
}

fn consumption_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "quantity": { "type": "NUMBER" }
            },
            "required": ["name", "quantity"]
        }
    })
}

impl fmt::Debug for GeminiGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiGateway")
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
