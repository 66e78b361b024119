use std::sync::Arc;

use insight_core::{AnalysisReport, ChatPrompt, Failure, PromptTemplate};
use insight_logging::{insight_info, insight_warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ModelSettings;

#[derive(Debug, thiserror::Error)]
pub enum ModelCallError {
    #[error("request to model endpoint failed: {0}")]
    Transport(String),
    #[error("model endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected model response: {0}")]
    Malformed(String),
}

/// A chat-style language model.
#[async_trait::async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, ModelCallError>;
}

/// Client for a locally running Ollama server (`POST /api/chat`).
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    endpoint: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OllamaClient {
    pub fn new(settings: &ModelSettings) -> Result<Self, Failure> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| Failure::transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/chat", settings.host.trim_end_matches('/')),
            model: settings.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl ModelClient for OllamaClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, ModelCallError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            stream: false,
            options: ChatOptions {
                num_predict: prompt.max_tokens,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|err| ModelCallError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ModelCallError::Transport(err.to_string()))?;

        if !status.is_success() {
            return Err(ModelCallError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|err| ModelCallError::Malformed(err.to_string()))?;
        Ok(parsed.message.content)
    }
}

/// Turns a title and its text into a critical analysis.
pub struct AnalysisRequestor {
    template: PromptTemplate,
    client: Arc<dyn ModelClient>,
}

impl AnalysisRequestor {
    pub fn new(template: PromptTemplate, client: Arc<dyn ModelClient>) -> Self {
        Self { template, client }
    }

    /// One request, no retry; a failed call comes back as a `Model` failure.
    pub async fn analyze(&self, title: &str, content: &str) -> Result<AnalysisReport, Failure> {
        let prompt = self.template.build(title, content);
        insight_info!(
            "Requesting analysis of {:?} ({} characters)",
            title,
            content.chars().count()
        );

        match self.client.complete(&prompt).await {
            Ok(body) => Ok(AnalysisReport {
                subject_title: title.to_string(),
                body: body.trim().to_string(),
            }),
            Err(err) => {
                insight_warn!("Analysis of {:?} failed: {}", title, err);
                Err(Failure::model(err.to_string()))
            }
        }
    }
}
