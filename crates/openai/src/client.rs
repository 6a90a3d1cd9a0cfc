use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use curator::{BoxFuture, GenerateError, TextGenerator};
use curator_audio_mime::audio_format;

use crate::env::OpenAiEnv;
use crate::error::{Error, Result};
use crate::types::{ContentPart, InputMessage, ResponseInput, ResponsesReply, ResponsesRequest};

const TRANSCRIBE_INSTRUCTION: &str = "Please transcribe this audio in Chinese if applicable.";

#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    text_model: String,
    transcribe_model: String,
}

impl OpenAiClient {
    pub fn new(env: &OpenAiEnv) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: env.openai_base_url.trim_end_matches('/').to_string(),
            api_key: env.openai_api_key.clone(),
            text_model: env.openai_model_text.clone(),
            transcribe_model: env.openai_model_transcribe.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(Error::MissingApiKey)
    }

    async fn respond(&self, model: &str, input: ResponseInput) -> Result<String> {
        let api_key = self.api_key()?;
        let url = format!("{}/responses", self.base_url);
        let request = ResponsesRequest {
            model: model.to_string(),
            input,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status, model, "responses_request_failed");
            return Err(Error::Api { status, body });
        }

        let bytes = response.bytes().await?;
        let reply: ResponsesReply = serde_json::from_slice(&bytes)?;
        Ok(reply.text())
    }

    /// Send a plain-text prompt to the text model.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        self.respond(&self.text_model, ResponseInput::Text(prompt.to_string()))
            .await
    }

    /// Transcribe base64-encoded audio. `mime_type` may be a mime type
    /// (`audio/mpeg`) or a bare format name (`mp3`).
    pub async fn transcribe_base64(&self, audio: &str, mime_type: &str) -> Result<String> {
        let input = ResponseInput::Messages(vec![InputMessage {
            role: "user".to_string(),
            content: vec![
                ContentPart::InputText {
                    text: TRANSCRIBE_INSTRUCTION.to_string(),
                },
                ContentPart::InputAudio {
                    audio: audio.to_string(),
                    format: audio_format(mime_type),
                },
            ],
        }]);

        self.respond(&self.transcribe_model, input).await
    }

    pub async fn transcribe(&self, audio: &[u8], mime_type: &str) -> Result<String> {
        self.transcribe_base64(&BASE64.encode(audio), mime_type)
            .await
    }
}

impl TextGenerator for OpenAiClient {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> BoxFuture<'a, std::result::Result<String, GenerateError>> {
        Box::pin(async move { self.complete(prompt).await.map_err(GenerateError::from) })
    }
}
