use serde::{Deserialize, Deserializer};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEXT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_TRANSCRIBE_MODEL: &str = "gpt-4o-mini-transcribe";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_text_model() -> String {
    DEFAULT_TEXT_MODEL.to_string()
}

fn default_transcribe_model() -> String {
    DEFAULT_TRANSCRIBE_MODEL.to_string()
}

/// Treats unset, empty and whitespace-only values alike.
pub fn filter_empty<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiEnv {
    #[serde(default, deserialize_with = "filter_empty")]
    pub openai_api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub openai_base_url: String,
    #[serde(default = "default_text_model")]
    pub openai_model_text: String,
    #[serde(default = "default_transcribe_model")]
    pub openai_model_transcribe: String,
    /// When set, model access also requires a matching `x-demo-token` header.
    #[serde(default, deserialize_with = "filter_empty")]
    pub demo_api_token: Option<String>,
}

impl OpenAiEnv {
    /// Read from the process environment. Callers load `.env` files first.
    pub fn from_env() -> std::result::Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn from_vars<I>(vars: I) -> std::result::Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}

impl Default for OpenAiEnv {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: default_base_url(),
            openai_model_text: default_text_model(),
            openai_model_transcribe: default_transcribe_model(),
            demo_api_token: None,
        }
    }
}
