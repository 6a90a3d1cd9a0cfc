use curator::{ModelGate, RequestContext};

use crate::env::OpenAiEnv;

pub const DEMO_TOKEN_HEADER: &str = "x-demo-token";

/// Model access for a shared demo deployment.
///
/// Closed without an API key. Open when no demo token is configured.
/// Otherwise the trimmed `x-demo-token` header must match.
#[derive(Debug, Clone, Default)]
pub struct TokenGate {
    api_key_configured: bool,
    demo_token: Option<String>,
}

impl TokenGate {
    pub fn new(api_key_configured: bool, demo_token: Option<String>) -> Self {
        Self {
            api_key_configured,
            demo_token: demo_token
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        }
    }

    pub fn from_env(env: &OpenAiEnv) -> Self {
        Self::new(env.openai_api_key.is_some(), env.demo_api_token.clone())
    }
}

impl ModelGate for TokenGate {
    fn model_access_allowed(&self, context: &RequestContext) -> bool {
        if !self.api_key_configured {
            return false;
        }

        match &self.demo_token {
            None => true,
            Some(required) => context
                .header(DEMO_TOKEN_HEADER)
                .is_some_and(|provided| provided.trim() == required),
        }
    }
}
