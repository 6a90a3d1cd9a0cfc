use std::time::Duration;

use curator::{Backend, DenyAll, ModelGate, RequestContext};
use curator_openai::{DEMO_TOKEN_HEADER, OpenAiClient, OpenAiEnv, TokenGate};

use crate::GlobalArgs;

/// Collaborators for one CLI invocation.
pub struct Runtime {
    pub client: OpenAiClient,
    gate: Box<dyn ModelGate>,
    context: RequestContext,
    timeout: Duration,
}

impl Runtime {
    pub fn new(global: &GlobalArgs) -> anyhow::Result<Self> {
        let env = OpenAiEnv::from_env()?;
        let client = OpenAiClient::new(&env);

        let gate: Box<dyn ModelGate> = if global.offline {
            Box::new(DenyAll)
        } else {
            Box::new(TokenGate::from_env(&env))
        };
        if !global.offline && !client.is_configured() {
            tracing::info!("openai_api_key_missing");
        }

        let mut context = RequestContext::new();
        if let Some(token) = &global.demo_token {
            context = context.with_header(DEMO_TOKEN_HEADER, token.as_str());
        }

        Ok(Self {
            client,
            gate,
            context,
            timeout: Duration::from_secs(global.timeout_secs),
        })
    }

    pub fn backend(&self) -> Backend<'_> {
        Backend::new(&self.client, self.gate.as_ref(), &self.context).with_timeout(self.timeout)
    }
}
