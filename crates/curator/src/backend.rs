use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub type GenerateError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Text-generation backend.
///
/// Any error (network, auth, rate limit) is treated the same way by the
/// pipeline: the task falls back to its synthesized record.
///
/// # Object safety
///
/// The trait is object-safe via the explicit `BoxFuture` return type, so
/// pipelines hold it as `&dyn TextGenerator`.
pub trait TextGenerator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, GenerateError>>;
}

/// Decides, once per invocation, whether the backend may be called at all.
pub trait ModelGate: Send + Sync {
    fn model_access_allowed(&self, context: &RequestContext) -> bool;
}

pub struct AllowAll;

impl ModelGate for AllowAll {
    fn model_access_allowed(&self, _context: &RequestContext) -> bool {
        true
    }
}

pub struct DenyAll;

impl ModelGate for DenyAll {
    fn model_access_allowed(&self, _context: &RequestContext) -> bool {
        false
    }
}

/// Adapts a closure into a [`ModelGate`].
pub struct GateFn<F>(pub F);

impl<F> ModelGate for GateFn<F>
where
    F: Fn(&RequestContext) -> bool + Send + Sync,
{
    fn model_access_allowed(&self, context: &RequestContext) -> bool {
        (self.0)(context)
    }
}

/// Generator for deployments without a backend; every call fails.
pub struct Unreachable;

impl TextGenerator for Unreachable {
    fn generate<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<String, GenerateError>> {
        Box::pin(async {
            Err(GenerateError::from("text generation backend is not configured"))
        })
    }
}

/// Request-scoped metadata consulted by a [`ModelGate`]. Header names are
/// case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    headers: BTreeMap<String, String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// The two external collaborators plus per-invocation tuning.
pub struct Backend<'a> {
    pub(crate) generator: &'a dyn TextGenerator,
    pub(crate) gate: &'a dyn ModelGate,
    pub(crate) context: &'a RequestContext,
    pub(crate) timeout: Option<Duration>,
}

impl<'a> Backend<'a> {
    pub fn new(
        generator: &'a dyn TextGenerator,
        gate: &'a dyn ModelGate,
        context: &'a RequestContext,
    ) -> Self {
        Self {
            generator,
            gate,
            context,
            timeout: None,
        }
    }

    /// Bound the generate call. Requires a tokio runtime with the time driver.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let context = RequestContext::new().with_header("X-Demo-Token", "secret");
        assert_eq!(context.header("x-demo-token"), Some("secret"));
        assert_eq!(context.header("X-DEMO-TOKEN"), Some("secret"));
        assert_eq!(context.header("authorization"), None);
    }

    #[test]
    fn closure_gate() {
        let gate = GateFn(|context: &RequestContext| context.header("x-demo-token") == Some("ok"));
        let context = RequestContext::new().with_header("x-demo-token", "ok");
        assert!(gate.model_access_allowed(&context));
        assert!(!gate.model_access_allowed(&RequestContext::new()));
        assert!(AllowAll.model_access_allowed(&RequestContext::new()));
        assert!(!DenyAll.model_access_allowed(&RequestContext::new()));
    }

    #[tokio::test]
    async fn unreachable_always_fails() {
        assert!(Unreachable.generate("prompt").await.is_err());
    }
}
