use crate::domain::model::Spread;
use async_trait::async_trait;

/// Result of a single attempt against the remote text-generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCallOutcome {
    Success(String),
    /// The request never got a 2xx answer. `status` is `None` when no response arrived.
    TransportFailure { status: Option<u16>, detail: String },
    /// A 2xx answer whose body does not carry the generated message.
    MalformedPayload(String),
}

pub trait RemoteSettings: Send + Sync {
    fn endpoint(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn model(&self) -> &str;
    fn temperature(&self) -> f32;
    fn max_tokens(&self) -> u32;
    fn timeout_seconds(&self) -> u64;
}

#[async_trait]
pub trait InterpretationClient: Send + Sync {
    async fn request_interpretation(&self, spread: &Spread) -> RemoteCallOutcome;
}
