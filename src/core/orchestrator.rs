use crate::config::RemoteConfig;
use crate::core::remote::MistralClient;
use crate::core::{narrative, reconcile::reconcile};
use crate::domain::model::{InterpretationResult, Source, Spread, SpreadRequest};
use crate::domain::ports::{InterpretationClient, RemoteCallOutcome};
use crate::utils::error::Result;

/// Request orchestrator: validation, one remote attempt, then reconcile or fall back.
pub struct InterpretationService<C: InterpretationClient> {
    client: C,
}

impl<C: InterpretationClient> InterpretationService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Handles a raw request body.
    ///
    /// Only invalid input is reported as an error; remote failures are
    /// absorbed by the local narrative.
    pub async fn handle(&self, body: &serde_json::Value) -> Result<InterpretationResult> {
        let spread = SpreadRequest::from_value(body)?.into_spread()?;
        Ok(self.interpret(&spread).await)
    }

    pub async fn interpret(&self, spread: &Spread) -> InterpretationResult {
        tracing::debug!(
            "Interpreting spread {} / {} / {}",
            spread.past.name,
            spread.present.name,
            spread.future.name
        );

        let result = match self.client.request_interpretation(spread).await {
            RemoteCallOutcome::Success(raw) => reconcile(&raw, spread),
            RemoteCallOutcome::TransportFailure { status, detail } => {
                tracing::warn!(
                    status = ?status,
                    "❌ Remote interpretation failed, using local narrative: {}",
                    detail
                );
                local(spread)
            }
            RemoteCallOutcome::MalformedPayload(detail) => {
                tracing::warn!(
                    "❌ Remote interpretation payload malformed, using local narrative: {}",
                    detail
                );
                local(spread)
            }
        };

        tracing::info!(source = ?result.source, "✅ Interpretation ready");
        result
    }
}

impl InterpretationService<MistralClient<RemoteConfig>> {
    pub fn from_config(config: RemoteConfig) -> Result<Self> {
        Ok(Self::new(MistralClient::new(config)?))
    }
}

fn local(spread: &Spread) -> InterpretationResult {
    InterpretationResult {
        html: narrative::generate(spread),
        source: Source::Local,
    }
}
