use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use tarot_interpret::domain::model::{ErrorResponse, InterpretationResponse};
use tarot_interpret::utils::error::ErrorCategory;
use tarot_interpret::utils::{logger, validation::Validate};
use tarot_interpret::{InterpretationService, LambdaConfig, MistralClient, RemoteConfig};

type Service = InterpretationService<MistralClient<RemoteConfig>>;

/// The event payload is the request body; the reply is the response envelope.
async fn function_handler(service: Arc<Service>, event: LambdaEvent<Value>) -> Result<Value, Error> {
    tracing::info!("Starting interpretation function");

    match service.handle(&event.payload).await {
        Ok(result) => Ok(serde_json::to_value(InterpretationResponse::from(result))?),
        Err(e) => {
            let body = match e.category() {
                ErrorCategory::Input => ErrorResponse {
                    error: e.user_friendly_message(),
                    details: None,
                },
                ErrorCategory::Configuration | ErrorCategory::Internal => {
                    tracing::error!("❌ Unexpected fault while interpreting: {}", e);
                    ErrorResponse {
                        error: "Erreur lors de l'interprétation du tirage".to_string(),
                        details: Some(e.to_string()),
                    }
                }
            };
            Ok(serde_json::to_value(body)?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;

    let service = Arc::new(InterpretationService::from_config(config.remote)?);

    run(service_fn(move |event: LambdaEvent<Value>| {
        let service = Arc::clone(&service);
        async move { function_handler(service, event).await }
    }))
    .await
}
