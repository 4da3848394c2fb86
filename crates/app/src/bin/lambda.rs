//! Voxthread skill - AWS Lambda Runtime
//!
//! The platform invokes the function directly with the request envelope as
//! the event payload and expects the response envelope back.

use lambda_http::lambda_runtime::{self, service_fn, Error, LambdaEvent};
use tracing::info;

use voxthread_app::{build_state, handle_envelope};
use voxthread_common::Config;
use voxthread_sessions::{RequestEnvelope, ResponseEnvelope};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .without_time()
        .init();

    info!("Initializing Voxthread skill Lambda");

    let config =
        Config::from_env().map_err(|e| Error::from(format!("Configuration error: {}", e)))?;

    let state = build_state(&config)
        .await
        .map_err(|e| Error::from(format!("App initialization error: {}", e)))?;

    info!("Voxthread skill Lambda ready to serve requests");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<RequestEnvelope>| {
        let state = state.clone();
        async move {
            let response: ResponseEnvelope = handle_envelope(&state, event.payload).await?;
            Ok::<_, Error>(response)
        }
    }))
    .await
}
