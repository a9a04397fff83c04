//! Lambda entry point for the NAT failover reactor
//!
//! Wired to the EventBridge rule for EC2 instance state-change
//! notifications. The EC2 client and the reactor are built once at cold
//! start and shared across invocations.

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use natfailover_core::{FailoverResponse, NatFailoverReactor, ReactorConfig, StateChangeEvent};
use natfailover_ec2::Ec2NetworkProvider;
use tracing_subscriber::EnvFilter;

async fn handle(
    reactor: &NatFailoverReactor<Ec2NetworkProvider>,
    event: LambdaEvent<StateChangeEvent>,
) -> Result<FailoverResponse, Error> {
    let detail = &event.payload.detail;
    tracing::info!(
        "Received state change: instance {} entered {}",
        detail.instance_id,
        detail.state
    );
    Ok(reactor.handle(&event.payload).await?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // CloudWatch adds its own timestamps, so the subscriber omits them.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .with_target(false)
        .without_time()
        .init();

    let provider = Ec2NetworkProvider::from_env().await;
    let reactor = NatFailoverReactor::with_config(provider, ReactorConfig::from_env());
    let reactor_ref = &reactor;
    run(service_fn(move |event| async move {
        handle(reactor_ref, event).await
    }))
    .await
}
