use std::error::Error;

use orchestrator::config::OrchestratorConfig;
use review_core::messages::OrchestratorMessage;
use review_mq::MqClient;
use state_store::StateStore;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    dotenvy::dotenv()?;

    let config = OrchestratorConfig::from_env()?;

    let state = StateStore::connect(&config.redis_url).await?;
    let mq = MqClient::connect(&config.rabbitmq_url).await?;
    mq.declare_queue(&config.orchestrator_queue).await?;
    mq.declare_queue(&config.llm_queue).await?;

    let mut messages = mq
        .consume::<OrchestratorMessage>(&config.orchestrator_queue, "orchestrator-worker")
        .await?;

    while let Some(msg) = messages.next().await? {
        match orchestrator::dispatch(&state, &mq, &config, &msg.payload).await {
            Ok(()) => msg.ack().await?,
            Err(err) => {
                error!(%err, "failed to process orchestrator message");
                msg.nack().await?;
            }
        }
    }

    Ok(())
}
