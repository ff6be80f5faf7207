use std::error::Error;

use git_worker::config::GitWorkerConfig;
use review_core::messages::GitMessage;
use review_mq::MqClient;
use state_store::StateStore;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    dotenvy::dotenv()?;

    let config = GitWorkerConfig::from_env();

    let state = StateStore::connect(&config.redis_url).await?;
    let mq = MqClient::connect(&config.rabbitmq_url).await?;
    mq.declare_queue(&config.git_queue).await?;
    mq.declare_queue(&config.orchestrator_queue).await?;

    let mut messages = mq
        .consume::<GitMessage>(&config.git_queue, "git-worker")
        .await?;

    while let Some(msg) = messages.next().await? {
        match git_worker::dispatch(&state, &mq, &config, &msg.payload).await {
            Ok(()) => msg.ack().await?,
            Err(err) => {
                error!(%err, "failed to process git message");
                msg.nack().await?;
            }
        }
    }

    Ok(())
}
