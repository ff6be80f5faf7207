use std::error::Error;

use ai_llm_service::chat::ChatBackend;
use llm_worker::config::LlmWorkerConfig;
use review_core::messages::LlmMessage;
use review_mq::MqClient;
use state_store::StateStore;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(ai_llm_service::telemetry::layer())
        .init();
    dotenvy::dotenv()?;

    let config = LlmWorkerConfig::from_env();
    let backend = ChatBackend::from_env()?;

    let state = StateStore::connect(&config.redis_url).await?;
    let mq = MqClient::connect(&config.rabbitmq_url).await?;
    mq.declare_queue(&config.llm_queue).await?;
    mq.declare_queue(&config.git_queue).await?;

    let mut messages = mq
        .consume::<LlmMessage>(&config.llm_queue, "llm-worker")
        .await?;

    while let Some(msg) = messages.next().await? {
        match llm_worker::dispatch(&state, &mq, &backend, &config, &msg.payload.chunk_id).await {
            Ok(()) => msg.ack().await?,
            Err(err) => {
                error!(%err, "failed to process llm message");
                msg.nack().await?;
            }
        }
    }

    Ok(())
}
