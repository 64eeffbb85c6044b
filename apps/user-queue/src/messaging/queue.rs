use async_trait::async_trait;
use lapin::{options::*, types::FieldTable, BasicProperties, Channel};
use tracing::{debug, error, info};

use super::channel::ChannelError;

const CONTENT_TYPE: &str = "text/plain";

/// The broker primitives the producer and the drainer are built from.
#[async_trait]
pub trait UserQueue: Send + Sync {
    /// Idempotently makes sure `queue` exists.
    async fn declare(&self, queue: &str) -> Result<(), ChannelError>;

    /// Publishes one message to `queue` through the default exchange.
    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<(), PublishError>;

    /// Takes the next message off `queue` without blocking, removing it from
    /// the broker immediately. `None` means the queue is empty.
    async fn fetch(&self, queue: &str) -> Result<Option<Vec<u8>>, FetchError>;
}

/// Non-durable, non-exclusive, kept when unused. Producer and drainer must
/// agree on these or the second declare fails with PRECONDITION_FAILED.
pub fn declare_options() -> QueueDeclareOptions {
    QueueDeclareOptions {
        passive: false,
        durable: false,
        exclusive: false,
        auto_delete: false,
        nowait: false,
    }
}

#[async_trait]
impl UserQueue for Channel {
    async fn declare(&self, queue: &str) -> Result<(), ChannelError> {
        let declared = self
            .queue_declare(queue, declare_options(), FieldTable::default())
            .await
            .map_err(|e| {
                error!(error = %e, queue, "Failed to declare queue");
                ChannelError::DeclareFailed {
                    queue: queue.to_string(),
                    reason: e.to_string(),
                }
            })?;

        info!(
            queue,
            message_count = declared.message_count(),
            consumer_count = declared.consumer_count(),
            "Queue declared"
        );
        Ok(())
    }

    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<(), PublishError> {
        let properties = BasicProperties::default().with_content_type(CONTENT_TYPE.into());

        self.basic_publish(
            "",
            queue,
            BasicPublishOptions::default(),
            payload,
            properties,
        )
        .await
        .map_err(|e| {
            error!(error = %e, queue, "Failed to publish message");
            PublishError::new(queue, e)
        })?
        .await
        .map_err(|e| {
            error!(error = %e, queue, "Publish was not accepted by the channel");
            PublishError::new(queue, e)
        })?;

        debug!(queue, payload_size = payload.len(), "Message published");
        Ok(())
    }

    async fn fetch(&self, queue: &str) -> Result<Option<Vec<u8>>, FetchError> {
        let message = self
            .basic_get(queue, BasicGetOptions { no_ack: true })
            .await
            .map_err(|e| {
                error!(error = %e, queue, "Failed to get message from RabbitMQ");
                FetchError::new(queue, e)
            })?;

        Ok(message.map(|message| {
            debug!(
                queue,
                delivery_tag = message.delivery.delivery_tag,
                remaining = message.message_count,
                "Fetched message"
            );
            message.delivery.data
        }))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to publish to queue {queue}: {reason}")]
pub struct PublishError {
    pub queue: String,
    pub reason: String,
}

impl PublishError {
    pub fn new(queue: &str, reason: impl ToString) -> Self {
        Self {
            queue: queue.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to fetch from queue {queue}: {reason}")]
pub struct FetchError {
    pub queue: String,
    pub reason: String,
}

impl FetchError {
    pub fn new(queue: &str, reason: impl ToString) -> Self {
        Self {
            queue: queue.to_string(),
            reason: reason.to_string(),
        }
    }
}
