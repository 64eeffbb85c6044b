use lapin::{Channel, Connection};
use tracing::{error, info, warn};

pub struct ChannelProvider;

impl ChannelProvider {

    pub async fn create_channel(connection: &Connection) -> Result<Channel, ChannelError> {
        info!("Creating RabbitMQ channel");

        let channel = connection
            .create_channel()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to create RabbitMQ channel");
                ChannelError::CreationFailed(e.to_string())
            })?;

        info!(channel_id = channel.id(), "Channel created successfully");

        Ok(channel)
    }

    /// Closes a channel whose operation has already produced its result.
    /// The broker closes a channel itself after a failed declare, so a close
    /// error here is expected on some failure paths and is only logged.
    pub async fn release(channel: Channel) {
        let channel_id = channel.id();

        match channel.close(200, "Normal shutdown").await {
            Ok(()) => info!(channel_id, "Channel released"),
            Err(e) => warn!(error = %e, channel_id, "Ignoring channel close failure"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Failed to create channel: {0}")]
    CreationFailed(String),

    #[error("Failed to declare queue {queue}: {reason}")]
    DeclareFailed { queue: String, reason: String },
}
