use tracing::{debug, info};

use super::record::{SerializationError, User};
use crate::messaging::{
    ChannelError, ChannelProvider, ConnectionError, ConnectorConfig, FetchError,
    RabbitMqConnection, UserQueue,
};

/// Takes every pending message off `queue_name`, auto-acknowledged, and decodes
/// each into a [`User`]. Stops at the first empty fetch.
///
/// Any decode failure drops the users read so far. The messages behind them
/// are already gone from the broker.
///
/// The loop has no upper bound. If producers keep publishing while a drain
/// runs it keeps reading; what it returns in that case is not defined here.
pub async fn drain_users<Q>(queue: &Q, queue_name: &str) -> Result<Vec<User>, ReadError>
where
    Q: UserQueue + ?Sized,
{
    queue.declare(queue_name).await?;

    let mut users = Vec::new();
    while let Some(body) = queue.fetch(queue_name).await? {
        debug!(
            queue = queue_name,
            payload = %String::from_utf8_lossy(&body),
            "Received a message"
        );
        users.push(User::from_message(&body)?);
    }

    info!(queue = queue_name, count = users.len(), "Drained users");
    Ok(users)
}

/// Opens a connection and channel, drains `queue_name`, and closes both.
pub async fn read(connector: &ConnectorConfig, queue_name: &str) -> Result<Vec<User>, ReadError> {
    let connection = RabbitMqConnection::connect(connector).await?;

    let result = match ChannelProvider::create_channel(connection.get_connection()).await {
        Ok(channel) => {
            let result = drain_users(&channel, queue_name).await;
            ChannelProvider::release(channel).await;
            result
        }
        Err(e) => Err(e.into()),
    };

    connection.release().await;
    result
}

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

impl ReadError {
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection",
            Self::Channel(_) => "channel",
            Self::Fetch(_) => "fetch",
            Self::Serialization(_) => "serialization",
        }
    }
}
