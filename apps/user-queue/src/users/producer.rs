use tracing::info;

use super::generator::{
    generate, GenerationError, IDENTIFIER_LENGTH, PASSWORD_ALPHABET, USERNAME_ALPHABET,
};
use super::record::{SerializationError, User};
use crate::messaging::{
    ChannelError, ChannelProvider, ConnectionError, ConnectorConfig, PublishError,
    RabbitMqConnection, UserQueue,
};

/// Generates a random user and encodes it as a queue message.
pub fn new_user_message() -> Result<(User, Vec<u8>), WriteError> {
    let username = generate(IDENTIFIER_LENGTH, USERNAME_ALPHABET)?;
    let password = generate(IDENTIFIER_LENGTH, PASSWORD_ALPHABET)?;
    let user = User::new(username, password);
    let body = user.to_message()?;
    Ok((user, body))
}

async fn publish_message<Q>(
    queue: &Q,
    queue_name: &str,
    user: &User,
    body: &[u8],
) -> Result<(), WriteError>
where
    Q: UserQueue + ?Sized,
{
    queue.declare(queue_name).await?;
    queue.publish(queue_name, body).await?;

    info!(
        queue = queue_name,
        username = %user.username,
        payload_size = body.len(),
        "Published user"
    );
    Ok(())
}

/// Generates a random user and publishes it to `queue_name`.
pub async fn publish_user<Q>(queue: &Q, queue_name: &str) -> Result<User, WriteError>
where
    Q: UserQueue + ?Sized,
{
    let (user, body) = new_user_message()?;
    publish_message(queue, queue_name, &user, &body).await?;
    Ok(user)
}

/// Opens a connection, generates one random user, then opens a channel and
/// publishes it. Connection and channel are closed on every path.
pub async fn write(connector: &ConnectorConfig, queue_name: &str) -> Result<User, WriteError> {
    let connection = RabbitMqConnection::connect(connector).await?;

    let result = match new_user_message() {
        Ok((user, body)) => {
            match ChannelProvider::create_channel(connection.get_connection()).await {
                Ok(channel) => {
                    let published = publish_message(&channel, queue_name, &user, &body).await;
                    ChannelProvider::release(channel).await;
                    published.map(|()| user)
                }
                Err(e) => Err(e.into()),
            }
        }
        Err(e) => Err(e),
    };

    connection.release().await;
    result
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl WriteError {
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection",
            Self::Generation(_) => "generation",
            Self::Serialization(_) => "serialization",
            Self::Channel(_) => "channel",
            Self::Publish(_) => "publish",
        }
    }
}
