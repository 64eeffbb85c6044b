pub mod channel;
pub mod connection;
pub mod queue;

#[cfg(test)]
pub(crate) mod memory;

pub use channel::{ChannelError, ChannelProvider};
pub use connection::{ConnectionError, ConnectorConfig, RabbitMqConnection};
pub use queue::{FetchError, PublishError, UserQueue};
