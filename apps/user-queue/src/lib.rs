//! Publishes random user records to a RabbitMQ queue and drains them back.
//!
//! [`write`] generates one user and publishes it; [`read`] takes every pending
//! message off the queue. Each call opens and closes its own connection.

pub mod api;
pub mod config;
pub mod messaging;
pub mod metrics;
pub mod users;

pub use messaging::{ConnectionError, ConnectorConfig, UserQueue};
pub use users::{drain_users, generate, publish_user, read, write, ReadError, User, WriteError};
