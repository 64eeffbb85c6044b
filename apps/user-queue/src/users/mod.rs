pub mod drainer;
pub mod generator;
pub mod producer;
pub mod record;

pub use drainer::{drain_users, read, ReadError};
pub use generator::{generate, GenerationError};
pub use producer::{publish_user, write, WriteError};
pub use record::{SerializationError, User};
