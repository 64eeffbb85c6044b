//! In-process stand-in for a broker queue, used by unit tests.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::channel::ChannelError;
use super::queue::{FetchError, PublishError, UserQueue};

#[derive(Default)]
pub struct MemoryQueue {
    queues: Mutex<HashMap<String, VecDeque<Vec<u8>>>>,
    declarations: Mutex<Vec<String>>,
    fail_declare: bool,
    fail_publish: bool,
    fail_fetch: bool,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_declare() -> Self {
        Self {
            fail_declare: true,
            ..Self::default()
        }
    }

    pub fn failing_publish() -> Self {
        Self {
            fail_publish: true,
            ..Self::default()
        }
    }

    pub fn failing_fetch() -> Self {
        Self {
            fail_fetch: true,
            ..Self::default()
        }
    }

    /// Puts a raw message on `queue`, declaring it if needed.
    pub fn inject(&self, queue: &str, payload: &[u8]) {
        self.queues
            .lock()
            .unwrap()
            .entry(queue.to_string())
            .or_default()
            .push_back(payload.to_vec());
    }

    pub fn pending(&self, queue: &str) -> usize {
        self.queues
            .lock()
            .unwrap()
            .get(queue)
            .map_or(0, VecDeque::len)
    }

    pub fn declarations(&self) -> Vec<String> {
        self.declarations.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserQueue for MemoryQueue {
    async fn declare(&self, queue: &str) -> Result<(), ChannelError> {
        if self.fail_declare {
            return Err(ChannelError::DeclareFailed {
                queue: queue.to_string(),
                reason: "ACCESS_REFUSED".to_string(),
            });
        }
        self.declarations.lock().unwrap().push(queue.to_string());
        self.queues
            .lock()
            .unwrap()
            .entry(queue.to_string())
            .or_default();
        Ok(())
    }

    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<(), PublishError> {
        if self.fail_publish {
            return Err(PublishError::new(queue, "channel closed"));
        }
        // The default exchange drops messages for queues that do not exist.
        if let Some(messages) = self.queues.lock().unwrap().get_mut(queue) {
            messages.push_back(payload.to_vec());
        }
        Ok(())
    }

    async fn fetch(&self, queue: &str) -> Result<Option<Vec<u8>>, FetchError> {
        if self.fail_fetch {
            return Err(FetchError::new(queue, "channel closed"));
        }
        match self.queues.lock().unwrap().get_mut(queue) {
            Some(messages) => Ok(messages.pop_front()),
            None => Err(FetchError::new(queue, "NOT_FOUND - no queue")),
        }
    }
}
