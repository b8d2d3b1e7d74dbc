//! Partition-assigned consumption with cooperative, race-free shutdown.
//!
//! A [`ConsumerRunner`] owns a statically assigned set of topic-partitions
//! through a [`RecordStream`], repeatedly polls it for batches, and hands
//! each non-empty batch to the injected [`RecordHandler`]. Shutdown is
//! requested from another thread through a [`ShutdownHandle`].

use std::fmt;
use std::time::Duration;

use crate::codec::{CodecError, Message};

pub mod kafka;
pub mod runner;

pub use kafka::KafkaRecordStream;
pub use runner::{ConsumerRunner, RunnerState, ShutdownHandle};

/// One statically assigned topic-partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicPartition {
    pub topic: String,
    pub partition: i32,
}

impl TopicPartition {
    pub fn new(topic: impl Into<String>, partition: i32) -> Self {
        Self { topic: topic.into(), partition }
    }
}

/// One decoded record received from the broker.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumerRecord {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub key: Option<String>,
    pub message: Message,
}

/// Errors surfaced by the consumption loop.
#[derive(Debug)]
pub enum ConsumerError {
    /// The blocking poll was interrupted by [`RecordStream::wake`].
    Wakeup,
    /// The broker client failed.
    Broker(String),
    /// A record payload could not be decoded into a [`Message`].
    Decode(CodecError),
}

impl fmt::Display for ConsumerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsumerError::Wakeup => write!(f, "Poll interrupted by wakeup"),
            ConsumerError::Broker(msg) => write!(f, "Broker error: {}", msg),
            ConsumerError::Decode(err) => write!(f, "Record decode error: {}", err),
        }
    }
}

impl std::error::Error for ConsumerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConsumerError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

/// The batch handler a consumer use-case plugs into the runner.
///
/// Redelivery after a crash before offset commit is possible, so handlers
/// must apply their effects idempotently.
pub trait RecordHandler: Send {
    fn handle_records(&mut self, records: Vec<ConsumerRecord>);
}

impl<F> RecordHandler for F
where
    F: FnMut(Vec<ConsumerRecord>) + Send,
{
    fn handle_records(&mut self, records: Vec<ConsumerRecord>) {
        self(records);
    }
}

/// A blocking source of record batches over an assigned partition set.
///
/// `poll` blocks up to `timeout` waiting for records and returns
/// `Err(ConsumerError::Wakeup)` once `wake` has been called. `close`
/// releases the broker connection; the stream must not be polled afterwards.
pub trait RecordStream: Send + Sync {
    fn poll(&self, timeout: Duration) -> Result<Vec<ConsumerRecord>, ConsumerError>;

    fn wake(&self);

    fn close(&self);
}
