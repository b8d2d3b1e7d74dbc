//! Kafka-backed record stream with static partition assignment.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rdkafka::consumer::{BaseConsumer, Consumer};
use rdkafka::message::{BorrowedMessage, Message as KafkaMessage};
use rdkafka::TopicPartitionList;
use tracing::info;

use crate::codec::{BincodeMessageCodec, MessageCodec};
use crate::config::ConsumerConfig;
use crate::consumer::{ConsumerError, ConsumerRecord, RecordStream, TopicPartition};

/// Upper bound on the records drained from the broker in one poll.
const MAX_POLL_RECORDS: usize = 500;

/// A [`RecordStream`] over an assigned [`BaseConsumer`].
///
/// Partition ownership is fixed at construction; there is no consumer-group
/// rebalancing at runtime. Record payloads are decoded through the envelope
/// codec before being handed to the runner.
pub struct KafkaRecordStream {
    consumer: BaseConsumer,
    codec: BincodeMessageCodec,
    woken: AtomicBool,
}

impl KafkaRecordStream {
    /// Create a consumer and statically assign it the given partitions.
    pub fn assigned(
        config: &ConsumerConfig,
        partitions: &[TopicPartition],
    ) -> Result<Self, ConsumerError> {
        let consumer: BaseConsumer = config
            .client_config()
            .create()
            .map_err(|err| ConsumerError::Broker(err.to_string()))?;

        let mut assignment = TopicPartitionList::new();
        for tp in partitions {
            assignment.add_partition(&tp.topic, tp.partition);
        }
        consumer
            .assign(&assignment)
            .map_err(|err| ConsumerError::Broker(err.to_string()))?;
        info!("Assigned consumer to {} topic-partitions", partitions.len());

        Ok(Self { consumer, codec: BincodeMessageCodec::new(), woken: AtomicBool::new(false) })
    }

    fn to_record(&self, message: &BorrowedMessage<'_>) -> Result<ConsumerRecord, ConsumerError> {
        let payload = message.payload().unwrap_or_default();
        let decoded = self.codec.decode(payload).map_err(ConsumerError::Decode)?;
        let key = message.key().map(|key| String::from_utf8_lossy(key).into_owned());
        Ok(ConsumerRecord {
            topic: message.topic().to_string(),
            partition: message.partition(),
            offset: message.offset(),
            key,
            message: decoded,
        })
    }
}

impl RecordStream for KafkaRecordStream {
    fn poll(&self, timeout: Duration) -> Result<Vec<ConsumerRecord>, ConsumerError> {
        if self.woken.swap(false, Ordering::SeqCst) {
            return Err(ConsumerError::Wakeup);
        }

        let mut records = Vec::new();
        let mut next_timeout = timeout;
        while records.len() < MAX_POLL_RECORDS {
            match self.consumer.poll(next_timeout) {
                Some(Ok(message)) => {
                    records.push(self.to_record(&message)?);
                    // Drain whatever else is already buffered.
                    next_timeout = Duration::ZERO;
                }
                Some(Err(err)) => return Err(ConsumerError::Broker(err.to_string())),
                None => break,
            }
        }
        Ok(records)
    }

    /// Request interruption of the poll loop.
    ///
    /// The flag is observed at the next `poll` entry, not mid-call: a wake
    /// issued while a poll is blocking takes effect only once that poll's
    /// timeout elapses, so shutdown latency is bounded by the configured
    /// poll timeout (100ms by default).
    fn wake(&self) {
        self.woken.store(true, Ordering::SeqCst);
    }

    fn close(&self) {
        let _ = self.consumer.unassign();
    }
}
