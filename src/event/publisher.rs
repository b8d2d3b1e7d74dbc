//! The publisher seam between the event producer and the broker client.
//!
//! `enqueue` hands a record to the broker client immediately and returns a
//! future resolving once the broker acknowledges (or rejects) it, so a
//! caller can enqueue several records and then await the acknowledgments in
//! enqueue order.

use std::fmt;

use futures_util::future::{ready, BoxFuture};
use rdkafka::producer::{Delivery as BrokerDelivery, FutureProducer, FutureRecord};

use crate::codec::{BincodeMessageCodec, CodecError, Message, MessageCodec};
use crate::config::ProducerConfig;

/// Broker acknowledgment: the partition and offset the record landed at.
pub type Delivery = (i32, i64);

fn ack(delivery: BrokerDelivery) -> Delivery {
    (delivery.partition, delivery.offset)
}

/// A pending acknowledgment for one enqueued record.
pub type DeliveryFuture = BoxFuture<'static, Result<Delivery, PublishError>>;

/// Errors surfaced by the publisher seam.
#[derive(Debug)]
pub enum PublishError {
    /// The broker client rejected or failed the record.
    Broker(String),
    /// The message envelope could not be encoded for the wire.
    Codec(CodecError),
    /// The in-flight acknowledgment was dropped before resolving.
    Interrupted,
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishError::Broker(msg) => write!(f, "Broker error: {}", msg),
            PublishError::Codec(err) => write!(f, "Codec error: {}", err),
            PublishError::Interrupted => write!(f, "Delivery interrupted before acknowledgment"),
        }
    }
}

impl std::error::Error for PublishError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PublishError::Codec(err) => Some(err),
            _ => None,
        }
    }
}

/// A sink for keyed message envelopes bound for named topics.
pub trait MessagePublisher: Send + Sync {
    /// Enqueue one record and return its pending acknowledgment.
    fn enqueue(&self, topic: &str, key: &str, message: &Message) -> DeliveryFuture;
}

/// The Kafka-backed publisher used in production.
pub struct KafkaMessagePublisher {
    producer: FutureProducer,
    codec: BincodeMessageCodec,
}

impl KafkaMessagePublisher {
    pub fn new(config: &ProducerConfig) -> Result<Self, PublishError> {
        let producer: FutureProducer = config
            .client_config()
            .create()
            .map_err(|err| PublishError::Broker(err.to_string()))?;
        Ok(Self { producer, codec: BincodeMessageCodec::new() })
    }
}

impl MessagePublisher for KafkaMessagePublisher {
    fn enqueue(&self, topic: &str, key: &str, message: &Message) -> DeliveryFuture {
        let payload = match self.codec.encode(message) {
            Ok(payload) => payload,
            Err(err) => return Box::pin(ready(Err(PublishError::Codec(err)))),
        };
        let record = FutureRecord::to(topic).key(key).payload(&payload);
        match self.producer.send_result(record) {
            Ok(delivery) => Box::pin(async move {
                match delivery.await {
                    Ok(Ok(delivery)) => Ok(ack(delivery)),
                    Ok(Err((err, _))) => Err(PublishError::Broker(err.to_string())),
                    Err(_) => Err(PublishError::Interrupted),
                }
            }),
            Err((err, _)) => Box::pin(ready(Err(PublishError::Broker(err.to_string())))),
        }
    }
}
