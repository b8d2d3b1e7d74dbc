//! # Portunus
//!
//! Portunus is the event-sourcing and cache-consistency core of a
//! distributed, Linked-Data-Platform-style resource repository.
//!
//! The name is borrowed from the Roman deity Portunus, the keeper of keys,
//! doors and harbors: every change to a resource passes through this crate
//! on its way out, and every worker that maintains a derived view receives
//! it through the same gate.
//!
//! When a resource's RDF graph state is mutated, the core:
//!
//! - computes the minimal semantic change between the prior and new state,
//! - derives the consistency effects on the resource's parent container
//!   (containment and membership relations),
//! - publishes the resulting change events, in a defined relative order,
//!   onto a partitioned commit-log broker, and
//! - lets independent workers consume those events with cooperative,
//!   race-free shutdown.
//!
//! Containment and membership messages are keyed by the *parent* container
//! IRI, so a single downstream consumer can maintain one container's full
//! derived view partition-locally, without cross-partition coordination.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use oxigraph::model::NamedNode;
//! use portunus::config::ProducerConfig;
//! use portunus::core::Dataset;
//! use portunus::event::{EventProducer, KafkaMessagePublisher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let publisher = Arc::new(KafkaMessagePublisher::new(&ProducerConfig::from_env())?);
//! let identifier = NamedNode::new("http://example.org/container/resource")?;
//! let mut producer = EventProducer::new(publisher, identifier, Dataset::new(), false);
//! producer.seed(Vec::new());
//! // ... apply the mutation through producer.dataset_mut() ...
//! let delivered = producer.emit().await;
//! # let _ = delivered;
//! # Ok(())
//! # }
//! ```

/// RDF vocabulary terms used across the core.
pub mod vocab;

/// The quad-addressable dataset model and named-graph partitions.
pub mod core;

/// Broker client configuration.
pub mod config;

/// The message envelope and its byte-level codec.
pub mod codec;

/// The diff/emit protocol and the publisher seam.
pub mod event;

/// Partition-assigned consumption with cooperative shutdown.
pub mod consumer;

/// Derived summaries of resource metadata.
pub mod projection;

pub use codec::{BincodeMessageCodec, CodecError, Message, MessageCodec};
pub use consumer::{
    ConsumerError, ConsumerRecord, ConsumerRunner, KafkaRecordStream, RecordHandler, RecordStream,
    RunnerState, ShutdownHandle, TopicPartition,
};
pub use crate::core::{Dataset, ManagedGraph};
pub use event::{EventProducer, KafkaMessagePublisher, MessagePublisher, PublishError};
pub use projection::ResourceData;
