//! Change-event publication: the producer-side diff/emit protocol and the
//! broker publisher seam it runs against.

pub mod producer;
pub mod publisher;

pub use producer::EventProducer;
pub use publisher::{DeliveryFuture, KafkaMessagePublisher, MessagePublisher, PublishError};

/// Topic carrying full dataset snapshots for cache invalidation, keyed by
/// the resource IRI.
pub const TOPIC_CACHE: &str = "trellis.cache";

/// Containment topics, keyed by the parent container IRI.
pub const TOPIC_LDP_CONTAINMENT_ADD: &str = "trellis.ldpcontainment.add";
pub const TOPIC_LDP_CONTAINMENT_DELETE: &str = "trellis.ldpcontainment.delete";

/// Membership topics, keyed by the parent container IRI.
pub const TOPIC_LDP_MEMBERSHIP_ADD: &str = "trellis.ldpmembership.add";
pub const TOPIC_LDP_MEMBERSHIP_DELETE: &str = "trellis.ldpmembership.delete";
