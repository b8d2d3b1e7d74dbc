//! The diff/emit protocol translating one resource mutation into an ordered
//! set of broker publications.
//!
//! A producer is built per mutation: seed it with the baseline quads, apply
//! the mutation to the dataset, then call [`EventProducer::emit`]. Baselines
//! are seeded exactly once; the diff accessors are only meaningful relative
//! to that one baseline.

use std::collections::HashSet;
use std::sync::Arc;

use oxigraph::model::{NamedNode, Quad, Term};
use oxigraph::model::vocab::rdf;
use tracing::{debug, error};

use crate::codec::Message;
use crate::core::util::{parent_of, serialize};
use crate::core::{Dataset, ManagedGraph};
use crate::event::publisher::{DeliveryFuture, MessagePublisher};
use crate::event::{
    TOPIC_CACHE, TOPIC_LDP_CONTAINMENT_ADD, TOPIC_LDP_CONTAINMENT_DELETE,
    TOPIC_LDP_MEMBERSHIP_ADD, TOPIC_LDP_MEMBERSHIP_DELETE,
};
use crate::vocab::{activity_streams, dc, ldp};

/// Translates a resource mutation into ordered broker publications with
/// containment and membership consistency for the parent container.
pub struct EventProducer<P: MessagePublisher> {
    publisher: Arc<P>,
    identifier: NamedNode,
    dataset: Dataset,
    existing: HashSet<Quad>,
    cache_async: bool,
}

impl<P: MessagePublisher> EventProducer<P> {
    /// Create a producer for one mutation of `identifier`.
    ///
    /// `dataset` is the mutated (post-change) state, or the state about to be
    /// mutated through [`EventProducer::dataset_mut`]. When `cache_async` is
    /// set, `emit` also publishes the serialized dataset to the
    /// cache-invalidation topic.
    pub fn new(publisher: Arc<P>, identifier: NamedNode, dataset: Dataset, cache_async: bool) -> Self {
        Self { publisher, identifier, dataset, existing: HashSet::new(), cache_async }
    }

    /// Absorb the baseline (pre-mutation) quads.
    ///
    /// Only quads in the user-managed and server-managed graphs are kept.
    /// Calling this more than once accumulates; callers seed exactly once
    /// per producer instance.
    pub fn seed<I: IntoIterator<Item = Quad>>(&mut self, quads: I) {
        for quad in quads {
            match ManagedGraph::of(&quad.graph_name) {
                Some(ManagedGraph::UserManaged | ManagedGraph::ServerManaged) => {
                    self.existing.insert(quad);
                }
                _ => {}
            }
        }
    }

    /// Quads present in the current dataset but absent from the baseline.
    ///
    /// The dataset side is not graph-filtered: provenance and containment
    /// quads introduced during emission also count as added.
    pub fn added(&self) -> impl Iterator<Item = &Quad> {
        self.dataset.quads().filter(|quad| !self.existing.contains(quad))
    }

    /// Quads present in the baseline but absent from the current dataset,
    /// excluding the server-managed modification timestamp: replacing a
    /// timestamp always yields a remove+add pair that is not a meaningful
    /// removal to the caller.
    pub fn removed(&self) -> impl Iterator<Item = &Quad> {
        let server_managed = ManagedGraph::ServerManaged.graph_name();
        let modified = dc::modified();
        self.existing
            .iter()
            .filter(|quad| !self.dataset.contains(quad))
            .filter(move |quad| {
                quad.graph_name != server_managed || quad.predicate != modified
            })
    }

    pub fn identifier(&self) -> &NamedNode {
        &self.identifier
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Mutable access to the current dataset, for applying the mutation
    /// after the baseline has been seeded.
    pub fn dataset_mut(&mut self) -> &mut Dataset {
        &mut self.dataset
    }

    /// Emit messages to the relevant broker topics.
    ///
    /// Classifies the operation from the audit graph, serializes the dataset
    /// once, enqueues the cache publish (if configured) keyed by the resource
    /// IRI, then the containment and membership publishes keyed by the parent
    /// IRI, and awaits every acknowledgment in enqueue order. Root resources
    /// produce no containment or membership events.
    ///
    /// Returns true only if every publication was acknowledged. On failure
    /// the error is logged and false returned; retry is the caller's
    /// responsibility.
    pub async fn emit(&mut self) -> bool {
        let audit = ManagedGraph::Audit.graph_name();
        let rdf_type = rdf::TYPE.into_owned();
        let create: Term = activity_streams::create().into();
        let delete: Term = activity_streams::delete().into();
        let is_create =
            self.dataset.contains_match(None, Some(&rdf_type), Some(&create), Some(&audit));
        let is_delete =
            self.dataset.contains_match(None, Some(&rdf_type), Some(&delete), Some(&audit));

        let message = match serialize(&self.dataset) {
            Ok(serialized) => Message::new(self.identifier.as_str(), serialized),
            Err(err) => {
                error!("Unable to serialize dataset for {}: {}", self.identifier, err);
                return false;
            }
        };

        let mut deliveries: Vec<(&str, DeliveryFuture)> = Vec::new();

        if self.cache_async {
            deliveries.push((
                TOPIC_CACHE,
                self.publisher.enqueue(TOPIC_CACHE, self.identifier.as_str(), &message),
            ));
        }

        // Update the containment triples of the parent resource if this is a
        // delete or create operation.
        if let Some(container) = parent_of(self.identifier.as_str()) {
            if is_delete {
                self.link_containment(&container);
                deliveries.push((
                    TOPIC_LDP_CONTAINMENT_DELETE,
                    self.publisher.enqueue(TOPIC_LDP_CONTAINMENT_DELETE, &container, &message),
                ));
                deliveries.push((
                    TOPIC_LDP_MEMBERSHIP_DELETE,
                    self.publisher.enqueue(TOPIC_LDP_MEMBERSHIP_DELETE, &container, &message),
                ));
            } else if is_create {
                self.link_containment(&container);
                deliveries.push((
                    TOPIC_LDP_CONTAINMENT_ADD,
                    self.publisher.enqueue(TOPIC_LDP_CONTAINMENT_ADD, &container, &message),
                ));
                deliveries.push((
                    TOPIC_LDP_MEMBERSHIP_ADD,
                    self.publisher.enqueue(TOPIC_LDP_MEMBERSHIP_ADD, &container, &message),
                ));
            }
        }

        for (topic, delivery) in deliveries {
            match delivery.await {
                Ok((partition, offset)) => {
                    debug!("Record delivered to {} partition {} at offset {}", topic, partition, offset);
                }
                Err(err) => {
                    error!("Error sending record to topic {}: {}", topic, err);
                    return false;
                }
            }
        }

        true
    }

    fn link_containment(&mut self, container: &str) {
        self.dataset.insert(Quad::new(
            NamedNode::new_unchecked(container),
            ldp::contains(),
            self.identifier.clone(),
            ManagedGraph::Containment.graph_name(),
        ));
    }
}
