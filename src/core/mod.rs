//! Core data structures for the repository event core: the quad-addressable
//! dataset and the fixed set of named graphs partitioning it.

use oxigraph::model::{GraphName, NamedNode};

use crate::vocab::{ldp, trellis};

pub mod dataset;
pub mod util;

pub use dataset::Dataset;

/// The named graphs a resource dataset is partitioned into.
///
/// Every quad the core tracks lives in one of these graphs; quads in any
/// other graph are ignored by the baseline diff but still travel with the
/// dataset when it is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagedGraph {
    /// Caller-asserted triples.
    UserManaged,
    /// System-maintained triples: type, modification time, container relations.
    ServerManaged,
    /// Event provenance: records whether a change is a Create or a Delete.
    Audit,
    /// Parent-contains-child triples mirrored into the dataset during emission.
    Containment,
}

impl ManagedGraph {
    /// The graph name IRI for this partition.
    pub fn named_node(&self) -> NamedNode {
        match self {
            ManagedGraph::UserManaged => trellis::prefer_user_managed(),
            ManagedGraph::ServerManaged => trellis::prefer_server_managed(),
            ManagedGraph::Audit => trellis::prefer_audit(),
            ManagedGraph::Containment => ldp::prefer_containment(),
        }
    }

    /// The graph name for this partition, for use in quads.
    pub fn graph_name(&self) -> GraphName {
        GraphName::NamedNode(self.named_node())
    }

    /// Map a quad's graph name back to a managed partition, if it is one.
    pub fn of(graph: &GraphName) -> Option<ManagedGraph> {
        let GraphName::NamedNode(node) = graph else {
            return None;
        };
        let iri = node.as_str();
        if iri == trellis::prefer_user_managed().as_str() {
            Some(ManagedGraph::UserManaged)
        } else if iri == trellis::prefer_server_managed().as_str() {
            Some(ManagedGraph::ServerManaged)
        } else if iri == trellis::prefer_audit().as_str() {
            Some(ManagedGraph::Audit)
        } else if iri == ldp::prefer_containment().as_str() {
            Some(ManagedGraph::Containment)
        } else {
            None
        }
    }
}
