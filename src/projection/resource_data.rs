//! A flat, nullable-field summary of a resource's metadata, computed fresh
//! from a dataset snapshot and never mutated in place.

use chrono::{DateTime, Utc};
use oxigraph::model::vocab::rdf;
use oxigraph::model::{NamedNode, Term};
use serde::{Deserialize, Serialize};

use crate::core::{Dataset, ManagedGraph};
use crate::vocab::{dc, ldp, oa};

/// The JSON-LD context the summary serializes under.
pub const CONTEXT: &str = "http://www.trellisldp.org/ns/trellisresource.jsonld";

/// Descriptor of a resource's binary attachment, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryData {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

/// A derived summary of one resource's metadata, keyed by its IRI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    pub ldp_type: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty", default)]
    pub user_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<BinaryData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbox: Option<String>,
    #[serde(rename = "annotationService", skip_serializing_if = "Option::is_none")]
    pub annotation_service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(rename = "membershipResource", skip_serializing_if = "Option::is_none")]
    pub membership_resource: Option<String>,
    #[serde(rename = "hasMemberRelation", skip_serializing_if = "Option::is_none")]
    pub has_member_relation: Option<String>,
    #[serde(rename = "isMemberOfRelation", skip_serializing_if = "Option::is_none")]
    pub is_member_of_relation: Option<String>,
    #[serde(rename = "insertedContentRelation", skip_serializing_if = "Option::is_none")]
    pub inserted_content_relation: Option<String>,
}

impl ResourceData {
    /// Project a summary from an identifier and a dataset snapshot.
    ///
    /// Reads the server-managed graph for the modification timestamp, the
    /// LDP type and the binary descriptor, and the user-managed graph for
    /// the additional types and the optional LDP relations (first match
    /// wins). Returns `None` when the dataset records no LDP type or no
    /// modification timestamp: such a dataset does not denote a
    /// materialized resource.
    pub fn from(identifier: &NamedNode, dataset: &Dataset) -> Option<ResourceData> {
        let server = ManagedGraph::ServerManaged.graph_name();
        let user = ManagedGraph::UserManaged.graph_name();
        let rdf_type = rdf::TYPE.into_owned();

        let modified = dataset
            .first_literal(&server, identifier, &dc::modified())
            .and_then(|value| parse_instant(&value));
        let ldp_type = dataset.first_iri(&server, identifier, &rdf_type);

        let binary = dataset
            .first_object(&server, identifier, &dc::has_part())
            .and_then(|term| match term {
                Term::NamedNode(node) => Some(node.clone()),
                _ => None,
            })
            .map(|binary_id| BinaryData {
                modified: dataset
                    .first_literal(&server, &binary_id, &dc::modified())
                    .and_then(|value| parse_instant(&value)),
                format: dataset.first_literal(&server, &binary_id, &dc::format()),
                size: dataset
                    .first_literal(&server, &binary_id, &dc::extent())
                    .and_then(|value| value.parse().ok()),
                id: binary_id.as_str().to_string(),
            });

        let data = ResourceData {
            context: CONTEXT.to_string(),
            id: identifier.as_str().to_string(),
            ldp_type,
            user_types: dataset.iris(&user, identifier, &rdf_type),
            binary,
            inbox: dataset.first_iri(&user, identifier, &ldp::inbox()),
            annotation_service: dataset.first_iri(&user, identifier, &oa::annotation_service()),
            modified,
            membership_resource: dataset.first_iri(&user, identifier, &ldp::membership_resource()),
            has_member_relation: dataset.first_iri(&user, identifier, &ldp::has_member_relation()),
            is_member_of_relation: dataset.first_iri(
                &user,
                identifier,
                &ldp::is_member_of_relation(),
            ),
            inserted_content_relation: dataset.first_iri(
                &user,
                identifier,
                &ldp::inserted_content_relation(),
            ),
        };

        if data.ldp_type.is_none() || data.modified.is_none() {
            return None;
        }
        Some(data)
    }
}

/// Parse an xsd:dateTime lexical form; malformed values are treated as
/// absent, not fatal.
fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value).ok().map(|instant| instant.with_timezone(&Utc))
}
