//! ResourceData projection tests: the presence contract, the binary
//! descriptor, per-field parse tolerance, and the JSON shape.

use chrono::{DateTime, Utc};
use oxigraph::model::vocab::{rdf, xsd};
use oxigraph::model::{Literal, NamedNode, Quad, Term};
use portunus::core::{Dataset, ManagedGraph};
use portunus::projection::ResourceData;
use portunus::vocab::{dc, ldp, oa};

const RESOURCE: &str = "trellis:data/container/resource";
const BINARY: &str = "file:binaries/resource.bin";
const MODIFIED: &str = "2024-01-01T00:00:00Z";

fn iri(value: &str) -> NamedNode {
    NamedNode::new(value).unwrap()
}

fn server(subject: &str, predicate: NamedNode, object: impl Into<Term>) -> Quad {
    Quad::new(iri(subject), predicate, object, ManagedGraph::ServerManaged.graph_name())
}

fn user(subject: &str, predicate: NamedNode, object: impl Into<Term>) -> Quad {
    Quad::new(iri(subject), predicate, object, ManagedGraph::UserManaged.graph_name())
}

fn date_literal(value: &str) -> Literal {
    Literal::new_typed_literal(value, xsd::DATE_TIME)
}

fn materialized_dataset() -> Dataset {
    Dataset::from_quads([
        server(RESOURCE, rdf::TYPE.into_owned(), ldp::rdf_source()),
        server(RESOURCE, dc::modified(), date_literal(MODIFIED)),
    ])
}

#[test]
fn test_minimal_materialized_resource() {
    let data = ResourceData::from(&iri(RESOURCE), &materialized_dataset()).unwrap();

    assert_eq!(data.id, RESOURCE);
    assert_eq!(data.ldp_type.as_deref(), Some("http://www.w3.org/ns/ldp#RDFSource"));
    let expected: DateTime<Utc> = MODIFIED.parse().unwrap();
    assert_eq!(data.modified, Some(expected));
    assert!(data.binary.is_none());
    assert!(data.user_types.is_empty());
}

#[test]
fn test_absent_without_ldp_type() {
    let dataset = Dataset::from_quads([
        server(RESOURCE, dc::modified(), date_literal(MODIFIED)),
        user(RESOURCE, ldp::inbox(), iri("http://example.org/inbox")),
    ]);
    assert!(ResourceData::from(&iri(RESOURCE), &dataset).is_none());
}

#[test]
fn test_absent_without_modification_timestamp() {
    let dataset = Dataset::from_quads([server(RESOURCE, rdf::TYPE.into_owned(), ldp::rdf_source())]);
    assert!(ResourceData::from(&iri(RESOURCE), &dataset).is_none());
}

#[test]
fn test_absent_for_empty_dataset() {
    assert!(ResourceData::from(&iri(RESOURCE), &Dataset::new()).is_none());
}

#[test]
fn test_binary_descriptor_is_populated() {
    let mut dataset = materialized_dataset();
    dataset.insert(server(RESOURCE, dc::has_part(), iri(BINARY)));
    dataset.insert(server(BINARY, dc::modified(), date_literal("2024-01-02T12:30:00Z")));
    dataset.insert(server(BINARY, dc::format(), Literal::from("image/jpeg")));
    dataset.insert(server(BINARY, dc::extent(), Literal::from("12345")));

    let data = ResourceData::from(&iri(RESOURCE), &dataset).unwrap();
    let binary = data.binary.unwrap();
    assert_eq!(binary.id, BINARY);
    assert_eq!(binary.format.as_deref(), Some("image/jpeg"));
    assert_eq!(binary.size, Some(12345));
    let expected: DateTime<Utc> = "2024-01-02T12:30:00Z".parse().unwrap();
    assert_eq!(binary.modified, Some(expected));
}

#[test]
fn test_malformed_binary_fields_are_left_absent() {
    let mut dataset = materialized_dataset();
    dataset.insert(server(RESOURCE, dc::has_part(), iri(BINARY)));
    dataset.insert(server(BINARY, dc::modified(), Literal::from("not-a-date")));
    dataset.insert(server(BINARY, dc::extent(), Literal::from("not-a-number")));

    // The resource itself is still materialized; only the malformed binary
    // fields are dropped.
    let data = ResourceData::from(&iri(RESOURCE), &dataset).unwrap();
    let binary = data.binary.unwrap();
    assert_eq!(binary.id, BINARY);
    assert!(binary.modified.is_none());
    assert!(binary.size.is_none());
    assert!(binary.format.is_none());
}

#[test]
fn test_user_managed_relations() {
    let mut dataset = materialized_dataset();
    dataset.insert(user(RESOURCE, rdf::TYPE.into_owned(), iri("http://example.org/Thing")));
    dataset.insert(user(RESOURCE, ldp::inbox(), iri("http://example.org/inbox")));
    dataset.insert(user(
        RESOURCE,
        ldp::membership_resource(),
        iri("http://example.org/members"),
    ));
    dataset.insert(user(RESOURCE, ldp::has_member_relation(), iri("http://example.org/member")));
    dataset.insert(user(
        RESOURCE,
        oa::annotation_service(),
        iri("http://example.org/annotations"),
    ));

    let data = ResourceData::from(&iri(RESOURCE), &dataset).unwrap();
    assert_eq!(data.user_types, vec!["http://example.org/Thing".to_string()]);
    assert_eq!(data.inbox.as_deref(), Some("http://example.org/inbox"));
    assert_eq!(data.membership_resource.as_deref(), Some("http://example.org/members"));
    assert_eq!(data.has_member_relation.as_deref(), Some("http://example.org/member"));
    assert_eq!(data.annotation_service.as_deref(), Some("http://example.org/annotations"));
    assert!(data.is_member_of_relation.is_none());
    assert!(data.inserted_content_relation.is_none());
}

#[test]
fn test_relations_in_wrong_graph_are_ignored() {
    let mut dataset = materialized_dataset();
    // Inbox asserted in the server-managed graph is not a user relation.
    dataset.insert(server(RESOURCE, ldp::inbox(), iri("http://example.org/inbox")));

    let data = ResourceData::from(&iri(RESOURCE), &dataset).unwrap();
    assert!(data.inbox.is_none());
}

#[test]
fn test_json_shape_uses_jsonld_keys() {
    let mut dataset = materialized_dataset();
    dataset.insert(user(RESOURCE, ldp::membership_resource(), iri("http://example.org/members")));

    let data = ResourceData::from(&iri(RESOURCE), &dataset).unwrap();
    let json = serde_json::to_value(&data).unwrap();

    assert_eq!(json["@id"], RESOURCE);
    assert_eq!(json["@type"], "http://www.w3.org/ns/ldp#RDFSource");
    assert!(json["@context"].is_string());
    assert_eq!(json["membershipResource"], "http://example.org/members");
    // Absent optional fields are omitted entirely.
    assert!(json.get("inbox").is_none());
    assert!(json.get("binary").is_none());
    assert!(json.get("type").is_none());
}
