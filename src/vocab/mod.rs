//! IRI constants for the vocabularies used across the repository core.
//!
//! Each namespace is a submodule of plain constructor functions returning
//! owned [`NamedNode`] values. `rdf:type` and the XSD datatypes come from
//! the vocab bundled with oxigraph and are not redefined here.

use oxigraph::model::NamedNode;

/// The trellis namespace, holding the named-graph provenance terms.
pub mod trellis {
    use super::NamedNode;

    pub const NS: &str = "http://www.trellisldp.org/ns/trellis#";

    pub fn prefer_user_managed() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}PreferUserManaged"))
    }

    pub fn prefer_server_managed() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}PreferServerManaged"))
    }

    pub fn prefer_audit() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}PreferAudit"))
    }
}

/// The W3C Linked Data Platform namespace.
pub mod ldp {
    use super::NamedNode;

    pub const NS: &str = "http://www.w3.org/ns/ldp#";

    pub fn prefer_containment() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}PreferContainment"))
    }

    pub fn contains() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}contains"))
    }

    pub fn inbox() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}inbox"))
    }

    pub fn membership_resource() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}membershipResource"))
    }

    pub fn has_member_relation() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}hasMemberRelation"))
    }

    pub fn is_member_of_relation() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}isMemberOfRelation"))
    }

    pub fn inserted_content_relation() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}insertedContentRelation"))
    }

    pub fn rdf_source() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}RDFSource"))
    }

    pub fn non_rdf_source() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}NonRDFSource"))
    }

    pub fn container() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}Container"))
    }

    pub fn basic_container() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}BasicContainer"))
    }
}

/// Dublin Core terms.
pub mod dc {
    use super::NamedNode;

    pub const NS: &str = "http://purl.org/dc/terms/";

    pub fn modified() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}modified"))
    }

    pub fn has_part() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}hasPart"))
    }

    pub fn format() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}format"))
    }

    pub fn extent() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}extent"))
    }
}

/// The W3C Activity Streams namespace, used for audit provenance.
pub mod activity_streams {
    use super::NamedNode;

    pub const NS: &str = "https://www.w3.org/ns/activitystreams#";

    pub fn create() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}Create"))
    }

    pub fn delete() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}Delete"))
    }
}

/// The W3C Web Annotation namespace.
pub mod oa {
    use super::NamedNode;

    pub const NS: &str = "http://www.w3.org/ns/oa#";

    pub fn annotation_service() -> NamedNode {
        NamedNode::new_unchecked(format!("{NS}annotationService"))
    }
}
