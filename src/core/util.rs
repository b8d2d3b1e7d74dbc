//! Dataset serialization and identifier path utilities.

use std::fmt::Write;

use crate::core::Dataset;

/// Serialize a dataset to its canonical N-Quads wire form.
///
/// One line per quad, lines sorted lexicographically so that equal datasets
/// always produce identical output regardless of insertion order.
pub fn serialize(dataset: &Dataset) -> Result<String, std::fmt::Error> {
    let mut lines: Vec<String> = Vec::with_capacity(dataset.len());
    for quad in dataset.quads() {
        let mut line = String::new();
        write!(line, "{quad} .")?;
        lines.push(line);
    }
    lines.sort_unstable();
    Ok(lines.join("\n"))
}

/// Derive the parent container IRI for a hierarchical resource identifier.
///
/// A single trailing slash is ignored. Returns `None` for root resources,
/// including identifiers whose only slash belongs to the scheme or authority
/// separator (`http://example.org` has no parent; `http://example.org/a` has
/// the authority root as its parent).
pub fn parent_of(identifier: &str) -> Option<String> {
    let trimmed = identifier.strip_suffix('/').unwrap_or(identifier);
    let idx = trimmed.rfind('/')?;
    if idx == 0 {
        return None;
    }
    let parent = &trimmed[..idx];
    if parent.ends_with(':') || parent.ends_with('/') {
        return None;
    }
    Some(parent.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManagedGraph;
    use oxigraph::model::{Literal, NamedNode, Quad};

    #[test]
    fn test_serialize_is_sorted_and_insertion_order_independent() {
        let s = NamedNode::new("http://example.org/s").unwrap();
        let p = NamedNode::new("http://example.org/p").unwrap();
        let g = ManagedGraph::UserManaged.graph_name();
        let a = Quad::new(s.clone(), p.clone(), Literal::from("a"), g.clone());
        let b = Quad::new(s.clone(), p.clone(), Literal::from("b"), g.clone());

        let forward = Dataset::from_quads([a.clone(), b.clone()]);
        let backward = Dataset::from_quads([b, a]);

        let serialized = serialize(&forward).unwrap();
        assert_eq!(serialized, serialize(&backward).unwrap());
        assert_eq!(serialized.lines().count(), 2);
        assert!(serialized.contains("\"a\""));
        assert!(serialized.lines().all(|line| line.ends_with(" .")));
    }

    #[test]
    fn test_serialize_empty_dataset() {
        assert_eq!(serialize(&Dataset::new()).unwrap(), "");
    }

    #[test]
    fn test_parent_of_nested_resource() {
        assert_eq!(
            parent_of("trellis:data/container/resource"),
            Some("trellis:data/container".to_string())
        );
        assert_eq!(parent_of("trellis:data/container"), Some("trellis:data".to_string()));
    }

    #[test]
    fn test_parent_of_root_is_none() {
        assert_eq!(parent_of("trellis:data"), None);
        assert_eq!(parent_of("http://example.org"), None);
        assert_eq!(parent_of("http://example.org/"), None);
    }

    #[test]
    fn test_parent_of_ignores_trailing_slash() {
        assert_eq!(
            parent_of("http://example.org/container/resource/"),
            Some("http://example.org/container".to_string())
        );
    }

    #[test]
    fn test_parent_of_http_resource() {
        assert_eq!(
            parent_of("http://example.org/container/resource"),
            Some("http://example.org/container".to_string())
        );
        assert_eq!(parent_of("http://example.org/resource"), Some("http://example.org".to_string()));
    }
}
