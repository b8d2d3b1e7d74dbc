//! A resource dataset as a quad-addressable set.
//!
//! Membership is keyed by full structural equality of the quad (subject,
//! predicate, object, graph). There is no ordering requirement; callers that
//! read "the first" matching quad must not rely on a single value when
//! multiple are asserted.

use std::collections::HashSet;

use oxigraph::model::{GraphName, NamedNode, NamedOrBlankNode, Quad, Term};

/// A set of quads representing the full state of one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    quads: HashSet<Quad>,
}

impl Dataset {
    pub fn new() -> Self {
        Self { quads: HashSet::new() }
    }

    pub fn from_quads<I: IntoIterator<Item = Quad>>(quads: I) -> Self {
        Self { quads: quads.into_iter().collect() }
    }

    /// Insert a quad, returning false if it was already present.
    pub fn insert(&mut self, quad: Quad) -> bool {
        self.quads.insert(quad)
    }

    pub fn remove(&mut self, quad: &Quad) -> bool {
        self.quads.remove(quad)
    }

    pub fn contains(&self, quad: &Quad) -> bool {
        self.quads.contains(quad)
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Iterate over every quad in the dataset, in no particular order.
    pub fn quads(&self) -> impl Iterator<Item = &Quad> {
        self.quads.iter()
    }

    /// Iterate over the quads of a single named graph.
    pub fn graph<'a>(&'a self, graph: &'a GraphName) -> impl Iterator<Item = &'a Quad> {
        self.quads.iter().filter(move |q| q.graph_name == *graph)
    }

    /// Iterate over quads matching the given pattern; `None` matches anything.
    pub fn match_quads<'a>(
        &'a self,
        subject: Option<&'a NamedNode>,
        predicate: Option<&'a NamedNode>,
        object: Option<&'a Term>,
        graph: Option<&'a GraphName>,
    ) -> impl Iterator<Item = &'a Quad> {
        self.quads.iter().filter(move |q| {
            subject.map_or(true, |s| subject_is(q, s))
                && predicate.map_or(true, |p| q.predicate == *p)
                && object.map_or(true, |o| q.object == *o)
                && graph.map_or(true, |g| q.graph_name == *g)
        })
    }

    /// Whether any quad matches the given pattern.
    pub fn contains_match(
        &self,
        subject: Option<&NamedNode>,
        predicate: Option<&NamedNode>,
        object: Option<&Term>,
        graph: Option<&GraphName>,
    ) -> bool {
        self.match_quads(subject, predicate, object, graph).next().is_some()
    }

    /// The object of the first quad matching (graph, subject, predicate).
    pub fn first_object(
        &self,
        graph: &GraphName,
        subject: &NamedNode,
        predicate: &NamedNode,
    ) -> Option<&Term> {
        self.match_quads(Some(subject), Some(predicate), None, Some(graph))
            .next()
            .map(|q| &q.object)
    }

    /// The first matching object that is an IRI, as a string.
    pub fn first_iri(
        &self,
        graph: &GraphName,
        subject: &NamedNode,
        predicate: &NamedNode,
    ) -> Option<String> {
        match self.first_object(graph, subject, predicate) {
            Some(Term::NamedNode(node)) => Some(node.as_str().to_string()),
            _ => None,
        }
    }

    /// The first matching object that is a literal, as its lexical form.
    pub fn first_literal(
        &self,
        graph: &GraphName,
        subject: &NamedNode,
        predicate: &NamedNode,
    ) -> Option<String> {
        match self.first_object(graph, subject, predicate) {
            Some(Term::Literal(literal)) => Some(literal.value().to_string()),
            _ => None,
        }
    }

    /// All IRI objects matching (graph, subject, predicate).
    pub fn iris(
        &self,
        graph: &GraphName,
        subject: &NamedNode,
        predicate: &NamedNode,
    ) -> Vec<String> {
        self.match_quads(Some(subject), Some(predicate), None, Some(graph))
            .filter_map(|q| match &q.object {
                Term::NamedNode(node) => Some(node.as_str().to_string()),
                _ => None,
            })
            .collect()
    }
}

impl Extend<Quad> for Dataset {
    fn extend<I: IntoIterator<Item = Quad>>(&mut self, quads: I) {
        self.quads.extend(quads);
    }
}

impl FromIterator<Quad> for Dataset {
    fn from_iter<I: IntoIterator<Item = Quad>>(quads: I) -> Self {
        Self::from_quads(quads)
    }
}

fn subject_is(quad: &Quad, iri: &NamedNode) -> bool {
    matches!(&quad.subject, NamedOrBlankNode::NamedNode(node) if node == iri)
}
