//! Read-only view of a triple store, and a minimal in-memory implementation.

use hashbrown::HashSet;
use indexmap::IndexMap;

use crate::Term;

/// A single subject–predicate–object statement.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Triple {
	pub subject: Term,
	pub predicate: Term,
	pub object: Term,
}

impl Triple {
	pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
		Self {
			subject,
			predicate,
			object,
		}
	}
}

/// Read-only access to a triple store.
///
/// The serializer only ever reads through this trait; the store is never
/// mutated during a call. Enumeration order is up to the implementation, but
/// it must be stable within one call: the order of `subjects`, `predicates`
/// and `objects` is the order of keys and list elements in the output
/// document.
pub trait Graph {
	/// Distinct subjects, in enumeration order.
	fn subjects(&self) -> Vec<&Term>;

	/// Distinct predicates used by `subject`, in enumeration order.
	fn predicates(&self, subject: &Term) -> Vec<&Term>;

	/// Objects of the statements matching `subject` and `predicate`
	/// (`None` is a wildcard).
	fn objects(&self, subject: &Term, predicate: Option<&Term>) -> Vec<&Term>;

	/// Statements matching the pattern (`None` is a wildcard).
	fn triples(
		&self,
		subject: Option<&Term>,
		predicate: Option<&Term>,
		object: Option<&Term>,
	) -> Vec<&Triple>;

	/// Prefix bindings known at the graph level. These seed the fallback
	/// tier of the serializer's prefix map.
	fn namespaces(&self) -> Vec<(&str, &str)>;
}

/// Vec-backed triple store with linear pattern scans.
///
/// Insertion keeps set semantics (duplicate statements are dropped) while
/// preserving first-insertion order, so enumeration order is the order
/// statements were added.
#[derive(Clone, Debug, Default)]
pub struct MemoryGraph {
	triples: Vec<Triple>,
	prefixes: IndexMap<String, String>,
}

impl MemoryGraph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a statement. Duplicates are ignored.
	pub fn insert(&mut self, triple: Triple) {
		if !self.triples.contains(&triple) {
			self.triples.push(triple);
		}
	}

	/// Add a statement by components.
	pub fn insert_triple(&mut self, subject: Term, predicate: Term, object: Term) {
		self.insert(Triple::new(subject, predicate, object));
	}

	/// Bind a prefix to a namespace IRI.
	pub fn insert_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
		self.prefixes.insert(prefix.into(), namespace.into());
	}

	pub fn len(&self) -> usize {
		self.triples.len()
	}

	pub fn is_empty(&self) -> bool {
		self.triples.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Triple> {
		self.triples.iter()
	}
}

impl Graph for MemoryGraph {
	fn subjects(&self) -> Vec<&Term> {
		let mut seen = HashSet::new();
		let mut subjects = Vec::new();
		for triple in &self.triples {
			if seen.insert(&triple.subject) {
				subjects.push(&triple.subject);
			}
		}
		subjects
	}

	fn predicates(&self, subject: &Term) -> Vec<&Term> {
		let mut seen = HashSet::new();
		let mut predicates = Vec::new();
		for triple in &self.triples {
			if triple.subject == *subject && seen.insert(&triple.predicate) {
				predicates.push(&triple.predicate);
			}
		}
		predicates
	}

	fn objects(&self, subject: &Term, predicate: Option<&Term>) -> Vec<&Term> {
		self.triples
			.iter()
			.filter(|t| t.subject == *subject && predicate.map_or(true, |p| t.predicate == *p))
			.map(|t| &t.object)
			.collect()
	}

	fn triples(
		&self,
		subject: Option<&Term>,
		predicate: Option<&Term>,
		object: Option<&Term>,
	) -> Vec<&Triple> {
		self.triples
			.iter()
			.filter(|t| {
				subject.map_or(true, |s| t.subject == *s)
					&& predicate.map_or(true, |p| t.predicate == *p)
					&& object.map_or(true, |o| t.object == *o)
			})
			.collect()
	}

	fn namespaces(&self) -> Vec<(&str, &str)> {
		self.prefixes
			.iter()
			.map(|(prefix, namespace)| (prefix.as_str(), namespace.as_str()))
			.collect()
	}
}

impl Extend<Triple> for MemoryGraph {
	fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
		for triple in iter {
			self.insert(triple);
		}
	}
}

impl FromIterator<Triple> for MemoryGraph {
	fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
		let mut graph = Self::new();
		graph.extend(iter);
		graph
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use static_iref::iri;

	fn name() -> Term {
		iri!("http://xmlns.com/foaf/0.1/name").into()
	}

	fn knows() -> Term {
		iri!("http://xmlns.com/foaf/0.1/knows").into()
	}

	fn alice() -> Term {
		iri!("http://example.org/alice").into()
	}

	fn bob() -> Term {
		iri!("http://example.org/bob").into()
	}

	fn sample() -> MemoryGraph {
		let mut graph = MemoryGraph::new();
		graph.insert_triple(alice(), name(), Term::literal("Alice"));
		graph.insert_triple(alice(), knows(), bob());
		graph.insert_triple(bob(), name(), Term::literal("Bob"));
		graph
	}

	#[test]
	fn distinct_subjects_in_insertion_order() {
		let graph = sample();
		let subjects = graph.subjects();
		assert_eq!(subjects, [&alice(), &bob()]);
	}

	#[test]
	fn distinct_predicates() {
		let mut graph = sample();
		graph.insert_triple(alice(), name(), Term::literal("Alias"));
		assert_eq!(graph.predicates(&alice()), [&name(), &knows()]);
	}

	#[test]
	fn pattern_matching() {
		let graph = sample();
		assert_eq!(graph.objects(&alice(), Some(&knows())), [&bob()]);
		assert_eq!(graph.objects(&alice(), None).len(), 2);
		assert_eq!(graph.triples(None, Some(&name()), None).len(), 2);
		assert_eq!(graph.triples(None, None, Some(&bob())).len(), 1);
	}

	#[test]
	fn duplicate_statements_are_dropped() {
		let mut graph = sample();
		let before = graph.len();
		graph.insert_triple(alice(), knows(), bob());
		assert_eq!(graph.len(), before);
	}
}
