//! Prefix bindings and CURIE shrinking.

use hashbrown::HashSet;
use indexmap::IndexMap;
use iref::{Iri, IriBuf};

/// Two-tier mapping from short prefix to namespace IRI.
///
/// The local tier holds caller-supplied bindings and takes precedence; the
/// parent tier holds the bindings the graph itself declares. A parent
/// binding is promoted into the local tier the first time it matches, so
/// after a pass the local tier holds every binding that was actually used.
///
/// Several namespaces can prefix the same IRI; iteration order is insertion
/// order in each tier and the first match wins, which keeps shrinking
/// deterministic.
#[derive(Clone, Debug, Default)]
pub struct PrefixMap {
	local: IndexMap<String, String>,
	parent: IndexMap<String, String>,
	used: HashSet<String>,
}

impl PrefixMap {
	/// Create a map with the given parent-tier bindings.
	pub fn new<'a>(parent: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
		Self {
			local: IndexMap::new(),
			parent: parent
				.into_iter()
				.map(|(prefix, namespace)| (prefix.to_owned(), namespace.to_owned()))
				.collect(),
			used: HashSet::new(),
		}
	}

	/// Bind a prefix in the local tier.
	pub fn insert(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
		self.local.insert(prefix.into(), namespace.into());
	}

	/// Shrink `iri` into a `prefix:suffix` CURIE, marking the matched prefix
	/// as used. Returns `None` when no bound namespace prefixes `iri`.
	pub fn shrink(&mut self, iri: &Iri) -> Option<String> {
		let target = iri.as_str();

		for (prefix, namespace) in &self.local {
			if let Some(suffix) = target.strip_prefix(namespace.as_str()) {
				self.used.insert(prefix.clone());
				return Some(format!("{prefix}:{suffix}"));
			}
		}

		let promoted = self.parent.iter().find_map(|(prefix, namespace)| {
			target
				.strip_prefix(namespace.as_str())
				.map(|suffix| (prefix.clone(), namespace.clone(), suffix.to_owned()))
		});

		promoted.map(|(prefix, namespace, suffix)| {
			self.local.insert(prefix.clone(), namespace);
			self.used.insert(prefix.clone());
			format!("{prefix}:{suffix}")
		})
	}

	/// Expand a `prefix:suffix` CURIE back into a full IRI, if the prefix is
	/// bound in either tier and the expansion is a valid IRI.
	pub fn expand(&self, curie: &str) -> Option<IriBuf> {
		let (prefix, suffix) = curie.split_once(':')?;
		let namespace = self.local.get(prefix).or_else(|| self.parent.get(prefix))?;
		IriBuf::new(format!("{namespace}{suffix}")).ok()
	}

	/// Whether any prefix has been marked used.
	pub fn any_used(&self) -> bool {
		!self.used.is_empty()
	}

	/// Used bindings, in local-tier insertion order.
	pub fn used_entries(&self) -> impl Iterator<Item = (&str, &str)> {
		self.local
			.iter()
			.filter(|(prefix, _)| self.used.contains(prefix.as_str()))
			.map(|(prefix, namespace)| (prefix.as_str(), namespace.as_str()))
	}
}
