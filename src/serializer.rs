//! The graph-to-tree folding pass.
//!
//! Serialization runs in four steps over call-local state:
//!
//! 1. register every subject: one output node each, seeded with its
//!    `@subject` identifier, in-degrees counted, chain-link candidates
//!    (in-degree exactly one) collected;
//! 2. detect a default-vocabulary declaration and elide its owner when the
//!    declaration is the owner's only statement;
//! 3. fill every node with its types and predicate values, folding each
//!    chain link into its unique parent as it is encountered;
//! 4. assemble the `@context` block and the root document shape.
//!
//! The top-subject and chain-link sets only ever shrink, so the pass
//! terminates even when the graph contains cycles.

use hashbrown::{HashMap, HashSet};
use indexmap::{IndexMap, IndexSet};
use iref::{Iri, IriBuf};
use json_syntax::Value;
use static_iref::iri;

use crate::{
	graph::Graph,
	keyword,
	node::{NodeArena, NodeId, OutputNode, Slot},
	prefix::PrefixMap,
	term::{Literal, Term},
	Error,
};

/// Predicate of an `rdf:type` statement.
pub const RDF_TYPE: &Iri = iri!("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");

/// Predicate of a default-vocabulary declaration.
pub const USES_VOCABULARY: &Iri = iri!("http://www.w3.org/ns/rdfa#usesVocabulary");

/// Literal encoding override. When set, it replaces the default encoding
/// rules entirely; it must be a pure function of the literal.
pub type EncodeLiteral = Box<dyn Fn(&Literal) -> Value>;

/// Serialization options.
#[derive(Default)]
pub struct Options {
	/// Base IRI: identifiers no prefix can shrink are relativized against
	/// it, and it is emitted as `@base`.
	pub base: Option<IriBuf>,

	/// Extra prefix bindings, taking precedence over the graph's own
	/// namespaces.
	pub prefixes: IndexMap<String, String>,

	/// Full override of the default literal encoding rules.
	pub encode_literal: Option<EncodeLiteral>,
}

/// Serialize `graph` into a tree-shaped JSON-LD document.
///
/// Every subject of the graph appears in the document exactly once: subjects
/// pointed at by exactly one statement are folded into their parent as
/// nested objects, everything else stays at the top level and is referenced
/// by identifier. The result is ready for text emission by a JSON printer.
pub fn serialize(graph: &impl Graph, options: Options) -> Result<Value, Error> {
	let Options {
		base,
		prefixes,
		encode_literal,
	} = options;

	let mut prefix_map = PrefixMap::new(graph.namespaces());
	for (prefix, namespace) in prefixes {
		prefix_map.insert(prefix, namespace);
	}

	let mut serializer = Serializer {
		graph,
		base,
		prefixes: prefix_map,
		encode_literal,
		subjects: Vec::new(),
		nodes: IndexMap::new(),
		arena: NodeArena::new(),
		top: IndexSet::new(),
		chain_links: HashSet::new(),
		in_degrees: HashMap::new(),
		vocab: None,
		vocab_owner: None,
		vocab_elided: false,
	};

	serializer.register_subjects()?;
	serializer.detect_vocabulary();
	serializer.fill()?;
	serializer.prune_anonymous_roots();
	Ok(serializer.assemble())
}

/// Call-local serialization state. Created fresh for every call and
/// discarded once the document is assembled.
struct Serializer<'a, G> {
	graph: &'a G,
	base: Option<IriBuf>,
	prefixes: PrefixMap,
	encode_literal: Option<EncodeLiteral>,

	/// Every subject, in graph enumeration order. This snapshot drives the
	/// fill pass: subjects folded into a parent still get filled, through
	/// the arena.
	subjects: Vec<Term>,
	/// Subject to output node handle.
	nodes: IndexMap<Term, NodeId>,
	arena: NodeArena,
	/// Subjects destined for the document root. Shrinks as chain links are
	/// consumed; never grows back.
	top: IndexSet<Term>,
	/// Subjects with in-degree exactly one, candidates for inlining.
	chain_links: HashSet<Term>,
	/// Number of statements pointing at each subject.
	in_degrees: HashMap<Term, usize>,

	vocab: Option<IriBuf>,
	vocab_owner: Option<Term>,
	vocab_elided: bool,
}

impl<'a, G: Graph> Serializer<'a, G> {
	fn register_subjects(&mut self) -> Result<(), Error> {
		let graph = self.graph;

		for subject in graph.subjects() {
			if subject.is_literal() {
				return Err(Error::InvalidNodeKind(subject.clone()));
			}

			let reference = self.resolve(subject)?;
			let mut node = OutputNode::new();
			node.insert(keyword::SUBJECT, Slot::Json(Value::String(reference.into())));

			let id = self.arena.push(node);
			self.subjects.push(subject.clone());
			self.nodes.insert(subject.clone(), id);
			self.top.insert(subject.clone());
		}

		for subject in &self.subjects {
			let in_degree = graph.triples(None, None, Some(subject)).len();
			if in_degree == 1 {
				self.chain_links.insert(subject.clone());
			}
			self.in_degrees.insert(subject.clone(), in_degree);
		}

		Ok(())
	}

	/// Look for a single default-vocabulary declaration. The owning subject
	/// is dropped from the root when the declaration is its only statement:
	/// it is metadata, not data. Several declarations are ambiguous and
	/// disable vocabulary handling altogether.
	fn detect_vocabulary(&mut self) {
		let graph = self.graph;
		let predicate = Term::from(USES_VOCABULARY);

		match graph.triples(None, Some(&predicate), None).as_slice() {
			[declaration] => {
				let Term::Iri(vocab) = &declaration.object else {
					log::debug!(
						"vocabulary declaration object {} is not an IRI, ignoring",
						declaration.object
					);
					return;
				};

				let owner = declaration.subject.clone();
				log::debug!("active vocabulary {vocab}, declared by {owner}");
				self.vocab = Some(vocab.clone());

				let parents = self.in_degrees.get(&owner).copied().unwrap_or(0);
				let children = graph.triples(Some(&owner), None, None).len();
				if parents == 0 && children == 1 {
					// The declaration is the owner's only statement.
					log::debug!("eliding vocabulary owner {owner}");
					self.top.shift_remove(&owner);
					self.vocab_elided = true;
				}

				self.vocab_owner = Some(owner);
			}
			[] => {}
			_ => log::debug!("several vocabulary declarations, vocabulary handling disabled"),
		}
	}

	fn fill(&mut self) -> Result<(), Error> {
		let graph = self.graph;
		let type_predicate = Term::from(RDF_TYPE);

		for index in 0..self.subjects.len() {
			let subject = self.subjects[index].clone();
			if self.vocab_elided && self.vocab_owner.as_ref() == Some(&subject) {
				continue;
			}

			let id = self.nodes[&subject];

			let types = graph.objects(&subject, Some(&type_predicate));
			match types.as_slice() {
				[] => {}
				[ty] => {
					let ty = self.resolve(ty)?;
					self.arena
						.node_mut(id)
						.insert(keyword::TYPE, Slot::Json(ty.into()));
				}
				types => {
					let mut list = Vec::with_capacity(types.len());
					for ty in types {
						list.push(self.resolve(ty)?.into());
					}
					self.arena
						.node_mut(id)
						.insert(keyword::TYPE, Slot::Json(Value::Array(list)));
				}
			}

			for predicate in graph.predicates(&subject) {
				if *predicate == type_predicate {
					continue;
				}
				if !predicate.is_iri() {
					return Err(Error::InvalidNodeKind(predicate.clone()));
				}
				let key = self.resolve(predicate)?;

				let objects = graph.objects(&subject, Some(predicate));
				match objects.as_slice() {
					[] => {}
					[object] => {
						let slot = self.resolve_object(object, &subject)?;
						self.arena.node_mut(id).insert(key, slot);
					}
					objects => {
						let mut slots = Vec::with_capacity(objects.len());
						for object in objects {
							slots.push(self.resolve_object(object, &subject)?);
						}
						self.arena.node_mut(id).insert(key, Slot::Many(slots));
					}
				}
			}
		}

		Ok(())
	}

	/// Resolve one object value of `parent`.
	///
	/// Literals are encoded in place. A chain link is folded into the
	/// parent: it leaves the root set, and the parent leaves the chain-link
	/// set since a node that embeds a child must not itself be silently
	/// embedded elsewhere. Everything else becomes a reference.
	fn resolve_object(&mut self, object: &Term, parent: &Term) -> Result<Slot, Error> {
		if let Term::Literal(literal) = object {
			return Ok(Slot::Json(self.encode(literal)));
		}

		// A self loop is never folded: embedding a node inside itself would
		// leave no copy to render.
		if object != parent && self.chain_links.contains(object) {
			self.top.shift_remove(object);
			self.chain_links.remove(object);
			self.chain_links.remove(parent);

			let id = self.nodes[object];
			if object.is_blank() {
				// Structurally embedded; the identifier is redundant.
				self.arena.node_mut(id).remove(keyword::SUBJECT);
			}

			log::trace!("folded {object} into {parent}");
			return Ok(Slot::Node(id));
		}

		match object {
			Term::Blank(blank) => Ok(Slot::Json(Value::String(blank.as_str().into()))),
			object => {
				let reference = self.resolve(object)?;
				let mut value = json_syntax::Object::new();
				value.insert(keyword::IRI.into(), Value::String(reference.into()));
				Ok(Slot::Json(Value::Object(value)))
			}
		}
	}

	/// Encode a literal value.
	fn encode(&mut self, literal: &Literal) -> Value {
		if let Some(encode) = &self.encode_literal {
			return encode(literal);
		}

		if let Some(datatype) = literal.datatype() {
			let datatype = self.resolve_iri(datatype);
			let mut value = json_syntax::Object::new();
			value.insert(
				keyword::LITERAL.into(),
				Value::String(literal.value().into()),
			);
			value.insert(keyword::DATATYPE.into(), Value::String(datatype.into()));
			return Value::Object(value);
		}

		if let Some(language) = literal.language() {
			let mut value = json_syntax::Object::new();
			value.insert(
				keyword::LITERAL.into(),
				Value::String(literal.value().into()),
			);
			value.insert(
				keyword::LANGUAGE.into(),
				Value::String(language.as_str().into()),
			);
			return Value::Object(value);
		}

		Value::String(literal.value().into())
	}

	/// Resolve an identifier to its textual form. Resolution is
	/// deterministic: the same identifier always yields the same string
	/// within one call.
	fn resolve(&mut self, term: &Term) -> Result<String, Error> {
		match term {
			Term::Iri(iri) => Ok(self.resolve_iri(iri)),
			Term::Blank(blank) => Ok(blank.as_str().to_owned()),
			Term::Literal(_) => Err(Error::InvalidNodeKind(term.clone())),
		}
	}

	fn resolve_iri(&mut self, iri: &Iri) -> String {
		if let Some(vocab) = &self.vocab {
			if let Some(suffix) = iri.as_str().strip_prefix(vocab.as_str()) {
				return suffix.to_owned();
			}
		}

		if let Some(curie) = self.prefixes.shrink(iri) {
			return curie;
		}

		self.relativize(iri)
	}

	fn relativize(&self, iri: &Iri) -> String {
		match &self.base {
			Some(base) => iri
				.as_str()
				.strip_prefix(base.as_str())
				.unwrap_or(iri.as_str())
				.to_owned(),
			None => iri.as_str().to_owned(),
		}
	}

	/// A top-level blank subject nothing points at needs no identifier.
	fn prune_anonymous_roots(&mut self) {
		for subject in &self.top {
			if subject.is_blank() && self.in_degrees[subject] == 0 {
				let id = self.nodes[subject];
				self.arena.node_mut(id).remove(keyword::SUBJECT);
			}
		}
	}

	fn assemble(mut self) -> Value {
		let mut root = json_syntax::Object::new();

		if let Some(context) = self.context() {
			root.insert(keyword::CONTEXT.into(), Value::Object(context));
		}

		let top: Vec<NodeId> = self.top.iter().map(|subject| self.nodes[subject]).collect();
		log::debug!("{} top-level subject(s)", top.len());

		match top.as_slice() {
			[] => {}
			[id] => {
				// A single root is flattened: its keys go directly into the
				// document.
				self.arena.render_into(*id, &mut root);
			}
			ids => {
				let subjects = ids.iter().map(|id| self.arena.render(*id)).collect();
				root.insert(keyword::SUBJECT.into(), Value::Array(subjects));
			}
		}

		Value::Object(root)
	}

	/// The `@context` block, present only when it would carry something.
	fn context(&self) -> Option<json_syntax::Object> {
		if self.base.is_none() && self.vocab.is_none() && !self.prefixes.any_used() {
			return None;
		}

		let mut context = json_syntax::Object::new();
		if let Some(base) = &self.base {
			context.insert(keyword::BASE.into(), Value::String(base.as_str().into()));
		}
		for (prefix, namespace) in self.prefixes.used_entries() {
			context.insert(prefix.into(), Value::String(namespace.into()));
		}
		if let Some(vocab) = &self.vocab {
			context.insert(keyword::VOCAB.into(), Value::String(vocab.as_str().into()));
		}

		Some(context)
	}
}
