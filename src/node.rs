//! Output nodes under construction, held in an arena.
//!
//! Every subject owns exactly one [`OutputNode`] for the duration of a
//! serialization call. A parent that inlines a child stores a [`NodeId`]
//! handle instead of a copy, so writes made to the child later in the fill
//! pass remain visible through the parent. Rendering resolves the handles
//! and consumes each node exactly once.

use indexmap::IndexMap;
use json_syntax::Value;

/// Handle to an output node in a [`NodeArena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

/// A value slot in an output node.
#[derive(Debug)]
pub enum Slot {
	/// A finished JSON value: a literal, an IRI reference object or a blank
	/// node token.
	Json(Value),

	/// An inlined child node, by handle.
	Node(NodeId),

	/// Ordered multi-valued slot.
	Many(Vec<Slot>),
}

/// One subject's JSON-LD object under construction. Keys keep insertion
/// order.
#[derive(Debug, Default)]
pub struct OutputNode {
	entries: IndexMap<String, Slot>,
}

impl OutputNode {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, key: impl Into<String>, slot: Slot) {
		self.entries.insert(key.into(), slot);
	}

	/// Remove a key, keeping the order of the remaining entries.
	pub fn remove(&mut self, key: &str) -> Option<Slot> {
		self.entries.shift_remove(key)
	}
}

/// Arena of output nodes, one per subject.
#[derive(Debug, Default)]
pub struct NodeArena {
	nodes: Vec<Option<OutputNode>>,
}

impl NodeArena {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, node: OutputNode) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(Some(node));
		id
	}

	pub fn node_mut(&mut self, id: NodeId) -> &mut OutputNode {
		// Nodes are only taken out during rendering, after the fill pass.
		self.nodes[id.0].as_mut().unwrap()
	}

	/// Render the node behind `id` as a JSON object.
	pub fn render(&mut self, id: NodeId) -> Value {
		let mut object = json_syntax::Object::new();
		self.render_into(id, &mut object);
		Value::Object(object)
	}

	/// Render the node behind `id`, splicing its entries into `object`.
	pub fn render_into(&mut self, id: NodeId, object: &mut json_syntax::Object) {
		// Each node is consumed exactly once: it is either still a root, or
		// it was inlined by a single parent.
		let node = self.nodes[id.0].take().unwrap();
		for (key, slot) in node.entries {
			let value = self.render_slot(slot);
			object.insert(key.into(), value);
		}
	}

	fn render_slot(&mut self, slot: Slot) -> Value {
		match slot {
			Slot::Json(value) => value,
			Slot::Node(id) => self.render(id),
			Slot::Many(slots) => Value::Array(
				slots
					.into_iter()
					.map(|slot| self.render_slot(slot))
					.collect(),
			),
		}
	}
}
