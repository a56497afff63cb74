//! Tree-shaped JSON-LD serialization for RDF graphs.
//!
//! This crate folds a graph of subject–predicate–object statements into a
//! tree-shaped [`json_syntax::Value`] following the JSON-LD convention:
//! subjects become objects, predicates become keys, and objects become
//! nested objects, arrays or scalars.
//!
//! The interesting part is not JSON emission but deciding which subjects are
//! inlined and which are referenced by identifier. A subject pointed at by
//! exactly one statement (a *chain link*) is folded into its parent as a
//! nested object; everything else stays at the top level and is referenced
//! by a CURIE, a relativized IRI or a blank node token. Every statement of
//! the source graph is recoverable from the output.
//!
//! ```
//! use json_ld_tree::{serialize, MemoryGraph, Options, Term};
//! use static_iref::iri;
//!
//! let mut graph = MemoryGraph::new();
//! graph.insert_prefix("foaf", "http://xmlns.com/foaf/0.1/");
//! graph.insert_triple(
//! 	iri!("http://example.org/alice").into(),
//! 	iri!("http://xmlns.com/foaf/0.1/name").into(),
//! 	Term::literal("Alice"),
//! );
//!
//! let document = serialize(&graph, Options::default())?;
//! assert_eq!(
//! 	document,
//! 	json_syntax::json!({
//! 		"@context": { "foaf": "http://xmlns.com/foaf/0.1/" },
//! 		"@subject": "http://example.org/alice",
//! 		"foaf:name": "Alice"
//! 	})
//! );
//! # Ok::<(), json_ld_tree::Error>(())
//! ```
mod error;
pub mod graph;
pub mod keyword;
mod node;
pub mod prefix;
mod serializer;
pub mod term;

pub use error::Error;
pub use graph::{Graph, MemoryGraph, Triple};
pub use prefix::PrefixMap;
pub use serializer::{serialize, EncodeLiteral, Options, RDF_TYPE, USES_VOCABULARY};
pub use term::{Literal, Term};
