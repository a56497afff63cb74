use crate::Term;

/// Serialization error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A term was found in a position its kind does not allow: a literal
	/// used as a subject or identifier, or a non-IRI predicate.
	///
	/// This indicates a malformed input graph and aborts the serialization
	/// call. No partial document is returned.
	#[error("invalid node kind: {0}")]
	InvalidNodeKind(Term),
}
