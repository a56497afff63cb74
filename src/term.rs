//! Graph node types: IRIs, blank node identifiers and literals.

use std::fmt;

use iref::{Iri, IriBuf};
use langtag::{LangTag, LangTagBuf};
use rdf_types::{BlankId, BlankIdBuf};

/// A literal value: a lexical form with an optional datatype or language tag.
///
/// Well-formed input carries at most one of the two tags. This is not
/// enforced here; when both are present the datatype wins during encoding.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Literal {
	value: String,
	datatype: Option<IriBuf>,
	language: Option<LangTagBuf>,
}

impl Literal {
	/// Create a plain literal.
	pub fn new(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			datatype: None,
			language: None,
		}
	}

	/// Create a literal with a datatype.
	pub fn typed(value: impl Into<String>, datatype: IriBuf) -> Self {
		Self {
			value: value.into(),
			datatype: Some(datatype),
			language: None,
		}
	}

	/// Create a language-tagged literal.
	pub fn tagged(value: impl Into<String>, language: LangTagBuf) -> Self {
		Self {
			value: value.into(),
			datatype: None,
			language: Some(language),
		}
	}

	/// Lexical form.
	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn datatype(&self) -> Option<&Iri> {
		self.datatype.as_deref()
	}

	pub fn language(&self) -> Option<&LangTag> {
		self.language.as_deref()
	}
}

impl fmt::Display for Literal {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "\"{}\"", self.value)?;
		if let Some(language) = &self.language {
			write!(f, "@{language}")
		} else if let Some(datatype) = &self.datatype {
			write!(f, "^^<{datatype}>")
		} else {
			Ok(())
		}
	}
}

/// A node of the source graph.
///
/// Subjects are IRIs or blank node identifiers; predicates are IRIs; objects
/// can be any of the three kinds. Positions are not constrained by this type:
/// the serializer checks them and reports a violation as
/// [`Error::InvalidNodeKind`](crate::Error::InvalidNodeKind).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Term {
	/// Full IRI.
	Iri(IriBuf),

	/// Blank node identifier, scoped to one graph.
	Blank(BlankIdBuf),

	/// Literal value.
	Literal(Literal),
}

impl Term {
	/// Create a plain literal term.
	pub fn literal(value: impl Into<String>) -> Self {
		Self::Literal(Literal::new(value))
	}

	pub fn is_iri(&self) -> bool {
		matches!(self, Self::Iri(_))
	}

	pub fn is_blank(&self) -> bool {
		matches!(self, Self::Blank(_))
	}

	pub fn is_literal(&self) -> bool {
		matches!(self, Self::Literal(_))
	}

	pub fn as_iri(&self) -> Option<&Iri> {
		match self {
			Self::Iri(iri) => Some(iri),
			_ => None,
		}
	}

	pub fn as_blank(&self) -> Option<&BlankId> {
		match self {
			Self::Blank(blank) => Some(blank),
			_ => None,
		}
	}

	pub fn as_literal(&self) -> Option<&Literal> {
		match self {
			Self::Literal(literal) => Some(literal),
			_ => None,
		}
	}
}

impl From<IriBuf> for Term {
	fn from(iri: IriBuf) -> Self {
		Self::Iri(iri)
	}
}

impl From<&Iri> for Term {
	fn from(iri: &Iri) -> Self {
		Self::Iri(iri.to_owned())
	}
}

impl From<BlankIdBuf> for Term {
	fn from(blank: BlankIdBuf) -> Self {
		Self::Blank(blank)
	}
}

impl From<&BlankId> for Term {
	fn from(blank: &BlankId) -> Self {
		Self::Blank(blank.to_owned())
	}
}

impl From<Literal> for Term {
	fn from(literal: Literal) -> Self {
		Self::Literal(literal)
	}
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Iri(iri) => write!(f, "<{iri}>"),
			Self::Blank(blank) => blank.fmt(f),
			Self::Literal(literal) => literal.fmt(f),
		}
	}
}
