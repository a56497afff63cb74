//! JSON-LD keywords used in the output document.

pub const CONTEXT: &str = "@context";
pub const BASE: &str = "@base";
pub const VOCAB: &str = "@vocab";
pub const SUBJECT: &str = "@subject";
pub const TYPE: &str = "@type";
pub const IRI: &str = "@iri";
pub const LITERAL: &str = "@literal";
pub const DATATYPE: &str = "@datatype";
pub const LANGUAGE: &str = "@language";
