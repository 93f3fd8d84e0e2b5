//! Identifier type detection for scholarly identifiers
//!
//! This crate infers the type of an identifier from its string form alone:
//! - DOI (bare, `doi:` prefixed, or doi.org URL)
//! - ORCID iD (checksum verified)
//! - OpenAlex entity IDs
//! - PubMed and PubMed Central IDs
//! - arXiv IDs (old and new formats)
//! - ISBN-10 / ISBN-13 (checksum verified)
//! - ROR and Wikidata IDs
//!
//! Detected values are returned in their canonical bare form.

pub mod parser;
pub mod validators;

pub use parser::*;
pub use validators::*;
