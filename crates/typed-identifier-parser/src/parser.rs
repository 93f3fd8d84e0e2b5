//! Identifier type detection from bare strings
//!
//! Recognizes an identifier from its URL form, its prefixed form
//! (`doi:`, `arXiv:`, `PMID:`, `ISBN`) or its bare canonical form, and
//! returns the detected type together with the canonical bare value.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::validators::{clean_doi, is_valid_isbn, is_valid_orcid, normalize_isbn};

/// Identifier types the parser can detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    /// Digital Object Identifier
    Doi,
    /// ORCID iD of a researcher
    Orcid,
    /// OpenAlex entity ID (work, author, source, ...)
    OpenAlex,
    /// PubMed Central identifier
    Pmcid,
    /// PubMed identifier
    Pmid,
    /// arXiv preprint identifier
    Arxiv,
    /// International Standard Book Number
    Isbn,
    /// Research Organization Registry ID
    Ror,
    /// Wikidata item
    Wikidata,
}

impl IdentifierKind {
    /// All kinds, in detection priority order
    pub fn all() -> &'static [IdentifierKind] {
        &[
            IdentifierKind::Doi,
            IdentifierKind::Orcid,
            IdentifierKind::OpenAlex,
            IdentifierKind::Pmcid,
            IdentifierKind::Pmid,
            IdentifierKind::Arxiv,
            IdentifierKind::Isbn,
            IdentifierKind::Ror,
            IdentifierKind::Wikidata,
        ]
    }

    /// The `itemtype` string stored for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::Doi => "doi",
            IdentifierKind::Orcid => "orcid",
            IdentifierKind::OpenAlex => "openalex",
            IdentifierKind::Pmcid => "pmcid",
            IdentifierKind::Pmid => "pmid",
            IdentifierKind::Arxiv => "arxiv",
            IdentifierKind::Isbn => "isbn",
            IdentifierKind::Ror => "ror",
            IdentifierKind::Wikidata => "wikidata",
        }
    }

    /// Parse from the `itemtype` string.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.as_str() == name)
    }
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected identifier: its type and canonical value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedIdentifier {
    pub kind: IdentifierKind,
    pub itemvalue: String,
}

impl ParsedIdentifier {
    pub fn new(kind: IdentifierKind, itemvalue: impl Into<String>) -> Self {
        Self {
            kind,
            itemvalue: itemvalue.into(),
        }
    }

    /// The `itemtype` string, e.g. `"doi"`.
    pub fn itemtype(&self) -> &'static str {
        self.kind.as_str()
    }
}

lazy_static! {
    static ref DOI_REGEX: Regex = Regex::new(
        r"(?i)^(?:doi:\s*|https?://(?:dx\.)?doi\.org/)?(?P<value>10\.\d{4,9}/\S+)$"
    ).unwrap();

    static ref ORCID_REGEX: Regex = Regex::new(
        r"(?i)^(?:https?://(?:www\.)?orcid\.org/)?(?P<value>\d{4}-\d{4}-\d{4}-\d{3}[\dx])/?$"
    ).unwrap();

    // URL form accepts any entity number, bare form needs a realistic length
    static ref OPENALEX_URL_REGEX: Regex = Regex::new(
        r"(?i)^https?://(?:api\.)?openalex\.org/(?:(?:works|authors|sources|institutions|concepts|publishers|funders|topics)/)?(?P<value>[wasicpft]\d+)/?$"
    ).unwrap();
    static ref OPENALEX_BARE_REGEX: Regex = Regex::new(r"^(?P<value>[WASICPFT]\d{4,})$").unwrap();

    static ref PMCID_URL_REGEX: Regex = Regex::new(
        r"(?i)^https?://(?:(?:www\.)?ncbi\.nlm\.nih\.gov/pmc/articles|pmc\.ncbi\.nlm\.nih\.gov/articles)/(?:pmc)?(?P<value>\d+)/?$"
    ).unwrap();
    static ref PMCID_BARE_REGEX: Regex = Regex::new(r"(?i)^(?:pmcid:\s*)?pmc(?P<value>\d+)$").unwrap();

    static ref PMID_REGEX: Regex = Regex::new(
        r"(?i)^(?:https?://(?:www\.)?(?:pubmed\.ncbi\.nlm\.nih\.gov|ncbi\.nlm\.nih\.gov/pubmed)/|pmid:\s*)(?P<value>\d{1,9})/?$"
    ).unwrap();

    static ref ARXIV_REGEX: Regex = Regex::new(
        r"(?i)^(?:arxiv:\s*|https?://(?:www\.)?arxiv\.org/(?:abs|pdf)/)?(?P<value>\d{4}\.\d{4,5}(?:v\d+)?|[a-z-]+(?:\.[a-z-]{2})?/\d{7}(?:v\d+)?)(?:\.pdf)?$"
    ).unwrap();

    static ref ISBN_REGEX: Regex = Regex::new(
        r"(?i)^(?:isbn(?:-1[03])?:?\s*)?(?P<value>(?:97[89][- ]?)?(?:\d[- ]?){9}[\dx])$"
    ).unwrap();

    static ref ROR_REGEX: Regex = Regex::new(
        r"(?i)^(?:https?://ror\.org/)?(?P<value>0[a-hj-km-np-tv-z0-9]{6}\d{2})$"
    ).unwrap();

    static ref WIKIDATA_REGEX: Regex = Regex::new(
        r"(?i)^(?:https?://(?:www\.)?wikidata\.org/(?:wiki|entity)/)?(?P<value>q\d+)$"
    ).unwrap();
}

fn capture<'a>(regex: &Regex, text: &'a str) -> Option<&'a str> {
    regex
        .captures(text)
        .and_then(|cap| cap.name("value"))
        .map(|m| m.as_str())
}

/// Detects identifier types from bare strings.
///
/// Kinds are tried in priority order and the first match wins. A parser can
/// be restricted to a subset of kinds with [`IdentifierTypeParser::with_kinds`].
///
/// # Examples
/// ```
/// use typed_identifier_parser::{IdentifierKind, IdentifierTypeParser};
///
/// let parser = IdentifierTypeParser::new();
/// let parsed = parser.parse("https://doi.org/10.1234/test").unwrap();
/// assert_eq!(parsed.kind, IdentifierKind::Doi);
/// assert_eq!(parsed.itemvalue, "10.1234/test");
/// assert!(parser.parse("not an identifier").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct IdentifierTypeParser {
    kinds: Vec<IdentifierKind>,
}

impl Default for IdentifierTypeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierTypeParser {
    /// Parser detecting every supported kind.
    pub fn new() -> Self {
        Self {
            kinds: IdentifierKind::all().to_vec(),
        }
    }

    /// Parser detecting only the given kinds, still in priority order.
    pub fn with_kinds(kinds: &[IdentifierKind]) -> Self {
        Self {
            kinds: IdentifierKind::all()
                .iter()
                .copied()
                .filter(|kind| kinds.contains(kind))
                .collect(),
        }
    }

    /// Kinds this parser tries, in order.
    pub fn kinds(&self) -> &[IdentifierKind] {
        &self.kinds
    }

    /// Detect the identifier type of `input`.
    pub fn parse(&self, input: &str) -> Option<ParsedIdentifier> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        self.kinds
            .iter()
            .find_map(|&kind| parse_kind(kind, input).map(|v| ParsedIdentifier::new(kind, v)))
    }
}

fn parse_kind(kind: IdentifierKind, input: &str) -> Option<String> {
    match kind {
        IdentifierKind::Doi => capture(&DOI_REGEX, input).map(clean_doi),
        IdentifierKind::Orcid => capture(&ORCID_REGEX, input)
            .map(str::to_uppercase)
            .filter(|orcid| is_valid_orcid(orcid)),
        IdentifierKind::OpenAlex => capture(&OPENALEX_URL_REGEX, input)
            .or_else(|| capture(&OPENALEX_BARE_REGEX, input))
            .map(str::to_uppercase),
        IdentifierKind::Pmcid => capture(&PMCID_URL_REGEX, input)
            .or_else(|| capture(&PMCID_BARE_REGEX, input))
            .map(|digits| format!("PMC{}", digits)),
        IdentifierKind::Pmid => capture(&PMID_REGEX, input).map(str::to_string),
        IdentifierKind::Arxiv => capture(&ARXIV_REGEX, input).map(str::to_string),
        IdentifierKind::Isbn => capture(&ISBN_REGEX, input)
            .filter(|isbn| is_valid_isbn(isbn))
            .map(normalize_isbn),
        IdentifierKind::Ror => capture(&ROR_REGEX, input).map(str::to_lowercase),
        IdentifierKind::Wikidata => capture(&WIKIDATA_REGEX, input).map(str::to_uppercase),
    }
}
