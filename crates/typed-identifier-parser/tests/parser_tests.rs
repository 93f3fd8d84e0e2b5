//! Identifier type detection integration tests

use rstest::rstest;
use typed_identifier_parser::{IdentifierKind, IdentifierTypeParser};

#[rstest]
#[case("https://doi.org/10.1234/test", IdentifierKind::Doi, "10.1234/test")]
#[case("DOI:10.1126/science.1234567", IdentifierKind::Doi, "10.1126/science.1234567")]
#[case("https://orcid.org/0000-0002-1825-0097", IdentifierKind::Orcid, "0000-0002-1825-0097")]
#[case("0000-0001-5109-3700", IdentifierKind::Orcid, "0000-0001-5109-3700")]
#[case("https://openalex.org/W123", IdentifierKind::OpenAlex, "W123")]
#[case("https://openalex.org/authors/a5023888391", IdentifierKind::OpenAlex, "A5023888391")]
#[case("W2741809807", IdentifierKind::OpenAlex, "W2741809807")]
#[case("https://www.ncbi.nlm.nih.gov/pmc/articles/123", IdentifierKind::Pmcid, "PMC123")]
#[case("https://pmc.ncbi.nlm.nih.gov/articles/PMC8271234/", IdentifierKind::Pmcid, "PMC8271234")]
#[case("PMC8271234", IdentifierKind::Pmcid, "PMC8271234")]
#[case("https://pubmed.ncbi.nlm.nih.gov/34253230", IdentifierKind::Pmid, "34253230")]
#[case("PMID: 34253230", IdentifierKind::Pmid, "34253230")]
#[case("arXiv:2301.12345", IdentifierKind::Arxiv, "2301.12345")]
#[case("https://arxiv.org/abs/1905.07890v2", IdentifierKind::Arxiv, "1905.07890v2")]
#[case("cond-mat/9901001", IdentifierKind::Arxiv, "cond-mat/9901001")]
#[case("ISBN 978-0-321-12521-7", IdentifierKind::Isbn, "9780321125217")]
#[case("0-306-40615-2", IdentifierKind::Isbn, "0306406152")]
#[case("https://ror.org/03v76x132", IdentifierKind::Ror, "03v76x132")]
#[case("https://www.wikidata.org/wiki/Q42", IdentifierKind::Wikidata, "Q42")]
fn test_detects_kind(#[case] input: &str, #[case] kind: IdentifierKind, #[case] value: &str) {
    let parsed = IdentifierTypeParser::new()
        .parse(input)
        .unwrap_or_else(|| panic!("expected {} for {}", kind, input));

    assert_eq!(parsed.kind, kind);
    assert_eq!(parsed.itemtype(), kind.as_str());
    assert_eq!(parsed.itemvalue, value);
}

#[rstest]
#[case("")]
#[case("12345")]
#[case("univ-12345")]
#[case("A-1234-2020")]
#[case("https://example.org/W123")]
#[case("0306406151")] // bad ISBN checksum
#[case("0000-0002-1825-0098")] // bad ORCID checksum
#[case("John Doe")]
fn test_rejects_unrecognized(#[case] input: &str) {
    assert!(IdentifierTypeParser::new().parse(input).is_none());
}

#[test]
fn test_priority_prefers_doi() {
    // A doi.org URL is never mistaken for a later kind
    let parsed = IdentifierTypeParser::new()
        .parse("https://doi.org/10.48550/arXiv.2301.12345")
        .unwrap();
    assert_eq!(parsed.kind, IdentifierKind::Doi);
    assert_eq!(parsed.itemvalue, "10.48550/arXiv.2301.12345");
}

#[test]
fn test_parsed_identifier_serializes() {
    let parsed = IdentifierTypeParser::new().parse("Q42").unwrap();
    let json = serde_json::to_value(&parsed).unwrap();
    assert_eq!(json["kind"], "wikidata");
    assert_eq!(json["itemvalue"], "Q42");
}
