//! Identifier validation functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DOI_PATTERN: Regex = Regex::new(r"^10\.\d{4,9}/\S+$").unwrap();

    // arXiv ID (new format: YYMM.NNNNN, old format: archive/NNNNNNN)
    static ref ARXIV_NEW_PATTERN: Regex = Regex::new(r"^\d{4}\.\d{4,5}(v\d+)?$").unwrap();
    static ref ARXIV_OLD_PATTERN: Regex =
        Regex::new(r"^[a-z-]+(\.[A-Za-z-]{2})?/\d{7}(v\d+)?$").unwrap();

    static ref ORCID_PATTERN: Regex = Regex::new(r"^\d{4}-\d{4}-\d{4}-\d{3}[\dX]$").unwrap();
}

/// Check that a string is a bare DOI (`10.<registrant>/<suffix>`).
pub fn is_valid_doi(doi: &str) -> bool {
    DOI_PATTERN.is_match(doi)
}

/// Check that a string is a bare arXiv ID in either format.
pub fn is_valid_arxiv_id(arxiv_id: &str) -> bool {
    ARXIV_NEW_PATTERN.is_match(arxiv_id) || ARXIV_OLD_PATTERN.is_match(arxiv_id)
}

/// Check an ORCID iD's shape and its ISO 7064 MOD 11-2 check character.
pub fn is_valid_orcid(orcid: &str) -> bool {
    if !ORCID_PATTERN.is_match(orcid) {
        return false;
    }

    let digits: Vec<char> = orcid.chars().filter(|c| *c != '-').collect();
    let (base, check) = digits.split_at(15);

    let total = base
        .iter()
        .filter_map(|c| c.to_digit(10))
        .fold(0u32, |acc, d| (acc + d) * 2);
    let expected = match (12 - total % 11) % 11 {
        10 => 'X',
        n => char::from_digit(n, 10).unwrap_or('?'),
    };

    check[0] == expected
}

/// Check an ISBN-10 or ISBN-13 after removing hyphens and spaces.
pub fn is_valid_isbn(isbn: &str) -> bool {
    let normalized = normalize_isbn(isbn);

    match normalized.len() {
        10 => validate_isbn10(&normalized),
        13 => validate_isbn13(&normalized),
        _ => false,
    }
}

/// Normalize ISBN by removing hyphens and spaces
pub fn normalize_isbn(isbn: &str) -> String {
    isbn.chars()
        .filter(|c| c.is_ascii_digit() || *c == 'X' || *c == 'x')
        .collect::<String>()
        .to_uppercase()
}

/// Remove trailing punctuation a DOI picks up from surrounding text.
pub fn clean_doi(doi: &str) -> String {
    doi.trim_end_matches(['.', ',', ';', ')', ']']).to_string()
}

fn validate_isbn10(isbn: &str) -> bool {
    let chars: Vec<char> = isbn.chars().collect();

    // First 9 are digits, last is digit or X
    for (i, &c) in chars.iter().enumerate() {
        if i < 9 {
            if !c.is_ascii_digit() {
                return false;
            }
        } else if !c.is_ascii_digit() && c != 'X' {
            return false;
        }
    }

    let sum: u32 = chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let value = if c == 'X' { 10 } else { c.to_digit(10).unwrap_or(0) };
            value * (10 - i as u32)
        })
        .sum();

    sum % 11 == 0
}

fn validate_isbn13(isbn: &str) -> bool {
    if !isbn.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let sum: u32 = isbn
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let value = c.to_digit(10).unwrap_or(0);
            if i % 2 == 0 {
                value
            } else {
                value * 3
            }
        })
        .sum();

    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_dois() {
        assert!(is_valid_doi("10.1038/nature12373"));
        assert!(is_valid_doi("10.1126/science.1234567"));
        assert!(is_valid_doi("10.1000/182"));
    }

    #[test]
    fn test_invalid_dois() {
        assert!(!is_valid_doi("11.1038/nature12373")); // Wrong prefix
        assert!(!is_valid_doi("10.12/test")); // Registrant too short
        assert!(!is_valid_doi("nature12373"));
    }

    #[test]
    fn test_valid_arxiv_ids() {
        assert!(is_valid_arxiv_id("2301.12345"));
        assert!(is_valid_arxiv_id("1905.07890v2"));
        assert!(is_valid_arxiv_id("cond-mat/9901001"));
        assert!(is_valid_arxiv_id("math.GT/0309136"));
        assert!(!is_valid_arxiv_id("2301.123"));
    }

    #[test]
    fn test_orcid_checksum() {
        assert!(is_valid_orcid("0000-0002-1825-0097"));
        assert!(is_valid_orcid("0000-0001-5109-3700"));
        assert!(is_valid_orcid("0000-0002-1694-233X"));
        assert!(is_valid_orcid("0000-0000-0000-0001"));
        assert!(!is_valid_orcid("0000-0002-1825-0098"));
        assert!(!is_valid_orcid("0000-0002-1825"));
    }

    #[test]
    fn test_isbn_checksum() {
        assert!(is_valid_isbn("0-306-40615-2"));
        assert!(is_valid_isbn("978-0-321-12521-7"));
        assert!(is_valid_isbn("080442957X"));
        assert!(!is_valid_isbn("0306406151"));
        assert!(!is_valid_isbn("12345"));
    }

    #[test]
    fn test_clean_doi() {
        assert_eq!(clean_doi("10.1038/nature12373."), "10.1038/nature12373");
        assert_eq!(clean_doi("10.1038/nature12373),"), "10.1038/nature12373");
    }
}
