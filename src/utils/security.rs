//! Signature screening for free-text input.
//!
//! This is an acceptance rule layered on top of parameterized statements in the
//! store adapter, not a replacement for them.

use regex::RegexSet;
use std::sync::LazyLock;

static SQL_INJECTION_SIGNATURES: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // quote and comment markers, raw or url-encoded
        r"(?i)(%27)|(')|(--)|(%23)|(#)",
        // statement separators
        r"(?i)(%3B)|(;)",
        // Keywords match whole words only so names like "Union Hall" or
        // "Creative Arts" are accepted.
        r"(?i)\bunion\b.*?\b(select|all)\b",
        r"(?i)\b(select|update|insert|delete|drop|alter|create|truncate)\b",
        r"(?i)(exec\s*\(|char\s*\(|cast\s*\(|convert\s*\(|concat\s*\()",
        // timing attacks
        r"(?i)(waitfor\s*delay|sleep\s*\(|benchmark\s*\()",
        r"(?i)(load_file|outfile|dumpfile)",
        // unicode-encoded quote variants
        r"(?i)(%u0027)|(%u02b9)|(%u02bc)|(%u02c8)",
        r"(?i)%3B\s*(select|insert|update|delete|drop)",
        r"(?i)(--\s*$)|(/\*[\w\W]*?\*/)",
    ])
    .expect("static SQL injection signatures compile")
});

static MARKUP_SIGNATURES: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)<script",
        r"(?i)<iframe",
        r"(?i)<img",
        r"(?i)javascript:",
        r"(?i)\bOR\b.*?[=;]",
        r"(?i)\bUNION\b.*?\bSELECT\b",
        r"(?i)\bDROP\b.*?\bTABLE\b",
        r"(?i)\bALTER\b.*?\bTABLE\b",
        r"(?i)\bDELETE\b.*?\bFROM\b",
    ])
    .expect("static markup signatures compile")
});

pub fn contains_sql_injection(value: &str) -> bool {
    !value.is_empty() && SQL_INJECTION_SIGNATURES.is_match(value)
}

/// Markup and SQL keyword co-occurrence patterns. Applied to school names.
pub fn contains_invalid_characters(value: &str) -> bool {
    MARKUP_SIGNATURES.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes() {
        assert!(!contains_sql_injection("Springfield Elementary"));
        assert!(!contains_sql_injection("742 Evergreen Terrace, Springfield"));
        assert!(!contains_sql_injection("40.7128"));
        assert!(!contains_sql_injection("-74.006"));
        assert!(!contains_sql_injection(""));
    }

    #[test]
    fn test_keywords_need_word_boundaries() {
        assert!(!contains_sql_injection("Selection Road Academy"));
        assert!(!contains_sql_injection("Creative Arts School"));
        assert!(contains_sql_injection("select everything"));
    }

    #[test]
    fn test_sql_injection_signatures() {
        for attack in [
            "1' OR '1'='1",
            "1; DROP TABLE schools",
            "x UNION ALL SELECT password",
            "admin--",
            "/* comment */ 1",
            "1 AND sleep(5)",
            "BENCHMARK(1000000,MD5(1))",
            "load_file('/etc/passwd')",
            "%27%20or%201%3D1",
            "%u0027 or 1",
            "concat(a, b)",
        ] {
            assert!(contains_sql_injection(attack), "not flagged: {attack}");
        }
    }

    #[test]
    fn test_markup_signatures() {
        assert!(contains_invalid_characters("<script>alert(1)</script>"));
        assert!(contains_invalid_characters("<IFRAME src=x>"));
        assert!(contains_invalid_characters("<img src=x onerror=alert(1)>"));
        assert!(contains_invalid_characters("javascript:alert(1)"));
        assert!(contains_invalid_characters("a or b = c"));
        assert!(!contains_invalid_characters("Oak Ridge High School"));
    }
}
