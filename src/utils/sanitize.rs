use crate::domain::model::PaginationSpec;
use serde_json::Value;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Reads a real number out of a JSON number or a numeric string.
///
/// NaN is treated as unparseable; infinities parse and are left to range checks.
pub fn parse_real(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    (!parsed.is_nan()).then_some(parsed)
}

fn parse_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    trimmed.parse::<i64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}

/// Parses `value` as a real number and clamps it into `[min, max]`,
/// falling back to `fallback` when it does not parse.
pub fn sanitize_numeric_param(value: &Value, fallback: f64, min: f64, max: f64) -> f64 {
    match parse_real(value) {
        Some(parsed) => parsed.clamp(min, max),
        None => fallback,
    }
}

/// Never fails: malformed or non-positive input falls back to the defaults and
/// `limit` is capped at [`MAX_LIMIT`].
pub fn sanitize_pagination_params(page: Option<&str>, limit: Option<&str>) -> PaginationSpec {
    let page = page
        .and_then(parse_integer)
        .filter(|p| *p >= 1)
        .unwrap_or(DEFAULT_PAGE);
    let limit = limit
        .and_then(parse_integer)
        .filter(|l| *l >= 1)
        .unwrap_or(DEFAULT_LIMIT);

    PaginationSpec::new(page, limit)
}

/// Escapes markup and quote characters and trims surrounding whitespace.
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.trim().chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '\\' => escaped.push_str("&#92;"),
            '`' => escaped.push_str("&#96;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_numeric_param() {
        assert_eq!(sanitize_numeric_param(&json!("12.5"), 0.0, -90.0, 90.0), 12.5);
        assert_eq!(sanitize_numeric_param(&json!(120), 0.0, -90.0, 90.0), 90.0);
        assert_eq!(sanitize_numeric_param(&json!("-500"), 0.0, -90.0, 90.0), -90.0);
        assert_eq!(sanitize_numeric_param(&json!("abc"), 7.0, -90.0, 90.0), 7.0);
        assert_eq!(sanitize_numeric_param(&Value::Null, 7.0, -90.0, 90.0), 7.0);
        assert_eq!(sanitize_numeric_param(&json!("NaN"), 1.0, -90.0, 90.0), 1.0);
    }

    #[test]
    fn test_pagination_defaults() {
        let spec = sanitize_pagination_params(None, None);
        assert_eq!((spec.page(), spec.limit(), spec.offset()), (1, 10, 0));
    }

    #[test]
    fn test_pagination_never_fails() {
        let inputs = [
            "abc",
            "-5",
            "0",
            "1e30",
            "99999999999999999999999",
            "",
            "  7 ",
            "2.9",
            "-0.5",
            "NaN",
        ];
        for page in inputs {
            for limit in inputs {
                let spec = sanitize_pagination_params(Some(page), Some(limit));
                assert!(spec.page() >= 1, "page {page} / limit {limit}");
                assert!((1..=MAX_LIMIT).contains(&spec.limit()), "page {page} / limit {limit}");
                assert!(spec.offset() >= 0);
            }
        }
    }

    #[test]
    fn test_pagination_values() {
        let spec = sanitize_pagination_params(Some("3"), Some("500"));
        assert_eq!((spec.page(), spec.limit(), spec.offset()), (3, 100, 200));

        let spec = sanitize_pagination_params(Some("-2"), Some("x"));
        assert_eq!((spec.page(), spec.limit()), (1, 10));

        let spec = sanitize_pagination_params(Some("2.9"), Some(" 25 "));
        assert_eq!((spec.page(), spec.limit(), spec.offset()), (2, 25, 25));
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(
            escape_text("  <b>\"Tom\" & 'Jerry'</b> \\ `x`  "),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt; &#92; &#96;x&#96;"
        );
        assert_eq!(escape_text("Plain School"), "Plain School");
    }
}
