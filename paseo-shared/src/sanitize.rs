//! Sanitizers matching what the storefront applies to checkout input before it is stored.

use regex::Regex;
use std::sync::LazyLock;

/// A submitted value is empty when it is missing, `""` or `"0"`.
pub fn is_empty_value(value: Option<&str>) -> bool {
    matches!(value, None | Some("") | Some("0"))
}

/// Plain-text sanitization: markup stripped, whitespace collapsed, percent-encoded octets
/// removed, result trimmed.
pub fn sanitize_text_field(input: &str) -> String {
    let mut filtered = if input.contains('<') {
        strip_all_tags(&escape_lone_less_than(input))
    } else {
        input.to_string()
    };

    filtered = WHITESPACE_RE.replace_all(&filtered, " ").trim().to_string();

    let mut found = false;
    while OCTET_RE.is_match(&filtered) {
        filtered = OCTET_RE.replace_all(&filtered, "").into_owned();
        found = true;
    }
    if found {
        filtered = SPACE_RUN_RE.replace_all(&filtered, " ").trim().to_string();
    }

    filtered
}

/// Email normalization. Returns an empty string when nothing address-like survives.
pub fn sanitize_email(input: &str) -> String {
    if input.len() < 6 {
        return String::new();
    }
    // '@' must exist and not be the first character
    let (local, domain) = match input.split_once('@') {
        Some((local, domain)) if !local.is_empty() => (local, domain),
        _ => return String::new(),
    };

    let local = LOCAL_PART_RE.replace_all(local, "");
    if local.is_empty() {
        return String::new();
    }

    let domain = DOT_RUN_RE.replace_all(domain, "");
    let domain = domain.trim_matches(|c: char| is_php_trim_char(c) || c == '.');
    if domain.is_empty() || !domain.contains('.') {
        return String::new();
    }

    let labels: Vec<String> = domain
        .split('.')
        .map(|label| {
            let label = label.trim_matches(|c: char| is_php_trim_char(c) || c == '-');
            DOMAIN_LABEL_RE.replace_all(label, "").into_owned()
        })
        .filter(|label| !label.is_empty())
        .collect();

    if labels.len() < 2 {
        return String::new();
    }

    format!("{}@{}", local, labels.join("."))
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t ]+").expect("valid regex"));
static SPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").expect("valid regex"));
static OCTET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)%[a-f0-9]{2}").expect("valid regex"));
/// A `<` and whatever follows it up to the next `<` or `>`; without the `>` it is not a tag.
static LESS_THAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]*>?").expect("valid regex"));
static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script[^>]*?>.*?</script>|<style[^>]*?>.*?</style>").expect("valid regex")
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static LOCAL_PART_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9!#$%&'*+/=?^_`{|}~.-]").expect("valid regex"));
static DOT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{2,}").expect("valid regex"));
static DOMAIN_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[^a-z0-9-]+").expect("valid regex"));

fn is_php_trim_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B')
}

fn escape_lone_less_than(input: &str) -> String {
    LESS_THAN_RE
        .replace_all(input, |caps: &regex::Captures| {
            let text = &caps[0];
            if text.ends_with('>') {
                text.to_string()
            } else {
                escape_html(text)
            }
        })
        .into_owned()
}

/// Drops script and style elements with their bodies, then every remaining tag.
fn strip_all_tags(input: &str) -> String {
    let without_bodies = SCRIPT_STYLE_RE.replace_all(input, "");
    TAG_RE.replace_all(&without_bodies, "").into_owned()
}
