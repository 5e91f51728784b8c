use crate::repository::parse_timestamp;

/// Escapes the characters that are significant in HTML text and in quoted
/// attribute values.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Formats an ISO-8601 timestamp as a short date, e.g. `May 1, 2024`.
pub fn format_date(iso: &str) -> String {
    match parse_timestamp(iso) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}
