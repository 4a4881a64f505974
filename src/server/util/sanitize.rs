//! Input sanitizing applied to free text before it is stored.

/// Replaces HTML significant characters with entities.
///
/// Covers `& < > " ' / \``.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes then trims surrounding whitespace.
pub fn clean(input: &str) -> String {
    escape(input).trim().to_string()
}

pub fn clean_opt(input: Option<&str>) -> Option<String> {
    input.map(clean)
}
