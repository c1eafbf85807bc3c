//! Value escaping for content lines (RFC 5545 §3.3.11, RFC 6868).

/// Escapes a TEXT value: backslash, comma, semicolon and newlines.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Quotes a parameter value when it contains a delimiter, caret-encoding
/// the characters a quoted value cannot carry.
pub fn escape_param_value(s: &str) -> String {
    if !s.chars().any(|c| matches!(c, ':' | ';' | ',' | '"' | '\n')) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '^' => out.push_str("^^"),
            '\n' => out.push_str("^n"),
            '"' => out.push_str("^'"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_escapes_delimiters() {
        assert_eq!(escape_text("Run, easy; 5k"), "Run\\, easy\\; 5k");
        assert_eq!(escape_text("a\\b"), "a\\\\b");
        assert_eq!(escape_text("line1\r\nline2"), "line1\\nline2");
    }

    #[test]
    fn plain_param_is_untouched() {
        assert_eq!(escape_param_value("Europe/Prague"), "Europe/Prague");
    }

    #[test]
    fn param_with_delimiters_is_quoted() {
        assert_eq!(escape_param_value("a:b"), "\"a:b\"");
        assert_eq!(escape_param_value("say \"hi\""), "\"say ^'hi^'\"");
    }
}
