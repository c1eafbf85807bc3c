//! Content line folding (RFC 5545 §3.1).

const MAX_LINE_OCTETS: usize = 75;

/// Terminates `line` with CRLF, folding it so no physical line exceeds 75
/// octets. Continuation lines start with a single space and never split a
/// UTF-8 sequence.
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return format!("{line}\r\n");
    }

    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3 + 2);
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(c);
        width += len;
    }
    out.push_str("\r\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unfold(s: &str) -> String {
        s.replace("\r\n ", "").trim_end_matches("\r\n").to_string()
    }

    #[test]
    fn short_line_gets_crlf() {
        assert_eq!(fold_line("SUMMARY:Run"), "SUMMARY:Run\r\n");
        let exact = "X".repeat(75);
        assert_eq!(fold_line(&exact), format!("{exact}\r\n"));
    }

    #[test]
    fn long_line_folds_at_75_octets() {
        let line = "A".repeat(80);
        let folded = fold_line(&line);
        let lines: Vec<&str> = folded.split("\r\n").filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 75);
        assert_eq!(lines[1], format!(" {}", "A".repeat(5)));
        assert_eq!(unfold(&folded), line);
    }

    #[test]
    fn folding_keeps_multibyte_characters_whole() {
        let line = format!("SUMMARY:{}", "Běh ".repeat(30));
        let folded = fold_line(&line);
        for physical in folded.split("\r\n") {
            assert!(physical.len() <= 75);
        }
        assert_eq!(unfold(&folded), line);
    }
}
