//! Helpers for logging locale text on a single line.
//!
//! Quest descriptions and composed prefixes contain `\n` and `\t`; printing
//! them raw splits one log record over many lines.

/// Default number of characters kept by [`escape_log`].
pub const MAX_PREVIEW: usize = 300;

/// Escape control characters and cap the result at [`MAX_PREVIEW`] characters.
pub fn escape_log(s: &str) -> String {
    preview(s, MAX_PREVIEW)
}

/// Escape `\n`, `\r`, `\t` and backslashes, render other control characters
/// as `\xNN`, and truncate after `max_chars` characters with an ellipsis.
pub fn preview(s: &str, max_chars: usize) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(s.len().min(max_chars) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= max_chars {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composed_prefix_stays_on_one_line() {
        let prefix = "Requires Key(s):\n\tDorm 114 Key\n\nLeads to: Nothing";
        assert_eq!(
            escape_log(prefix),
            "Requires Key(s):\\n\\tDorm 114 Key\\n\\nLeads to: Nothing"
        );
    }

    #[test]
    fn truncates_long_descriptions() {
        let long = "a".repeat(20);
        assert_eq!(preview(&long, 5), "aaaaa…");
        assert_eq!(preview("abc", 5), "abc");
    }
}
