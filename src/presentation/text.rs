use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Make server-supplied text safe to draw: escape sequences and control
/// characters are removed, newlines become spaces.
pub fn single_line(s: &str) -> String {
    strip_ansi_escapes::strip_str(s)
        .chars()
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect()
}

/// Cut `s` to at most `max_width` terminal columns, ending in "…" when shortened
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}
