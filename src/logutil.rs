//! Keeps player-typed text safe to interpolate into single-line logs.

/// Render a string for logging: control characters become spaces, runs of
/// whitespace collapse, and anything past the preview cap is dropped with
/// an ellipsis.
pub fn clean_log(s: &str) -> String {
    const MAX_PREVIEW: usize = 120;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 1);
    let mut last_space = false;
    for ch in s.chars() {
        if out.len() >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        if ch.is_control() || ch.is_whitespace() {
            if !last_space {
                out.push(' ');
            }
            last_space = true;
        } else {
            out.push(ch);
            last_space = false;
        }
    }
    out.trim_end().to_string()
}
