use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string, in terminal columns.
pub(crate) fn str_width(s: &str) -> usize {
    s.width()
}

/// Truncate `s` so that it displays in at most `width` columns.
///
/// A double-width character that straddles the boundary is dropped entirely.
pub(crate) fn trim_width(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (i, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            return &s[..i];
        }
        used += w;
    }
    s
}

/// The `[low, high)` window of `height` rows over `total` rows that keeps
/// `selected` roughly centered without running past either end.
pub(crate) fn scroll_window(selected: usize, total: usize, height: usize) -> (usize, usize) {
    if total <= height {
        return (0, total);
    }
    let low = selected
        .saturating_sub(height / 2)
        .min(total - height);
    (low, low + height)
}

/// Force `s` to display in exactly `width` columns, truncating or padding
/// with spaces as needed.
pub(crate) fn force_width(s: &str, width: usize) -> String {
    let trimmed = trim_width(s, width);
    let mut out = String::with_capacity(trimmed.len() + width);
    out.push_str(trimmed);
    for _ in str_width(trimmed)..width {
        out.push(' ');
    }
    out
}
