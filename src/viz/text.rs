//! Text measurement and truncation utilities.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    let per_char = (font_px as f64 * 0.60).max(1.0);
    let max_chars = (max_px as f64 / per_char).floor() as usize;
    truncate_chars(text, max_chars)
}

/// Keep at most `max_chars` characters, ending in `…` when something was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Pad with spaces to `width` characters (char count, not bytes).
pub fn pad_right(text: &str, width: usize) -> String {
    let n = text.chars().count();
    if n >= width {
        text.to_string()
    } else {
        format!("{text}{}", " ".repeat(width - n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("käsekuchen", 5), "käse…");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("abc", 0), "");
        assert_eq!(pad_right("ü", 3), "ü  ");
    }

    #[test]
    fn width_truncation_fits_budget() {
        let s = truncate_to_width("a very long search query about rust", 10, 60);
        assert_eq!(s.chars().count(), 10);
        assert!(s.ends_with('…'));
    }
}
