//! Marker-delimited list extraction.
//!
//! A list span starts right after a literal marker (for example
//! `List of Champions:`) and runs to the earliest terminator. The span is
//! comma-split when it contains a comma, otherwise line-split with bullet
//! glyphs stripped.

/// Terminators ordered by no particular priority; the earliest hit wins.
/// `\nList of` stops a span before the next list begins.
const END_MARKERS: [&str; 6] = ["\n\n", "\n[", "\n─", "\nLink:", "\nRegion:", "\nList of"];

/// Extract the items of the list introduced by `start_marker`.
///
/// Absent marker yields an empty vec. Items are trimmed, a single trailing
/// `.` is stripped, and empty or decorative entries are discarded. Source
/// order and duplicates are preserved.
pub fn extract_list(text: &str, start_marker: &str) -> Vec<String> {
    let Some(start) = text.find(start_marker) else {
        return Vec::new();
    };
    let tail = &text[start + start_marker.len()..];
    let end = END_MARKERS
        .iter()
        .filter_map(|marker| tail.find(marker))
        .min()
        .unwrap_or(tail.len());
    let span = tail[..end].trim();

    if span.contains(',') {
        span.split(',')
            .map(str::trim)
            .map(strip_trailing_dot)
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect()
    } else {
        span.lines()
            .map(strip_bullet)
            .map(str::trim)
            .map(strip_trailing_dot)
            .filter(|item| !item.is_empty() && !item.starts_with('─') && !item.starts_with('['))
            .map(ToString::to_string)
            .collect()
    }
}

fn strip_bullet(line: &str) -> &str {
    line.strip_prefix(['•', '-', '*'])
        .map_or(line, str::trim_start)
}

fn strip_trailing_dot(item: &str) -> &str {
    item.strip_suffix('.').unwrap_or(item)
}
