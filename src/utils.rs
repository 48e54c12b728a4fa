//! Helpers for text normalisation, log-friendly truncation, and output
//! directory checks.

use itertools::Itertools;
use scraper::ElementRef;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Elements whose text never shows up on the rendered page.
pub const NON_VISIBLE: [&str; 3] = ["script", "style", "noscript"];

/// Collapse all whitespace runs across `pieces` into single spaces and trim
/// the ends.
pub fn normalize_text<'a>(pieces: impl IntoIterator<Item = &'a str>) -> String {
    pieces.into_iter().flat_map(str::split_whitespace).join(" ")
}

/// Normalised text of `element`, ignoring anything nested inside one of the
/// `excluded` tag names.
pub fn text_excluding(element: ElementRef<'_>, excluded: &[&str]) -> String {
    text_where(element, |ancestor| excluded.contains(&ancestor.value().name()))
}

/// Normalised text of `element` with the subtree of `removed` left out.
pub fn text_without(element: ElementRef<'_>, removed: ElementRef<'_>) -> String {
    let removed = removed.id();
    text_where(element, |ancestor| ancestor.id() == removed)
}

fn text_where(element: ElementRef<'_>, hides: impl Fn(ElementRef<'_>) -> bool) -> String {
    let root = element.id();
    let pieces = element.descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let hidden = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != root)
            .filter_map(ElementRef::wrap)
            .any(&hides);
        (!hidden).then_some(&**text)
    });
    normalize_text(pieces)
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to a char
/// boundary) with `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and removes a scratch file.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn ensure_writable_dir(path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
    let path = path.as_ref();
    fs::create_dir_all(path).await?;
    // Try a small sync write using std fs (simpler error surface)
    let scratch_path = path.join(".newswire_write_check");
    stdfs::File::create(&scratch_path)?;
    let _ = stdfs::remove_file(&scratch_path);
    info!("Output directory is writable");
    Ok(())
}
