//! Plain-text rendering of a load outcome.

use crate::feed::LoadState;
use crate::models::NewsItem;
use std::fmt::Write;

/// Shown when a load delivers zero items or fails for a non-network reason.
pub const NO_NEWS: &str = "No corresponding news found.";
/// Shown when the server could not be reached.
pub const NO_CONNECTION: &str = "No internet connection.";

/// Render `state` as the terminal would show it.
pub fn render(state: &LoadState) -> String {
    match state {
        LoadState::Idle => String::new(),
        LoadState::Fetching => "Loading…\n".to_string(),
        LoadState::Delivered(items) if items.is_empty() => format!("{NO_NEWS}\n"),
        LoadState::Delivered(items) => render_items(items),
        LoadState::Failed(e) if e.is_network() => format!("{NO_CONNECTION}\n"),
        LoadState::Failed(e) => format!("{NO_NEWS} ({e})\n"),
    }
}

fn render_items(items: &[NewsItem]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{:>2}. {}", i + 1, item.title);
        let _ = writeln!(out, "    [{}] {}", item.section_name, item.web_url);
        if item.has_image() {
            let _ = writeln!(out, "    image: {}", item.image_url);
        }
    }
    out
}
