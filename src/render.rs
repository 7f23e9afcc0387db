//! Text and JSON rendering of a [`PageView`]

use crate::error::Result;
use crate::pager::PageView;
use std::fmt::Write as _;

/// Message shown when the selected page failed to load
pub const LOAD_ERROR_MESSAGE: &str = "Error: could not load this page";

/// Render a view as plain text
pub fn render_text(view: &PageView) -> String {
    if view.has_error {
        let mut out = String::from(LOAD_ERROR_MESSAGE);
        if let Some(detail) = &view.error {
            let _ = write!(out, " ({detail})");
        }
        out.push('\n');
        let _ = writeln!(out, "Current Page: {}", display_page(view));
        out.push_str(&controls(view));
        out.push('\n');
        return out;
    }

    if view.has_loading {
        return "Loading...\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Total {}", view.total_pages);
    for character in &view.items {
        let _ = writeln!(
            out,
            "#{} {} ({}) {}",
            character.id, character.name, character.gender, character.image_url
        );
    }
    if view.is_background_refreshing {
        out.push_str("Updating...\n");
    }
    let _ = writeln!(out, "Current Page: {}", display_page(view));
    out.push_str(&controls(view));
    out.push('\n');
    out
}

// One-based; widened so the last index still renders.
fn display_page(view: &PageView) -> u64 {
    u64::from(view.current_page_index) + 1
}

fn controls(view: &PageView) -> String {
    let previous = if view.has_previous {
        "[p] Previous Page"
    } else {
        "[ ] Previous Page (disabled)"
    };
    let next = if view.has_next {
        "[n] Next Page"
    } else {
        "[ ] Next Page (disabled)"
    };
    format!("{previous}  {next}  [q] Quit")
}

/// Render a view as a single JSON line
pub fn render_json(view: &PageView) -> Result<String> {
    Ok(serde_json::to_string(view)?)
}
