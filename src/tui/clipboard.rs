//! Clipboard helper for copying a shortened URL to the system clipboard
//!
//! Uses `arboard` for cross-platform support. The clipboard handle is
//! created fresh per call and dropped immediately afterwards, so no
//! resource outlives the copy itself (the scoped-carrier contract).

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard.
///
/// Common failure cases: no display server (headless Linux), permission
/// denied. Failures are reported to the caller; nothing is retried.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}
