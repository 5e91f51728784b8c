//! The "Cite" dialog for the publication entry.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use mockall::automock;
use thiserror::Error;

/// File name used when the citation is downloaded.
pub const BIBTEX_FILENAME: &str = "sriha-ettireddy-publication.bib";
/// Status after a successful copy.
pub const COPIED_MSG: &str = "Copied to clipboard.";
/// Status after a successful download.
pub const DOWNLOADED_MSG: &str = "Downloaded .bib file.";

/// Failure to write to a clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No clipboard API is present.
    #[error("Clipboard is unavailable")]
    Unavailable,
    /// The write was refused.
    #[error("Clipboard write was rejected: {0}")]
    Rejected(String),
}

/// Failure to save the citation.
#[derive(Debug, Error)]
pub enum CiteError {
    /// The `.bib` file could not be written.
    #[error("Failed to write citation file: {0}")]
    Io(#[from] io::Error),
}

/// A sink for copied text.
#[automock]
pub trait Clipboard: Send + Sync {
    /// Places `text` on the clipboard.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The citation dialog: shows a BibTeX entry and offers copy and download.
pub struct CiteModal {
    bibtex: String,
    clipboard: Arc<dyn Clipboard>,
    // Manual-selection copy used when `clipboard` fails.
    fallback: Arc<dyn Clipboard>,
    open: bool,
    status: String,
}

impl CiteModal {
    /// A closed dialog for `bibtex`. `fallback` is used when `clipboard`
    /// fails.
    pub fn new(bibtex: &str, clipboard: Arc<dyn Clipboard>, fallback: Arc<dyn Clipboard>) -> Self {
        Self { bibtex: bibtex.to_string(), clipboard, fallback, open: false, status: String::new() }
    }

    /// The citation text.
    pub fn bibtex(&self) -> &str {
        &self.bibtex
    }

    /// Whether the dialog is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The status line under the actions.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Shows the dialog.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hides the dialog and clears the status line.
    pub fn close(&mut self) {
        self.open = false;
        self.status.clear();
    }

    /// Copies the citation, falling back to manual selection if the
    /// clipboard refuses it.
    pub fn copy(&mut self) {
        if let Err(e) = self.clipboard.write_text(&self.bibtex) {
            tracing::debug!("Clipboard write failed ({e}); using selection fallback");
            if let Err(e) = self.fallback.write_text(&self.bibtex) {
                tracing::warn!("Selection fallback failed: {e}");
            }
        }
        self.status = COPIED_MSG.to_string();
    }

    /// Writes the citation to [`BIBTEX_FILENAME`] inside `dir`.
    pub fn download(&mut self, dir: &Path) -> Result<PathBuf, CiteError> {
        let path = dir.join(BIBTEX_FILENAME);
        fs::write(&path, &self.bibtex)?;
        tracing::debug!("Wrote citation to {}", path.display());

        self.status = DOWNLOADED_MSG.to_string();
        Ok(path)
    }

    /// Closes the dialog when the click landed on the backdrop itself.
    pub fn on_click(&mut self, on_backdrop: bool) {
        if on_backdrop {
            self.close();
        }
    }

    /// `Escape` closes the dialog.
    pub fn on_key(&mut self, key: &str) {
        if key == "Escape" {
            self.close();
        }
    }
}
