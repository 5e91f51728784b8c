use std::sync::{Mutex, PoisonError};

use mockall::automock;

/// The two page elements the repository browser writes to.
#[automock]
pub trait PageView: Send + Sync {
    /// Replaces the status line text.
    fn set_status(&self, text: &str);

    /// Replaces the inner markup of the list container.
    fn set_list_html(&self, html: &str);
}

/// A `PageView` that keeps the latest status and list markup in memory.
#[derive(Debug, Default)]
pub struct MemoryView {
    status: Mutex<String>,
    list_html: Mutex<String>,
}

impl MemoryView {
    /// The last status text written.
    pub fn status(&self) -> String {
        self.status.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// The last list markup written.
    pub fn list_html(&self) -> String {
        self.list_html.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl PageView for MemoryView {
    fn set_status(&self, text: &str) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = text.to_string();
    }

    fn set_list_html(&self, html: &str) {
        *self.list_html.lock().unwrap_or_else(PoisonError::into_inner) = html.to_string();
    }
}
