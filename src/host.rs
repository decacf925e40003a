//! The window-level services the client needs from its embedding: modal
//! dialogs, page redirects and file downloads.

/// Browser-window services.
///
/// `alert`, `confirm` and `prompt` block the calling handler the same way the
/// browser dialogs do.
pub trait Host {
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
    fn prompt(&self, message: &str) -> Option<String>;
    /// Leave the single-page app for another page (e.g. the login page).
    fn redirect(&self, location: &str);
    /// Offer a downloaded file to the user.
    fn save_file(&self, file_name: &str, bytes: &[u8]);
}

/// Host that answers every dialog affirmatively and logs everything.
///
/// Useful for headless runs where no user is present.
#[derive(Debug, Default)]
pub struct LoggingHost;

impl Host for LoggingHost {
    fn alert(&self, message: &str) {
        tracing::info!(message, "alert");
    }

    fn confirm(&self, message: &str) -> bool {
        tracing::info!(message, "confirm (auto-accepted)");
        true
    }

    fn prompt(&self, message: &str) -> Option<String> {
        tracing::info!(message, "prompt (no input available)");
        None
    }

    fn redirect(&self, location: &str) {
        tracing::info!(location, "redirect");
    }

    fn save_file(&self, file_name: &str, bytes: &[u8]) {
        tracing::info!(file_name, size = bytes.len(), "save file");
    }
}
