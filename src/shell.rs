/// Blocking dialogs and window opening, the only outward effects of the widget

/// Browser capabilities the dispatcher needs
pub trait Shell {
    /// Blocking text prompt; `None` when the user cancels
    fn prompt(&self, message: &str, default: &str) -> Option<String>;

    /// Blocking notice
    fn alert(&self, message: &str);

    /// Open `url` in a new browsing context with no reference back to this page
    fn open(&self, url: &str);
}

/// [`Shell`] backed by `window.prompt`, `window.alert` and `window.open`
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserShell;

impl Shell for BrowserShell {
    fn prompt(&self, message: &str, default: &str) -> Option<String> {
        let window = web_sys::window()?;
        match window.prompt_with_message_and_default(message, default) {
            Ok(input) => input,
            Err(e) => {
                log::warn!("Prompt failed: {:?}", e);
                None
            }
        }
    }

    fn alert(&self, message: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.alert_with_message(message) {
            log::warn!("Alert failed: {:?}", e);
        }
    }

    fn open(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        // With noopener the call returns null even on success
        if let Err(e) = window.open_with_url_and_target_and_features(url, "_blank", "noopener") {
            log::warn!("Failed to open {}: {:?}", url, e);
        }
    }
}
