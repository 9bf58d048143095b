/// masto-share - "Share on Mastodon" widget runtime
/// Built with Rust + WASM

pub mod action;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod preference;
pub mod prompt;
pub mod runtime;
pub mod share;
pub mod shell;
pub mod storage;
pub mod ui;

use error::WidgetError;
use ui::markup::WidgetConfig;
use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Canonical host for arbitrary input; empty when it is not a host
#[wasm_bindgen(js_name = normalizeHost)]
pub fn normalize_host(input: &str) -> String {
    host::normalize_host(input).unwrap_or_default()
}

// Render a widget fragment from a (possibly partial) config object
#[wasm_bindgen(js_name = renderWidget)]
pub fn render_widget(config: JsValue) -> Result<String, JsValue> {
    let config: WidgetConfig = if config.is_undefined() || config.is_null() {
        WidgetConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config).map_err(|e| WidgetError::Config(e.to_string()))?
    };

    Ok(ui::markup::render_widget(&config))
}

// Bind every share widget on the page to the browser's dialogs and storage
#[wasm_bindgen(js_name = startShareWidgets)]
pub fn start_share_widgets() -> Result<(), JsValue> {
    runtime::install(shell::BrowserShell)?;
    Ok(())
}
