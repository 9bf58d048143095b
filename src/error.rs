/// Error type shared by the storage, runtime and config layers
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("browser window is not available")]
    NoWindow,

    #[error("document is not available")]
    NoDocument,

    #[error("local storage is not available")]
    StorageUnavailable,

    #[error("storage operation failed: {0}")]
    Storage(String),

    #[error("invalid widget config: {0}")]
    Config(String),

    #[error("failed to install listener: {0}")]
    Listener(String),
}

impl From<WidgetError> for JsValue {
    fn from(err: WidgetError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
