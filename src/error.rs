use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for BehaviorError {
    fn from(value: JsValue) -> Self {
        BehaviorError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
