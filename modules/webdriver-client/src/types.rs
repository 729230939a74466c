use serde::Deserialize;
use serde_json::Value;

/// The W3C-mandated key under which element references appear in responses.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Every WebDriver response body wraps its payload in a `value` field.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueWrapper<T> {
    pub value: T,
}

/// Payload of a successful `POST /session` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionValue {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(default)]
    pub capabilities: Value,
}

/// Payload of an error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorValue {
    pub error: String,
    pub message: String,
}

/// Payload of `GET /status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusValue {
    pub ready: bool,
    #[serde(default)]
    pub message: String,
}

/// A remote element handle, valid for the lifetime of its session.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementRef {
    #[serde(rename = "element-6066-11e4-a52e-4f735466cecf")]
    pub element_id: String,
}

/// Element location strategies accepted by the find commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    XPath,
    Css,
}

impl Locator {
    pub fn strategy(&self) -> &'static str {
        match self {
            Locator::XPath => "xpath",
            Locator::Css => "css selector",
        }
    }
}
