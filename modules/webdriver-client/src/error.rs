use thiserror::Error;

pub type Result<T> = std::result::Result<T, WebDriverError>;

#[derive(Debug, Error)]
pub enum WebDriverError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("WebDriver error ({error}): {message}")]
    Protocol { error: String, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl WebDriverError {
    /// True when the remote end reported the W3C "no such element" error code.
    /// Callers polling for an element treat this as "not present yet".
    pub fn is_no_such_element(&self) -> bool {
        matches!(self, WebDriverError::Protocol { error, .. } if error == "no such element")
    }
}

impl From<reqwest::Error> for WebDriverError {
    fn from(err: reqwest::Error) -> Self {
        WebDriverError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for WebDriverError {
    fn from(err: serde_json::Error) -> Self {
        WebDriverError::Parse(err.to_string())
    }
}
