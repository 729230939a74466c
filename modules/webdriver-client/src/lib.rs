pub mod error;
pub mod types;

pub use error::{Result, WebDriverError};
pub use types::{ElementRef, Locator, ELEMENT_KEY};

use std::time::Duration;

use serde_json::{json, Value};

use types::{ErrorValue, SessionValue, StatusValue, ValueWrapper};

#[derive(Clone)]
pub struct WebDriverClient {
    client: reqwest::Client,
    base_url: String,
}

impl WebDriverClient {
    pub fn new(base_url: &str) -> Self {
        // Navigation commands block until the page finishes loading, so the
        // transport timeout is far looser than a normal API client's.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(180))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Whether the remote end is ready to accept a new session.
    pub async fn status(&self) -> Result<StatusValue> {
        let url = format!("{}/status", self.base_url);
        let value = self.command(self.client.get(&url)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Create a session with the given W3C capabilities object.
    pub async fn new_session(&self, capabilities: Value) -> Result<Session> {
        let url = format!("{}/session", self.base_url);
        let value = self.command(self.client.post(&url).json(&capabilities)).await?;
        let session: SessionValue = serde_json::from_value(value)?;
        tracing::debug!(session_id = %session.session_id, "WebDriver session created");

        Ok(Session {
            driver: self.clone(),
            session_id: session.session_id,
        })
    }

    /// Send one command and unwrap the `value` envelope. Failures reported by
    /// the driver carry a W3C error code; anything else (proxies, crashes)
    /// is surfaced with the raw HTTP status instead.
    async fn command(&self, req: reqwest::RequestBuilder) -> Result<Value> {
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ValueWrapper<ErrorValue>>(&body) {
                Ok(wrapper) => WebDriverError::Protocol {
                    error: wrapper.value.error,
                    message: wrapper.value.message,
                },
                Err(_) => WebDriverError::Protocol {
                    error: format!("http status {}", status.as_u16()),
                    message: body,
                },
            });
        }

        let wrapper: ValueWrapper<Value> = serde_json::from_str(&body)?;
        Ok(wrapper.value)
    }
}

/// One live browsing session. All commands are scoped to its session id.
/// Clones share the session; deleting it through any handle ends it for all.
#[derive(Clone)]
pub struct Session {
    driver: WebDriverClient,
    session_id: String,
}

impl Session {
    pub fn id(&self) -> &str {
        &self.session_id
    }

    fn url(&self, suffix: &str) -> String {
        format!(
            "{}/session/{}{}",
            self.driver.base_url, self.session_id, suffix
        )
    }

    /// Navigate to a URL. Returns once the page load completes.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        let endpoint = self.url("/url");
        let body = json!({ "url": url });
        self.driver
            .command(self.driver.client.post(&endpoint).json(&body))
            .await?;
        Ok(())
    }

    /// Find the first element matching the selector.
    pub async fn find_element(&self, locator: Locator, selector: &str) -> Result<ElementRef> {
        let endpoint = self.url("/element");
        let body = json!({ "using": locator.strategy(), "value": selector });
        let value = self
            .driver
            .command(self.driver.client.post(&endpoint).json(&body))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Find all elements matching the selector. Empty when none match.
    pub async fn find_elements(&self, locator: Locator, selector: &str) -> Result<Vec<ElementRef>> {
        let endpoint = self.url("/elements");
        let body = json!({ "using": locator.strategy(), "value": selector });
        let value = self
            .driver
            .command(self.driver.client.post(&endpoint).json(&body))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Visible text of an element.
    pub async fn text(&self, element: &ElementRef) -> Result<String> {
        let endpoint = self.url(&format!("/element/{}/text", element.element_id));
        let value = self.driver.command(self.driver.client.get(&endpoint)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// An element attribute, or None when the attribute is absent.
    pub async fn attribute(&self, element: &ElementRef, name: &str) -> Result<Option<String>> {
        let endpoint = self.url(&format!(
            "/element/{}/attribute/{}",
            element.element_id, name
        ));
        let value = self.driver.command(self.driver.client.get(&endpoint)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn click(&self, element: &ElementRef) -> Result<()> {
        let endpoint = self.url(&format!("/element/{}/click", element.element_id));
        self.driver
            .command(self.driver.client.post(&endpoint).json(&json!({})))
            .await?;
        Ok(())
    }

    pub async fn clear(&self, element: &ElementRef) -> Result<()> {
        let endpoint = self.url(&format!("/element/{}/clear", element.element_id));
        self.driver
            .command(self.driver.client.post(&endpoint).json(&json!({})))
            .await?;
        Ok(())
    }

    /// Type text into an element (W3C "element send keys").
    pub async fn send_keys(&self, element: &ElementRef, text: &str) -> Result<()> {
        let endpoint = self.url(&format!("/element/{}/value", element.element_id));
        let body = json!({ "text": text });
        self.driver
            .command(self.driver.client.post(&endpoint).json(&body))
            .await?;
        Ok(())
    }

    /// End the session on the remote end.
    pub async fn delete(&self) -> Result<()> {
        let endpoint = self.url("");
        self.driver
            .command(self.driver.client.delete(&endpoint))
            .await?;
        tracing::debug!(session_id = %self.session_id, "WebDriver session deleted");
        Ok(())
    }
}
