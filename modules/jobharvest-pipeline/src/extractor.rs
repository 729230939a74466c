//! Field extraction from rendered post pages.

use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use webdriver_client::{ElementRef, Locator, Session};

const LOGIN_URL: &str = "https://www.linkedin.com/login";

// The feed renders well after the document itself loads, and the home page
// keeps settling for a while after the nav bar lands.
const NAVIGATION_SETTLE: Duration = Duration::from_secs(15);
const LOGIN_SETTLE: Duration = Duration::from_secs(10);
const LOGIN_NAV_WAIT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(500);

const VIEW_JOB_BUTTON: &str =
    r#"//*[@id="fie-impression-container"]/div[3]/div[1]/button[1]/span[2]"#;

/// Post fields and the queries that locate them in the feed DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostField {
    ActorName,
    ActorHeadline,
    ProfileLink,
    PostBody,
    JobHeading,
    JobMeta,
    JobSkills,
}

impl PostField {
    pub fn selector(&self) -> &'static str {
        match self {
            PostField::ActorName => "//span[contains(@class, 'update-components-actor__name')]",
            PostField::ActorHeadline => {
                "//span[contains(@class, 'update-components-actor__description')]"
            }
            PostField::ProfileLink => "//a[contains(@class, 'update-components-actor__meta-link')]",
            PostField::PostBody => "//div[contains(@class, 'update-components-text')]",
            PostField::JobHeading => "//div[contains(@class, 'job-details')]/child::h1",
            PostField::JobMeta => "//div[contains(@class, 'primary-description')]/div/span[@class]",
            PostField::JobSkills => {
                "//div[@id='how-you-match-card-container']/section[2]/div/div/div/div/a"
            }
        }
    }
}

/// Read access to the fields of one post at a time.
#[async_trait]
pub trait PostExtractor: Send + Sync {
    /// Navigate to a post and let the page settle.
    async fn open(&self, url: &str) -> Result<()>;

    /// One field's value, or None when it cannot be located in time.
    async fn field(&self, field: PostField) -> Option<String>;

    /// All values of a repeated field, empty when none appear in time.
    async fn fields(&self, field: PostField) -> Vec<String>;

    /// Click the control that reveals the job details panel.
    async fn expand_details(&self) -> bool;
}

/// Extractor backed by a live browser session.
pub struct BrowserExtractor {
    session: Session,
    element_wait: Duration,
}

impl BrowserExtractor {
    pub fn new(session: Session, element_wait: Duration) -> Self {
        Self {
            session,
            element_wait,
        }
    }

    /// Form login. Fatal on failure: nothing can be scraped without a
    /// signed-in session.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        info!("Logging in");
        self.session
            .navigate(LOGIN_URL)
            .await
            .context("Failed to open the login page")?;

        let username = self
            .wait_for(Locator::Css, "#username")
            .await
            .ok_or_else(|| anyhow!("Username field never appeared"))?;
        self.session
            .clear(&username)
            .await
            .context("Failed to clear the username field")?;
        self.session
            .send_keys(&username, email)
            .await
            .context("Failed to type the email address")?;

        let password_field = self
            .wait_for(Locator::Css, "#password")
            .await
            .ok_or_else(|| anyhow!("Password field never appeared"))?;
        self.session
            .clear(&password_field)
            .await
            .context("Failed to clear the password field")?;
        self.session
            .send_keys(&password_field, password)
            .await
            .context("Failed to type the password")?;

        let submit = self
            .wait_for(Locator::Css, "button.btn__primary--large")
            .await
            .ok_or_else(|| anyhow!("Login button never appeared"))?;
        self.session
            .click(&submit)
            .await
            .context("Failed to click the login button")?;

        self.wait_for_within(Locator::Css, "#global-nav", LOGIN_NAV_WAIT)
            .await
            .ok_or_else(|| {
                anyhow!("Navigation bar never appeared, the credentials may be wrong or a checkpoint is up")
            })?;

        info!("Logged in");
        tokio::time::sleep(LOGIN_SETTLE).await;
        Ok(())
    }

    async fn wait_for(&self, locator: Locator, selector: &str) -> Option<ElementRef> {
        self.wait_for_within(locator, selector, self.element_wait)
            .await
    }

    /// Poll for an element until the deadline. "No such element" keeps the
    /// poll going; any other failure gives up early.
    async fn wait_for_within(
        &self,
        locator: Locator,
        selector: &str,
        timeout: Duration,
    ) -> Option<ElementRef> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.session.find_element(locator, selector).await {
                Ok(element) => return Some(element),
                Err(e) if e.is_no_such_element() => {
                    if Instant::now() >= deadline {
                        debug!(selector, "Element never appeared");
                        return None;
                    }
                }
                Err(e) => {
                    warn!(selector, error = %e, "Element lookup failed");
                    return None;
                }
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl PostExtractor for BrowserExtractor {
    async fn open(&self, url: &str) -> Result<()> {
        info!(url, "Opening post");
        self.session
            .navigate(url)
            .await
            .with_context(|| format!("Failed to navigate to {url}"))?;
        tokio::time::sleep(NAVIGATION_SETTLE).await;
        Ok(())
    }

    async fn field(&self, field: PostField) -> Option<String> {
        let element = self.wait_for(Locator::XPath, field.selector()).await?;
        match field {
            PostField::ProfileLink => match self.session.attribute(&element, "href").await {
                Ok(href) => href,
                Err(e) => {
                    warn!(field = ?field, error = %e, "Attribute read failed");
                    None
                }
            },
            _ => match self.session.text(&element).await {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(field = ?field, error = %e, "Text read failed");
                    None
                }
            },
        }
    }

    async fn fields(&self, field: PostField) -> Vec<String> {
        let deadline = Instant::now() + self.element_wait;
        loop {
            match self.session.find_elements(Locator::XPath, field.selector()).await {
                Ok(elements) if !elements.is_empty() => {
                    let mut texts = Vec::with_capacity(elements.len());
                    for element in &elements {
                        match self.session.text(element).await {
                            Ok(text) => texts.push(text),
                            Err(e) => warn!(field = ?field, error = %e, "Text read failed"),
                        }
                    }
                    return texts;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(field = ?field, error = %e, "Element list lookup failed");
                    return Vec::new();
                }
            }
            if Instant::now() >= deadline {
                debug!(field = ?field, "No elements appeared before the deadline");
                return Vec::new();
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn expand_details(&self) -> bool {
        let Some(button) = self.wait_for(Locator::XPath, VIEW_JOB_BUTTON).await else {
            debug!("View job button not found");
            return false;
        };
        match self.session.click(&button).await {
            Ok(()) => true,
            Err(e) => {
                // Overlays intercept this click now and then.
                warn!(error = %e, "View job button click failed");
                false
            }
        }
    }
}
