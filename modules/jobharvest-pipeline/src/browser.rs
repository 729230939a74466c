//! Browser lifetime: driver process, session, teardown.

use std::process::Stdio;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use serde_json::json;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use jobharvest_common::Config;
use webdriver_client::{Session, WebDriverClient};

const STARTUP_WAIT: Duration = Duration::from_secs(10);
const STARTUP_POLL: Duration = Duration::from_millis(200);

/// A running chromedriver and the one session opened against it. Closing
/// tears both down; if close is never reached, dropping kills the driver
/// process and the browser goes with it.
pub struct Browser {
    session: Session,
    driver: Child,
}

impl Browser {
    /// Spawn chromedriver, wait until it accepts commands, open a session.
    pub async fn launch(config: &Config) -> Result<Browser> {
        info!(
            path = %config.chromedriver_path,
            port = config.webdriver_port,
            "Starting chromedriver"
        );

        let driver = Command::new(&config.chromedriver_path)
            .arg(format!("--port={}", config.webdriver_port))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .context("Failed to start chromedriver")?;

        let client = WebDriverClient::new(&format!("http://127.0.0.1:{}", config.webdriver_port));
        wait_until_ready(&client).await?;

        let capabilities = json!({
            "capabilities": {
                "alwaysMatch": {
                    "goog:chromeOptions": {
                        "binary": config.chrome_bin,
                        "args": ["--headless", "--disable-dev-shm-usage", "--no-sandbox"],
                    }
                }
            }
        });
        let session = client
            .new_session(capabilities)
            .await
            .context("Failed to open a browser session")?;

        info!(session_id = %session.id(), "Browser session ready");
        Ok(Browser { session, driver })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// End the session and stop the driver process.
    pub async fn close(mut self) -> Result<()> {
        if let Err(e) = self.session.delete().await {
            warn!(error = %e, "Session delete failed");
        }
        self.driver
            .kill()
            .await
            .context("Failed to stop chromedriver")?;
        info!("Browser closed");
        Ok(())
    }
}

async fn wait_until_ready(client: &WebDriverClient) -> Result<()> {
    let deadline = Instant::now() + STARTUP_WAIT;
    loop {
        match client.status().await {
            Ok(status) if status.ready => {
                debug!("chromedriver ready");
                return Ok(());
            }
            Ok(_) => debug!("chromedriver up but not ready"),
            Err(e) => debug!(error = %e, "chromedriver not answering yet"),
        }
        if Instant::now() >= deadline {
            bail!("chromedriver did not become ready in {STARTUP_WAIT:?}");
        }
        tokio::time::sleep(STARTUP_POLL).await;
    }
}
