use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use jobharvest_common::Config;
use jobharvest_pipeline::browser::Browser;
use jobharvest_pipeline::enricher::OpenAiEnricher;
use jobharvest_pipeline::extractor::BrowserExtractor;
use jobharvest_pipeline::pipeline::Pipeline;
use jobharvest_pipeline::stats::RunStats;
use jobharvest_pipeline::store::SheetStore;
use openai_client::OpenAIClient;
use sheets_client::SheetsClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("jobharvest_pipeline=info".parse()?)
                .add_directive("jobharvest_common=info".parse()?),
        )
        .init();

    info!("Job harvest starting...");

    // Load config
    let config = Config::from_env();
    config.log_redacted();

    // Start the browser. Whatever happens after this point, it comes down
    // again before the process exits.
    let browser = Browser::launch(&config).await?;
    let outcome = run(&config, &browser).await;
    if let Err(e) = browser.close().await {
        warn!(error = %e, "Browser teardown failed");
    }

    let stats = outcome?;
    info!("Harvest run complete. {stats}");
    Ok(())
}

async fn run(config: &Config, browser: &Browser) -> Result<RunStats> {
    let extractor = BrowserExtractor::new(
        browser.session().clone(),
        Duration::from_secs(config.element_wait_secs),
    );

    // Sign in before touching the queue; nothing is readable logged out.
    extractor
        .login(&config.linkedin_email, &config.linkedin_password)
        .await
        .context("Login failed")?;

    let store = SheetStore::new(
        SheetsClient::new(config.sheets_token.clone()),
        config.spreadsheet_id.clone(),
        config.queue_sheet.clone(),
        config.results_sheet.clone(),
    );
    let enricher = OpenAiEnricher::new(
        OpenAIClient::new(config.openai_api_key.clone()),
        config.openai_model.clone(),
    );

    let pipeline = Pipeline::new(Arc::new(store), Arc::new(extractor), Arc::new(enricher));
    pipeline.run().await
}
