use std::env;

use tracing::info;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Browser
    pub chrome_bin: String,
    pub chromedriver_path: String,
    pub webdriver_port: u16,

    // LinkedIn credentials
    pub linkedin_email: String,
    pub linkedin_password: String,

    // OpenAI
    pub openai_api_key: String,
    pub openai_model: String,

    // Google Sheets
    pub spreadsheet_id: String,
    pub sheets_token: String,
    pub queue_sheet: String,
    pub results_sheet: String,

    // Scraping
    pub element_wait_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            chrome_bin: required_env("GOOGLE_CHROME_BIN"),
            chromedriver_path: required_env("CHROMEDRIVER_PATH"),
            webdriver_port: env::var("WEBDRIVER_PORT")
                .unwrap_or_else(|_| "9515".to_string())
                .parse()
                .expect("WEBDRIVER_PORT must be a number"),
            linkedin_email: required_env("LINKEDIN_EMAIL"),
            linkedin_password: required_env("LINKEDIN_PASSWORD"),
            openai_api_key: required_env("OPENAI_API_KEY"),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4".to_string()),
            spreadsheet_id: required_env("SPREADSHEET_ID"),
            sheets_token: required_env("GOOGLE_SHEETS_TOKEN"),
            queue_sheet: env::var("QUEUE_SHEET").unwrap_or_else(|_| "Sheet1".to_string()),
            results_sheet: env::var("RESULTS_SHEET").unwrap_or_else(|_| "Sheet3".to_string()),
            element_wait_secs: env::var("ELEMENT_WAIT_SECS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .expect("ELEMENT_WAIT_SECS must be a number"),
        }
    }

    /// Log the loaded configuration with credentials left out.
    pub fn log_redacted(&self) {
        info!(
            chrome_bin = %self.chrome_bin,
            chromedriver_path = %self.chromedriver_path,
            webdriver_port = self.webdriver_port,
            linkedin_email = %self.linkedin_email,
            openai_model = %self.openai_model,
            spreadsheet_id = %self.spreadsheet_id,
            queue_sheet = %self.queue_sheet,
            results_sheet = %self.results_sheet,
            element_wait_secs = self.element_wait_secs,
            "Configuration loaded"
        );
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
