pub mod error;
pub mod types;

pub use error::{Result, SheetsError};
pub use types::{AppendResponse, UpdateResponse, ValueRange};

use std::time::Duration;

const BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub struct SheetsClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl SheetsClient {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, BASE_URL)
    }

    /// Point the client at a different endpoint. Used by tests.
    pub fn with_base_url(token: String, base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Read a cell range in A1 notation (e.g. `Sheet1!H:I`).
    pub async fn values_get(&self, spreadsheet_id: &str, range: &str) -> Result<ValueRange> {
        let url = format!("{}/{}/values/{}", self.base_url, spreadsheet_id, range);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    /// Overwrite a cell range, letting the backend parse input the way a
    /// typing user would (`USER_ENTERED`).
    pub async fn values_update(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<Vec<String>>,
    ) -> Result<UpdateResponse> {
        let url = format!(
            "{}/{}/values/{}?valueInputOption=USER_ENTERED",
            self.base_url, spreadsheet_id, range
        );
        let resp = self
            .client
            .put(&url)
            .bearer_auth(&self.token)
            .json(&ValueRange::of(values))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    /// Append rows after the last data row of the table the range sits in.
    pub async fn values_append(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<Vec<String>>,
    ) -> Result<AppendResponse> {
        let url = format!(
            "{}/{}/values/{}:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            self.base_url, spreadsheet_id, range
        );
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&ValueRange::of(values))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }
}
