//! Spreadsheet-backed work queue and result log.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use jobharvest_common::{PostRecord, RowStatus, WorkItem};
use sheets_client::SheetsClient;

// Queue layout: post links in column H, status cells beside them in column I.
const URL_COLUMN: &str = "H";
const STATUS_COLUMN: &str = "I";

/// Where work comes from and results go.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The full queue, one item per physical row, in sheet order.
    async fn read_queue(&self) -> Result<Vec<WorkItem>>;

    /// Overwrite one row's status cell.
    async fn update_status(&self, row_index: u32, status: &RowStatus) -> Result<()>;

    /// Append one result row, writing the header first when the table is empty.
    async fn append_record(&self, record: &PostRecord) -> Result<()>;
}

pub struct SheetStore {
    client: SheetsClient,
    spreadsheet_id: String,
    queue_sheet: String,
    results_sheet: String,
}

impl SheetStore {
    pub fn new(
        client: SheetsClient,
        spreadsheet_id: String,
        queue_sheet: String,
        results_sheet: String,
    ) -> Self {
        Self {
            client,
            spreadsheet_id,
            queue_sheet,
            results_sheet,
        }
    }

    fn header_range(&self) -> String {
        format!("{}!A1:G1", self.results_sheet)
    }
}

#[async_trait]
impl RecordStore for SheetStore {
    async fn read_queue(&self) -> Result<Vec<WorkItem>> {
        let range = format!("{}!{}:{}", self.queue_sheet, URL_COLUMN, STATUS_COLUMN);
        let data = self
            .client
            .values_get(&self.spreadsheet_id, &range)
            .await
            .context("Failed to read the work queue")?;

        // Row 1 is the header. Ragged and empty rows keep their position so
        // every item's row index lines up with the sheet.
        let items: Vec<WorkItem> = data
            .values
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, row)| WorkItem {
                row_index: (i + 1) as u32,
                url: row
                    .first()
                    .map(|cell| cell.trim().to_string())
                    .unwrap_or_default(),
                status: row
                    .get(1)
                    .map(|cell| RowStatus::from_cell(cell))
                    .unwrap_or(RowStatus::Empty),
            })
            .collect();

        info!(count = items.len(), "Work queue loaded");
        Ok(items)
    }

    async fn update_status(&self, row_index: u32, status: &RowStatus) -> Result<()> {
        let range = format!("{}!{}{}", self.queue_sheet, STATUS_COLUMN, row_index);
        self.client
            .values_update(&self.spreadsheet_id, &range, vec![vec![status.to_string()]])
            .await
            .with_context(|| format!("Failed to write status for row {row_index}"))?;

        info!(row = row_index, status = %status, "Status updated");
        Ok(())
    }

    async fn append_record(&self, record: &PostRecord) -> Result<()> {
        let existing = self
            .client
            .values_get(&self.spreadsheet_id, &self.header_range())
            .await
            .context("Failed to check the results header")?;

        if existing.values.is_empty() {
            self.client
                .values_append(
                    &self.spreadsheet_id,
                    &self.header_range(),
                    vec![PostRecord::header_row()],
                )
                .await
                .context("Failed to write the results header")?;
            info!(sheet = %self.results_sheet, "Results header written");
        }

        let resp = self
            .client
            .values_append(&self.spreadsheet_id, &self.header_range(), vec![record.to_row()])
            .await
            .context("Failed to append the result row")?;

        info!(
            cells = resp.updates.updated_cells,
            url = %record.original_url,
            "Result row appended"
        );
        Ok(())
    }
}
