use serde::{Deserialize, Serialize};

/// A block of cell values as read from or written to the values endpoints.
/// The default FORMATTED_VALUE render option returns every cell as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(rename = "majorDimension", skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    /// Omitted entirely by the API when the requested range holds no data.
    /// Rows are ragged: trailing empty cells are dropped.
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

impl ValueRange {
    pub fn of(values: Vec<Vec<String>>) -> Self {
        Self {
            range: None,
            major_dimension: None,
            values,
        }
    }
}

/// Result of a `values.update` call.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResponse {
    #[serde(rename = "spreadsheetId")]
    pub spreadsheet_id: String,
    #[serde(rename = "updatedRange")]
    pub updated_range: Option<String>,
    #[serde(rename = "updatedRows", default)]
    pub updated_rows: u32,
    #[serde(rename = "updatedColumns", default)]
    pub updated_columns: u32,
    #[serde(rename = "updatedCells", default)]
    pub updated_cells: u32,
}

/// Result of a `values.append` call.
#[derive(Debug, Clone, Deserialize)]
pub struct AppendResponse {
    #[serde(rename = "spreadsheetId")]
    pub spreadsheet_id: String,
    #[serde(rename = "tableRange")]
    pub table_range: Option<String>,
    pub updates: UpdateResponse,
}
