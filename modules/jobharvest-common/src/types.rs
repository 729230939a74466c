use serde::{Deserialize, Serialize};

/// Column headers of the results table, in append order.
pub const RESULT_HEADER: [&str; 7] = [
    "Name",
    "Job Title",
    "Profile Link",
    "Info",
    "More info",
    "OpenAI",
    "Original URL",
];

/// Processing state of one queue row, as read from the status column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    Empty,
    Done,
    Error,
    LinkNotFound,
    /// Operator-set text the pipeline does not recognize ("on hold", notes).
    Other(String),
}

impl RowStatus {
    /// Loose parse of a status cell. Matching is case-insensitive;
    /// unrecognized text is kept verbatim.
    pub fn from_cell(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        match trimmed.to_lowercase().as_str() {
            "done" => Self::Done,
            "error" => Self::Error,
            "link not found" => Self::LinkNotFound,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    /// Only completed rows are skipped on later runs. `Error` rows and
    /// operator text leave the row eligible for reprocessing.
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl std::fmt::Display for RowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowStatus::Empty => write!(f, ""),
            RowStatus::Done => write!(f, "Done"),
            RowStatus::Error => write!(f, "Error"),
            RowStatus::LinkNotFound => write!(f, "Link not found"),
            RowStatus::Other(text) => write!(f, "{text}"),
        }
    }
}

/// One queue row: a post URL plus its processing status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Physical 1-based row number in the queue sheet. Row 1 is the header,
    /// so work items start at 2. Status writes target this row directly.
    pub row_index: u32,
    pub url: String,
    pub status: RowStatus,
}

impl WorkItem {
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// One extracted and enriched post, in results-table column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub name: String,
    pub job_title: String,
    pub profile_link: String,
    pub info: String,
    pub more_info: String,
    pub enrichment: String,
    pub original_url: String,
}

impl PostRecord {
    /// Cells in the same order as `RESULT_HEADER`.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.job_title.clone(),
            self.profile_link.clone(),
            self.info.clone(),
            self.more_info.clone(),
            self.enrichment.clone(),
            self.original_url.clone(),
        ]
    }

    pub fn header_row() -> Vec<String> {
        RESULT_HEADER.iter().map(|s| s.to_string()).collect()
    }
}
