pub mod config;
pub mod text;
pub mod types;

pub use config::Config;
pub use text::{clean_text, dedup_words};
pub use types::{PostRecord, RowStatus, WorkItem, RESULT_HEADER};
