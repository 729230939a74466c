pub mod browser;
pub mod enricher;
pub mod extractor;
pub mod pipeline;
pub mod stats;
pub mod store;
