//! The row processing loop.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use jobharvest_common::{clean_text, dedup_words, PostRecord, RowStatus, WorkItem};

use crate::enricher::Enricher;
use crate::extractor::{PostExtractor, PostField};
use crate::stats::RunStats;
use crate::store::RecordStore;

pub struct Pipeline {
    store: Arc<dyn RecordStore>,
    extractor: Arc<dyn PostExtractor>,
    enricher: Arc<dyn Enricher>,
}

impl Pipeline {
    pub fn new(
        store: Arc<dyn RecordStore>,
        extractor: Arc<dyn PostExtractor>,
        enricher: Arc<dyn Enricher>,
    ) -> Self {
        Self {
            store,
            extractor,
            enricher,
        }
    }

    /// Process every pending row in queue order. Row failures mark the row
    /// and move on; only an unreadable queue ends the run.
    pub async fn run(&self) -> Result<RunStats> {
        let started = Instant::now();
        let items = self.store.read_queue().await?;

        let mut stats = RunStats {
            rows_total: items.len(),
            ..RunStats::default()
        };

        if items.is_empty() {
            info!("No post links in the queue, nothing to do");
            stats.duration = started.elapsed();
            return Ok(stats);
        }

        for item in &items {
            if item.status.is_done() {
                debug!(row = item.row_index, "Skipping completed row");
                stats.rows_skipped += 1;
                continue;
            }

            if !item.has_url() {
                info!(row = item.row_index, "Row has no link");
                stats.rows_missing_url += 1;
                self.write_status(item.row_index, &RowStatus::LinkNotFound)
                    .await;
                continue;
            }

            let status = match self.process_row(item).await {
                Ok(()) => {
                    stats.rows_done += 1;
                    stats.records_appended += 1;
                    RowStatus::Done
                }
                Err(e) => {
                    warn!(row = item.row_index, url = %item.url, error = %e, "Row failed, moving on");
                    stats.rows_failed += 1;
                    RowStatus::Error
                }
            };
            self.write_status(item.row_index, &status).await;
        }

        stats.duration = started.elapsed();
        Ok(stats)
    }

    async fn process_row(&self, item: &WorkItem) -> Result<()> {
        info!(row = item.row_index, url = %item.url, "Processing post");
        self.extractor.open(&item.url).await?;

        let name = match self.extractor.field(PostField::ActorName).await {
            Some(text) => dedup_words(text.trim()),
            None => "Name not found".to_string(),
        };
        let job_title = match self.extractor.field(PostField::ActorHeadline).await {
            Some(text) => dedup_words(text.trim()),
            None => "Job title not found".to_string(),
        };
        let profile_link = self
            .extractor
            .field(PostField::ProfileLink)
            .await
            .unwrap_or_else(|| "Profile link not found".to_string());
        let info = match self.extractor.field(PostField::PostBody).await {
            Some(text) => clean_text(&text),
            None => "Info not found".to_string(),
        };

        let more_info = self.job_details().await;

        let enrichment = self
            .enricher
            .enrich(&info, &more_info)
            .await
            .context("Enrichment failed")?;

        let record = PostRecord {
            name,
            job_title,
            profile_link,
            info,
            more_info,
            enrichment,
            original_url: item.url.clone(),
        };
        self.store.append_record(&record).await?;
        Ok(())
    }

    /// The combined job details string: heading, metadata lines and the
    /// skills list, comma separated. A failed expansion leaves a marker
    /// instead so the row still completes.
    async fn job_details(&self) -> String {
        if !self.extractor.expand_details().await {
            return "Failed to click 'View job' button".to_string();
        }

        let heading = self
            .extractor
            .field(PostField::JobHeading)
            .await
            .unwrap_or_else(|| "Job details not found".to_string());
        let skills = self
            .extractor
            .field(PostField::JobSkills)
            .await
            .unwrap_or_else(|| "Skills required not found".to_string());

        let mut parts = vec![heading];
        parts.extend(self.extractor.fields(PostField::JobMeta).await);
        parts.push(skills);
        parts.join(", ")
    }

    /// Status writes are best effort: a failure leaves the row eligible for
    /// the next run instead of ending the batch.
    async fn write_status(&self, row_index: u32, status: &RowStatus) {
        if let Err(e) = self.store.update_status(row_index, status).await {
            warn!(row = row_index, status = %status, error = %e, "Status write failed");
        }
    }
}
