use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;

use jobharvest_common::{PostRecord, RowStatus, WorkItem};
use jobharvest_pipeline::enricher::Enricher;
use jobharvest_pipeline::extractor::{PostExtractor, PostField};
use jobharvest_pipeline::pipeline::Pipeline;
use jobharvest_pipeline::store::RecordStore;

// --- Mock store ---

struct MockStore {
    queue: Vec<WorkItem>,
    statuses: Mutex<Vec<(u32, RowStatus)>>,
    appended: Mutex<Vec<PostRecord>>,
    fail_appends: bool,
    fail_status_writes: bool,
}

impl MockStore {
    fn new(queue: Vec<WorkItem>) -> Self {
        Self {
            queue,
            statuses: Mutex::new(Vec::new()),
            appended: Mutex::new(Vec::new()),
            fail_appends: false,
            fail_status_writes: false,
        }
    }

    fn failing_appends(mut self) -> Self {
        self.fail_appends = true;
        self
    }

    fn failing_status_writes(mut self) -> Self {
        self.fail_status_writes = true;
        self
    }

    fn statuses(&self) -> Vec<(u32, RowStatus)> {
        self.statuses.lock().unwrap().clone()
    }

    fn appended(&self) -> Vec<PostRecord> {
        self.appended.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for MockStore {
    async fn read_queue(&self) -> Result<Vec<WorkItem>> {
        Ok(self.queue.clone())
    }

    async fn update_status(&self, row_index: u32, status: &RowStatus) -> Result<()> {
        if self.fail_status_writes {
            bail!("status cell is locked");
        }
        self.statuses
            .lock()
            .unwrap()
            .push((row_index, status.clone()));
        Ok(())
    }

    async fn append_record(&self, record: &PostRecord) -> Result<()> {
        if self.fail_appends {
            bail!("append rejected");
        }
        self.appended.lock().unwrap().push(record.clone());
        Ok(())
    }
}

// --- Mock extractor ---

struct MockExtractor {
    opened: Mutex<Vec<String>>,
    missing: HashSet<PostField>,
    expand_ok: bool,
    fail_open: bool,
}

impl MockExtractor {
    fn new() -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            missing: HashSet::new(),
            expand_ok: true,
            fail_open: false,
        }
    }

    fn with_missing(mut self, fields: &[PostField]) -> Self {
        self.missing.extend(fields.iter().copied());
        self
    }

    fn failing_expansion(mut self) -> Self {
        self.expand_ok = false;
        self
    }

    fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl PostExtractor for MockExtractor {
    async fn open(&self, url: &str) -> Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        if self.fail_open {
            bail!("navigation refused");
        }
        Ok(())
    }

    async fn field(&self, field: PostField) -> Option<String> {
        if self.missing.contains(&field) {
            return None;
        }
        let value = match field {
            PostField::ActorName => "Jane Doe Jane Doe",
            PostField::ActorHeadline => "Talent Partner Talent Partner",
            PostField::ProfileLink => "https://example.com/in/jane",
            PostField::PostBody => "We are hiring #rust hashtag developers",
            PostField::JobHeading => "Senior Rust Engineer",
            PostField::JobSkills => "Rust, Tokio",
            PostField::JobMeta => return None,
        };
        Some(value.to_string())
    }

    async fn fields(&self, field: PostField) -> Vec<String> {
        if self.missing.contains(&field) {
            return Vec::new();
        }
        match field {
            PostField::JobMeta => vec!["Berlin".to_string(), "Hybrid".to_string()],
            _ => Vec::new(),
        }
    }

    async fn expand_details(&self) -> bool {
        self.expand_ok
    }
}

// --- Mock enricher ---

struct MockEnricher {
    calls: Mutex<Vec<(String, String)>>,
    failures_left: AtomicUsize,
}

impl MockEnricher {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures_left: AtomicUsize::new(0),
        }
    }

    fn failing_first(n: usize) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures_left: AtomicUsize::new(n),
        }
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Enricher for MockEnricher {
    async fn enrich(&self, info: &str, more_info: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((info.to_string(), more_info.to_string()));
        let left = self.failures_left.load(Ordering::SeqCst);
        if left > 0 {
            self.failures_left.store(left - 1, Ordering::SeqCst);
            bail!("model unavailable");
        }
        Ok("Person to contact: Jane Doe\nCompany name: Acme".to_string())
    }
}

// --- Helpers ---

fn item(row_index: u32, url: &str, status: &str) -> WorkItem {
    WorkItem {
        row_index,
        url: url.to_string(),
        status: RowStatus::from_cell(status),
    }
}

fn pipeline(
    store: &Arc<MockStore>,
    extractor: &Arc<MockExtractor>,
    enricher: &Arc<MockEnricher>,
) -> Pipeline {
    Pipeline::new(store.clone(), extractor.clone(), enricher.clone())
}

// --- Tests ---

#[tokio::test]
async fn test_done_rows_are_skipped_in_any_case() {
    let store = Arc::new(MockStore::new(vec![
        item(2, "https://a.example", "Done"),
        item(3, "https://b.example", "done"),
        item(4, "https://c.example", "DONE"),
        item(5, "https://d.example", ""),
        item(6, "https://e.example", "pending"),
    ]));
    let extractor = Arc::new(MockExtractor::new());
    let enricher = Arc::new(MockEnricher::new());

    let stats = pipeline(&store, &extractor, &enricher).run().await.unwrap();

    assert_eq!(extractor.opened(), vec!["https://d.example", "https://e.example"]);
    assert_eq!(
        store.statuses(),
        vec![(5, RowStatus::Done), (6, RowStatus::Done)]
    );
    assert_eq!(stats.rows_skipped, 3);
    assert_eq!(stats.rows_done, 2);
}

#[tokio::test]
async fn test_completed_queue_touches_nothing() {
    let store = Arc::new(MockStore::new(vec![
        item(2, "https://a.example", "Done"),
        item(3, "https://b.example", "Done"),
    ]));
    let extractor = Arc::new(MockExtractor::new());
    let enricher = Arc::new(MockEnricher::new());

    let stats = pipeline(&store, &extractor, &enricher).run().await.unwrap();

    assert!(extractor.opened().is_empty());
    assert!(store.statuses().is_empty());
    assert!(store.appended().is_empty());
    assert_eq!(stats.rows_skipped, 2);
}

#[tokio::test]
async fn test_empty_queue_is_a_clean_run() {
    let store = Arc::new(MockStore::new(Vec::new()));
    let extractor = Arc::new(MockExtractor::new());
    let enricher = Arc::new(MockEnricher::new());

    let stats = pipeline(&store, &extractor, &enricher).run().await.unwrap();

    assert_eq!(stats.rows_total, 0);
    assert!(extractor.opened().is_empty());
}

#[tokio::test]
async fn test_row_without_link_is_marked_and_skipped() {
    let store = Arc::new(MockStore::new(vec![
        item(2, "", ""),
        item(3, "https://a.example", ""),
    ]));
    let extractor = Arc::new(MockExtractor::new());
    let enricher = Arc::new(MockEnricher::new());

    let stats = pipeline(&store, &extractor, &enricher).run().await.unwrap();

    assert_eq!(
        store.statuses(),
        vec![(2, RowStatus::LinkNotFound), (3, RowStatus::Done)]
    );
    assert_eq!(extractor.opened(), vec!["https://a.example"]);
    assert_eq!(enricher.calls().len(), 1);
    assert_eq!(stats.rows_missing_url, 1);
}

#[tokio::test]
async fn test_scraped_record_is_cleaned_and_deduped() {
    let store = Arc::new(MockStore::new(vec![item(2, "https://a.example", "")]));
    let extractor = Arc::new(MockExtractor::new());
    let enricher = Arc::new(MockEnricher::new());

    pipeline(&store, &extractor, &enricher).run().await.unwrap();

    let records = store.appended();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Jane Doe");
    assert_eq!(records[0].job_title, "Talent Partner");
    assert_eq!(records[0].profile_link, "https://example.com/in/jane");
    assert_eq!(records[0].info, "We are hiring developers");
    assert_eq!(
        records[0].more_info,
        "Senior Rust Engineer, Berlin, Hybrid, Rust, Tokio"
    );
    assert_eq!(records[0].original_url, "https://a.example");

    // The enricher sees the cleaned text, not the raw page.
    assert_eq!(
        enricher.calls(),
        vec![(
            "We are hiring developers".to_string(),
            "Senior Rust Engineer, Berlin, Hybrid, Rust, Tokio".to_string()
        )]
    );
}

#[tokio::test]
async fn test_missing_fields_fall_back_to_placeholders() {
    let store = Arc::new(MockStore::new(vec![item(2, "https://a.example", "")]));
    let extractor = Arc::new(
        MockExtractor::new().with_missing(&[
            PostField::ActorName,
            PostField::JobHeading,
            PostField::JobMeta,
        ]),
    );
    let enricher = Arc::new(MockEnricher::new());

    pipeline(&store, &extractor, &enricher).run().await.unwrap();

    let records = store.appended();
    assert_eq!(records[0].name, "Name not found");
    assert_eq!(records[0].more_info, "Job details not found, Rust, Tokio");
    assert_eq!(store.statuses(), vec![(2, RowStatus::Done)]);
}

#[tokio::test]
async fn test_failed_expansion_still_completes_the_row() {
    let store = Arc::new(MockStore::new(vec![item(2, "https://a.example", "")]));
    let extractor = Arc::new(MockExtractor::new().failing_expansion());
    let enricher = Arc::new(MockEnricher::new());

    pipeline(&store, &extractor, &enricher).run().await.unwrap();

    let records = store.appended();
    assert_eq!(records[0].more_info, "Failed to click 'View job' button");
    assert_eq!(store.statuses(), vec![(2, RowStatus::Done)]);
}

#[tokio::test]
async fn test_enrichment_failure_marks_only_its_row() {
    let store = Arc::new(MockStore::new(vec![
        item(2, "https://a.example", ""),
        item(3, "https://b.example", ""),
    ]));
    let extractor = Arc::new(MockExtractor::new());
    let enricher = Arc::new(MockEnricher::failing_first(1));

    let stats = pipeline(&store, &extractor, &enricher).run().await.unwrap();

    assert_eq!(
        store.statuses(),
        vec![(2, RowStatus::Error), (3, RowStatus::Done)]
    );
    assert_eq!(store.appended().len(), 1);
    assert_eq!(store.appended()[0].original_url, "https://b.example");
    assert_eq!(stats.rows_failed, 1);
    assert_eq!(stats.rows_done, 1);
}

#[tokio::test]
async fn test_navigation_failure_marks_row_error() {
    let store = Arc::new(MockStore::new(vec![item(2, "https://a.example", "")]));
    let extractor = Arc::new(MockExtractor::new().failing_open());
    let enricher = Arc::new(MockEnricher::new());

    let stats = pipeline(&store, &extractor, &enricher).run().await.unwrap();

    assert_eq!(store.statuses(), vec![(2, RowStatus::Error)]);
    assert!(store.appended().is_empty());
    assert!(enricher.calls().is_empty());
    assert_eq!(stats.rows_failed, 1);
}

#[tokio::test]
async fn test_append_failure_marks_row_error() {
    let store = Arc::new(
        MockStore::new(vec![item(2, "https://a.example", "")]).failing_appends(),
    );
    let extractor = Arc::new(MockExtractor::new());
    let enricher = Arc::new(MockEnricher::new());

    let stats = pipeline(&store, &extractor, &enricher).run().await.unwrap();

    assert_eq!(store.statuses(), vec![(2, RowStatus::Error)]);
    assert_eq!(stats.rows_failed, 1);
}

#[tokio::test]
async fn test_status_write_failure_does_not_stop_the_run() {
    let store = Arc::new(
        MockStore::new(vec![
            item(2, "https://a.example", ""),
            item(3, "https://b.example", ""),
        ])
        .failing_status_writes(),
    );
    let extractor = Arc::new(MockExtractor::new());
    let enricher = Arc::new(MockEnricher::new());

    let stats = pipeline(&store, &extractor, &enricher).run().await.unwrap();

    assert_eq!(store.appended().len(), 2);
    assert_eq!(stats.rows_done, 2);
}
