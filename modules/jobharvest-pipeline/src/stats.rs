use std::time::Duration;

/// Counters accumulated over one pass through the queue.
#[derive(Debug, Default, Clone)]
pub struct RunStats {
    pub rows_total: usize,
    pub rows_skipped: usize,
    pub rows_done: usize,
    pub rows_failed: usize,
    pub rows_missing_url: usize,
    pub records_appended: usize,
    pub duration: Duration,
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Harvest Run Complete ===")?;
        writeln!(f, "  Rows in queue:     {}", self.rows_total)?;
        writeln!(f, "  Already done:      {}", self.rows_skipped)?;
        writeln!(f, "  Completed:         {}", self.rows_done)?;
        writeln!(f, "  Failed:            {}", self.rows_failed)?;
        writeln!(f, "  Missing link:      {}", self.rows_missing_url)?;
        writeln!(f, "  Records appended:  {}", self.records_appended)?;
        write!(f, "  Duration:          {:?}", self.duration)
    }
}
