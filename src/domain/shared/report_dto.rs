use crate::domain::synthesis::BatchResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry of the `--report` file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub set: String,
    pub directory: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total: usize,
    pub succeeded: usize,
    pub failed_identifiers: Vec<String>,
}

impl BatchReport {
    pub fn new(
        run_id: Uuid,
        set: String,
        directory: String,
        started_at: DateTime<Utc>,
        result: BatchResult,
    ) -> Self {
        Self {
            run_id,
            set,
            directory,
            started_at,
            finished_at: Utc::now(),
            total: result.total,
            succeeded: result.succeeded,
            failed_identifiers: result.failed_identifiers,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failed_identifiers.is_empty()
    }
}
