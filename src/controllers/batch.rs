use anyhow::Context;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    domain::{
        shared::report_dto::BatchReport,
        synthesis::{BatchConfig, BatchRunnerApi},
        vocabulary::VocabularySet,
    },
    error::{AppError, AppResult},
};

/// Outcome of a whole run: the finished batches and the fatal error, if any
#[derive(Debug)]
pub struct Generation {
    pub reports: Vec<BatchReport>,
    pub aborted: Option<AppError>,
}

impl Generation {
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none() && self.reports.iter().all(BatchReport::is_complete)
    }
}

pub struct BatchController {
    runner: Arc<dyn BatchRunnerApi>,
    output_root: PathBuf,
    config: BatchConfig,
}

impl BatchController {
    pub fn new(runner: Arc<dyn BatchRunnerApi>, output_root: PathBuf, config: BatchConfig) -> Self {
        Self {
            runner,
            output_root,
            config,
        }
    }

    /// Run every set as its own batch, in order.
    ///
    /// A fatal error in one set stops the run; partial failures do not.
    /// Reports of the sets finished before the error are kept.
    pub async fn generate(&self, sets: &[VocabularySet]) -> Generation {
        let mut reports = Vec::with_capacity(sets.len());
        let mut aborted = None;

        for set in sets {
            let run_id = Uuid::new_v4();
            let span = tracing::info_span!("batch", run_id = %run_id, set = %set.name);
            match self.generate_set(run_id, set).instrument(span).await {
                Ok(report) => reports.push(report),
                Err(e) => {
                    tracing::error!(set = %set.name, error = %e, "Set aborted, skipping the remaining sets");
                    aborted = Some(e);
                    break;
                }
            }
        }

        let failed_sets = reports.iter().filter(|r| !r.is_complete()).count();
        tracing::info!(
            sets = reports.len(),
            failed_sets = failed_sets,
            aborted = aborted.is_some(),
            "Generation finished"
        );

        Generation { reports, aborted }
    }

    async fn generate_set(&self, run_id: Uuid, set: &VocabularySet) -> AppResult<BatchReport> {
        let base_dir = self.output_root.join(&set.directory);
        let started_at = Utc::now();

        let result = self
            .runner
            .run(&set.resolved_items(), &base_dir, &self.config)
            .await
            .map_err(AppError::from)?;

        if result.is_complete() {
            tracing::info!(
                "Done {}/{} -> {}",
                result.succeeded,
                result.total,
                base_dir.display()
            );
        } else {
            tracing::warn!(
                failed = ?result.failed_identifiers,
                rerun = %rerun_command(set, &result.failed_identifiers),
                "Done {}/{} -> {}",
                result.succeeded,
                result.total,
                base_dir.display()
            );
        }

        Ok(BatchReport::new(
            run_id,
            set.name.clone(),
            base_dir.display().to_string(),
            started_at,
            result,
        ))
    }
}

/// Command line that regenerates only `failed` for this set
fn rerun_command(set: &VocabularySet, failed: &[String]) -> String {
    let selector = match &set.source {
        Some(path) => format!("--batch-file {}", path.display()),
        None => set.name.clone(),
    };
    format!("kana-audio-gen {selector} --only {}", failed.join(","))
}

/// Write the reports as pretty JSON
pub fn write_report(path: &Path, reports: &[BatchReport]) -> AppResult<()> {
    write_report_inner(path, reports).map_err(|e| AppError::Storage(format!("{e:#}")))
}

fn write_report_inner(path: &Path, reports: &[BatchReport]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(reports).context("serializing report")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;

    tracing::info!(path = %path.display(), "Report written");
    Ok(())
}
