use crate::domain::vocabulary::{builtin_sets, find_builtin, Speed, VocabularySet};
use crate::error::{AppError, AppResult};
use crate::infrastructure::config::Config;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "kana-audio-gen")]
#[command(about = "Generate Japanese flashcard audio clips with a remote TTS service")]
pub struct Cli {
    /// Built-in vocabulary sets to generate (see --list)
    pub sets: Vec<String>,

    /// Generate every built-in set
    #[arg(long)]
    pub all: bool,

    /// Print the built-in sets and exit
    #[arg(long)]
    pub list: bool,

    /// JSON vocabulary set to generate (repeatable)
    #[arg(long = "batch-file", value_name = "PATH")]
    pub batch_files: Vec<PathBuf>,

    /// Root directory for generated audio (overrides OUTPUT_ROOT)
    #[arg(long, value_name = "DIR")]
    pub output_root: Option<PathBuf>,

    /// Use slow speech for items that do not set a speed
    #[arg(long)]
    pub slow: bool,

    /// Only generate these identifiers, e.g. the failures of a previous run
    #[arg(long, value_name = "ID", value_delimiter = ',')]
    pub only: Vec<String>,

    /// Attempts per item (overrides TTS_MAX_ATTEMPTS)
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Pause between attempts in milliseconds (overrides TTS_RETRY_DELAY_MS)
    #[arg(long)]
    pub retry_delay_ms: Option<u64>,

    /// Write a JSON report of every batch to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line overrides on top of the environment configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(root) = &self.output_root {
            config.output_root = root.clone();
        }
        if self.slow {
            config.default_speed = Speed::Slow;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        if let Some(delay) = self.retry_delay_ms {
            config.retry_delay = Duration::from_millis(delay);
        }
    }

    /// Resolve the selected sets, in the order given
    pub fn selected_sets(&self) -> AppResult<Vec<VocabularySet>> {
        let mut sets = if self.all {
            builtin_sets()
        } else {
            self.sets
                .iter()
                .map(|name| find_builtin(name))
                .collect::<Result<Vec<_>, _>>()?
        };

        for path in &self.batch_files {
            sets.push(VocabularySet::from_json_file(path)?);
        }

        if sets.is_empty() {
            return Err(AppError::InvalidInput(
                "no vocabulary set selected (name a set, pass --all or --batch-file; --list shows the sets)"
                    .to_string(),
            ));
        }

        if !self.only.is_empty() {
            for id in retain_only_across(&mut sets, &self.only) {
                tracing::warn!(id = %id, "Requested identifier not found in any selected set");
            }
            if sets.is_empty() {
                return Err(AppError::InvalidInput(format!(
                    "none of the identifiers {:?} belong to the selected sets",
                    self.only
                )));
            }
        }

        Ok(sets)
    }
}

/// Filter every set down to `only`, dropping sets left empty.
///
/// Returns the identifiers that matched no set, each once, in request order.
fn retain_only_across(sets: &mut Vec<VocabularySet>, only: &[String]) -> Vec<String> {
    let mut unmatched: Option<Vec<String>> = None;
    for set in sets.iter_mut() {
        let unknown = set.retain_only(only);
        unmatched = Some(match unmatched {
            None => unknown,
            Some(previous) => previous.into_iter().filter(|id| unknown.contains(id)).collect(),
        });
    }
    sets.retain(|set| !set.items.is_empty());
    unmatched.unwrap_or_default()
}

/// One line per built-in set: name, directory and item count
pub fn render_set_list() -> String {
    builtin_sets()
        .iter()
        .map(|set| {
            format!(
                "{:<18} {:<22} {:>3} items",
                set.name,
                set.directory.display(),
                set.items.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
