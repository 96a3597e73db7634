//! Directory-wide migration.
//!
//! Every legacy file in the configured directory is converted on its own:
//! a failure is reported and the run moves on to the next file. Existing
//! outputs are never overwritten, so running twice is harmless.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::MigrationConfig;
use crate::convert_str;
use crate::scene::to_pretty_json;

/// What happened to one legacy file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileReport {
    Converted { input: String, output: String },
    Skipped { input: String, output: String },
    Failed { input: String, message: String },
}

impl FileReport {
    pub fn input(&self) -> &str {
        match self {
            FileReport::Converted { input, .. }
            | FileReport::Skipped { input, .. }
            | FileReport::Failed { input, .. } => input,
        }
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileReport::Converted { input, output } => write!(f, "OK    {} -> {}", input, output),
            FileReport::Skipped { input, output } => {
                write!(f, "SKIP {} ({} already exists)", input, output)
            }
            FileReport::Failed { input, message } => write!(f, "ERROR {}: {}", input, message),
        }
    }
}

/// Per-run counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.converted + self.skipped + self.failed
    }

    fn record(&mut self, report: &FileReport) {
        match report {
            FileReport::Converted { .. } => self.converted += 1,
            FileReport::Skipped { .. } => self.skipped += 1,
            FileReport::Failed { .. } => self.failed += 1,
        }
    }
}

/// Legacy files directly inside the scenes directory, sorted by name.
pub fn legacy_files(config: &MigrationConfig) -> Result<Vec<PathBuf>> {
    let dir = &config.scenes_dir;
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read scenes directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to list scenes directory {}", dir.display()))?
            .path();
        let is_legacy = path.extension().and_then(|e| e.to_str()) == Some(config.legacy_extension.as_str());
        if is_legacy && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Convert every legacy scene in `config.scenes_dir`.
///
/// `on_report` is called once per file, in order, as soon as that file is
/// done. Only an unreadable directory aborts the run.
pub fn migrate_directory(
    config: &MigrationConfig,
    mut on_report: impl FnMut(&FileReport),
) -> Result<BatchSummary> {
    config.validate().map_err(anyhow::Error::msg)?;

    let mut summary = BatchSummary::default();
    for input in legacy_files(config)? {
        let output = input.with_extension(&config.output_extension);
        let report = migrate_one(&input, &output);
        summary.record(&report);
        on_report(&report);
    }

    log::info!(
        "Migration complete: {} converted, {} skipped, {} failed",
        summary.converted,
        summary.skipped,
        summary.failed
    );
    Ok(summary)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn migrate_one(input: &Path, output: &Path) -> FileReport {
    let input_name = file_name(input);
    let output_name = file_name(output);

    if output.exists() {
        log::debug!("{} already converted, skipping", input.display());
        return FileReport::Skipped {
            input: input_name,
            output: output_name,
        };
    }

    match migrate_file(input, output) {
        Ok(()) => {
            log::debug!("Wrote {}", output.display());
            FileReport::Converted {
                input: input_name,
                output: output_name,
            }
        }
        Err(e) => {
            log::warn!("Failed to convert {}: {:#}", input.display(), e);
            FileReport::Failed {
                input: input_name,
                message: format!("{:#}", e),
            }
        }
    }
}

/// Read, convert and write a single scene. `output` must not exist yet.
pub fn migrate_file(input: &Path, output: &Path) -> Result<()> {
    let raw = fs::read_to_string(input)?;
    let scene = convert_str(&raw)?;
    let json = to_pretty_json(&scene)?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    file.write_all(json.as_bytes())
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lines() {
        let ok = FileReport::Converted {
            input: "room.sc".to_string(),
            output: "room.json".to_string(),
        };
        assert_eq!(ok.to_string(), "OK    room.sc -> room.json");

        let skip = FileReport::Skipped {
            input: "room.sc".to_string(),
            output: "room.json".to_string(),
        };
        assert_eq!(skip.to_string(), "SKIP room.sc (room.json already exists)");

        let err = FileReport::Failed {
            input: "bad.sc".to_string(),
            message: "EOF while parsing an object at line 1 column 1".to_string(),
        };
        assert_eq!(err.to_string(), "ERROR bad.sc: EOF while parsing an object at line 1 column 1");
        assert_eq!(err.input(), "bad.sc");
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = BatchSummary::default();
        summary.record(&FileReport::Skipped {
            input: String::new(),
            output: String::new(),
        });
        summary.record(&FileReport::Failed {
            input: String::new(),
            message: String::new(),
        });
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.converted, 0);
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let config = MigrationConfig::new("/definitely/not/a/scenes/dir");
        let err = migrate_directory(&config, |_| {}).unwrap_err();
        assert!(err.to_string().contains("Failed to read scenes directory"));
    }
}
