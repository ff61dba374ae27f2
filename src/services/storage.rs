//! Report file storage.
//!
//! Loads the current report and the history of previous reports from disk and
//! writes the enriched report back. This is the only place that touches the
//! file system; the insights engine works on the loaded values.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::Report;

/// Whether a path looks like a JSON report file.
pub fn is_report_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Parse a report from JSON text.
pub fn parse_report(content: &str) -> AppResult<Report> {
    Ok(serde_json::from_str(content)?)
}

/// Load one report file.
pub async fn load_report(path: &Path) -> AppResult<Report> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AppError::NotFound(format!("Report {}", path.display())),
        _ => AppError::FileSystem(format!("Failed to read {}: {}", path.display(), e)),
    })?;

    parse_report(&content).map_err(|e| {
        AppError::InvalidInput(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Load previous reports from a directory.
///
/// Every `*.json` file is parsed; files that cannot be read or parsed are
/// skipped with a warning. `exclude` names a file to leave out (usually the
/// current report when it lives in the same directory). The result is sorted
/// newest first by `summary.start` and truncated to `max_reports`.
pub async fn load_history(
    dir: &Path,
    max_reports: usize,
    exclude: Option<&Path>,
) -> AppResult<Vec<Report>> {
    let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            AppError::NotFound(format!("History directory {}", dir.display()))
        }
        _ => AppError::FileSystem(format!("Failed to list {}: {}", dir.display(), e)),
    })?;

    let excluded = match exclude {
        Some(path) => Some(canonical(path).await),
        None => None,
    };

    let mut reports = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !is_report_file(&path) {
            continue;
        }
        if excluded.is_some() && excluded == Some(canonical(&path).await) {
            debug!("Skipping current report {:?} in history", path);
            continue;
        }

        match load_report(&path).await {
            Ok(report) => reports.push(report),
            Err(e) => warn!("Skipping history file {:?}: {}", path, e),
        }
    }

    reports.sort_by(|a, b| b.summary().start.cmp(&a.summary().start));
    reports.truncate(max_reports);

    info!(
        "Loaded {} previous reports from {}",
        reports.len(),
        dir.display()
    );

    Ok(reports)
}

/// Write a report as pretty-printed JSON.
pub async fn save_report(path: &Path, report: &Report) -> AppResult<()> {
    let content = serde_json::to_string_pretty(report)
        .map_err(|e| AppError::InvalidInput(format!("Failed to serialize report: {}", e)))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(path, content)
        .await
        .map_err(|e| AppError::FileSystem(format!("Failed to write {}: {}", path.display(), e)))?;

    info!("Wrote enriched report to {}", path.display());
    Ok(())
}

async fn canonical(path: &Path) -> PathBuf {
    tokio::fs::canonicalize(path)
        .await
        .unwrap_or_else(|_| path.to_path_buf())
}
