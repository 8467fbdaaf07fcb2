//! # Report Sinks
//!
//! Where finished reports go. The lifecycle manager hands a sink the
//! document model from `drawer_core::report`; what happens next (a text
//! file, a PDF renderer, a printer) is the sink's business.
//!
//! ```text
//! end_shift ──► ShiftReport::from_shift ──► sink.shift_closed(&report)
//!                                                 │
//!                                  Err ──► warn!, shift stays closed
//! ```

use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use drawer_core::{HistoryReport, Money, ShiftReport};

use crate::config::DrawerConfig;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Report sink unavailable: {0}")]
    Unavailable(String),
}

/// Receives reports produced by the lifecycle manager.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Called once per shift, right after it is closed and persisted.
    async fn shift_closed(&self, report: &ShiftReport) -> Result<(), ReportError>;

    /// Called when the full history is exported.
    async fn history_exported(&self, report: &HistoryReport) -> Result<(), ReportError>;
}

/// Writes plain-text reports into a directory.
///
/// ```text
/// reports/
/// ├── shift-5-20260303-170000-1b4e28ba.txt
/// └── history-20260303-180512.txt
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryReportSink {
    config: DrawerConfig,
}

impl DirectoryReportSink {
    /// Sink writing into `dir` with default currency formatting.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectoryReportSink {
            config: DrawerConfig {
                reports_dir: dir.into(),
                ..DrawerConfig::default()
            },
        }
    }

    /// Sink writing into `config.reports_dir`, formatting amounts per `config`.
    pub fn from_config(config: &DrawerConfig) -> Self {
        DirectoryReportSink {
            config: config.clone(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.config.reports_dir
    }

    async fn write(&self, file_name: String, body: String) -> Result<PathBuf, ReportError> {
        let path = self.dir().join(file_name);

        tokio::fs::create_dir_all(self.dir())
            .await
            .map_err(|source| ReportError::Write {
                path: self.dir().to_path_buf(),
                source,
            })?;

        tokio::fs::write(&path, body)
            .await
            .map_err(|source| ReportError::Write {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), "Report written");
        Ok(path)
    }
}

/// Keeps a drawer number usable inside a file name.
fn file_safe(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[async_trait]
impl ReportSink for DirectoryReportSink {
    async fn shift_closed(&self, report: &ShiftReport) -> Result<(), ReportError> {
        let stamp = report.close_time.unwrap_or(report.open_time);
        let short_id: String = report.shift_id.chars().take(8).collect();
        let file_name = format!(
            "shift-{}-{}-{}.txt",
            file_safe(&report.drawer_number),
            stamp.format("%Y%m%d-%H%M%S"),
            short_id
        );

        let body = report.render_with(&|amount: Money| self.config.format_amount(amount));
        self.write(file_name, body).await.map(|_| ())
    }

    async fn history_exported(&self, report: &HistoryReport) -> Result<(), ReportError> {
        let file_name = format!("history-{}.txt", Utc::now().format("%Y%m%d-%H%M%S"));

        let body = report.render_with(&|amount: Money| self.config.format_amount(amount));
        self.write(file_name, body).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use drawer_core::ledger::upsert;
    use drawer_core::{CashKind, ShiftRecord, ShiftStatus};

    fn closed_shift(drawer: &str) -> ShiftRecord {
        let entries = upsert(&[], CashKind::Bill, Money::from_dollars(20), 2).unwrap();
        ShiftRecord {
            id: "1b4e28ba-2fa1-11d2-883f-0016d3cca427".to_string(),
            organization_name: Some("Corner Store".to_string()),
            drawer_number: drawer.to_string(),
            cashier_name: "Dana".to_string(),
            open_time: Utc.with_ymd_and_hms(2026, 3, 3, 9, 0, 0).unwrap(),
            close_time: Some(Utc.with_ymd_and_hms(2026, 3, 3, 17, 0, 0).unwrap()),
            opening_balance: Money::from_dollars(40),
            closing_balance: Some(Money::from_dollars(40)),
            shift_drop: Some(Money::zero()),
            opening_entries: entries.clone(),
            entries,
            status: ShiftStatus::Closed,
            sync_version: 2,
        }
    }

    #[tokio::test]
    async fn test_shift_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectoryReportSink::new(dir.path().join("reports"));

        let report = ShiftReport::from_shift(&closed_shift("5"));
        sink.shift_closed(&report).await.unwrap();

        let path = dir.path().join("reports/shift-5-20260303-170000-1b4e28ba.txt");
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("Corner Store\nShift Report"));
        assert!(text.contains("Balance Difference: +$0.00"));
    }

    #[tokio::test]
    async fn test_drawer_number_is_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectoryReportSink::new(dir.path());

        let report = ShiftReport::from_shift(&closed_shift("../A 1"));
        sink.shift_closed(&report).await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["shift-___A_1-20260303-170000-1b4e28ba.txt".to_string()]);
    }

    #[tokio::test]
    async fn test_history_uses_configured_currency() {
        let dir = tempfile::tempdir().unwrap();
        let config = DrawerConfig {
            reports_dir: dir.path().to_path_buf(),
            currency_symbol: "€".to_string(),
            ..DrawerConfig::default()
        };
        let sink = DirectoryReportSink::from_config(&config);

        let history = HistoryReport::from_shifts(&[closed_shift("1"), closed_shift("2")]);
        sink.history_exported(&history).await.unwrap();

        let entry = std::fs::read_dir(dir.path()).unwrap().next().unwrap().unwrap();
        let text = std::fs::read_to_string(entry.path()).unwrap();
        assert!(entry.file_name().to_string_lossy().starts_with("history-"));
        assert!(text.contains("Shift #2 - Corner Store"));
        assert!(text.contains("€40.00"));
    }

    #[tokio::test]
    async fn test_unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("taken");
        std::fs::write(&blocker, "not a directory").unwrap();
        let sink = DirectoryReportSink::new(&blocker);

        let report = ShiftReport::from_shift(&closed_shift("5"));
        assert!(matches!(
            sink.shift_closed(&report).await,
            Err(ReportError::Write { .. })
        ));
    }
}
