//! Companion status file (`last_update.json`) written by the screening job.

use serde::Deserialize;

use super::{DataSource, LoadError};

/// Status file location relative to the `data/latest/` result directory.
pub const STATUS_FILE: &str = "../../last_update.json";

/// One job's last run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateInfo {
    pub updated_at: String,
    #[serde(default)]
    pub trade_date: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    pub timezone: String,
}

impl UpdateInfo {
    /// `"2024-01-05 18:30 (Asia/Taipei), trade date 2024-01-05"`.
    pub fn summary(&self) -> String {
        let mut out = format!("{} ({})", self.updated_at, self.timezone);
        if let Some(date) = &self.trade_date {
            out.push_str(&format!(", trade date {}", date));
        }
        match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) => out.push_str(&format!(", period {} ~ {}", start, end)),
            (Some(start), None) => out.push_str(&format!(", from {}", start)),
            (None, Some(end)) => out.push_str(&format!(", until {}", end)),
            (None, None) => {}
        }
        out
    }
}

/// Contents of the status file; both sections are optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct LastUpdate {
    #[serde(default)]
    pub stock_analysis: Option<UpdateInfo>,
    #[serde(default)]
    pub shareholder: Option<UpdateInfo>,
}

/// Error types for the status file.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusError {
    Load(LoadError),
    Json(String),
}

impl std::fmt::Display for StatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusError::Load(err) => write!(f, "status file: {}", err),
            StatusError::Json(msg) => write!(f, "status file is not valid JSON: {}", msg),
        }
    }
}

impl std::error::Error for StatusError {}

impl From<LoadError> for StatusError {
    fn from(err: LoadError) -> Self {
        StatusError::Load(err)
    }
}

pub fn parse_status(body: &str) -> Result<LastUpdate, StatusError> {
    let body = body.strip_prefix('\u{feff}').unwrap_or(body);
    serde_json::from_str(body).map_err(|e| StatusError::Json(e.to_string()))
}

/// Fetches and decodes the status file.
pub fn fetch_status(source: &dyn DataSource, file_name: &str) -> Result<LastUpdate, StatusError> {
    let fetched = source.fetch(file_name)?;
    let status = parse_status(&fetched.body)?;
    tracing::debug!(
        stock_analysis = status.stock_analysis.is_some(),
        shareholder = status.shareholder.is_some(),
        "status file loaded"
    );
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::MapSource;
    use std::collections::HashMap;

    const SAMPLE: &str = r#"{
        "stock_analysis": {
            "updated_at": "2024-01-05 18:30:00",
            "trade_date": "2024-01-05",
            "timezone": "Asia/Taipei"
        },
        "shareholder": {
            "updated_at": "2024-01-06 09:00:00",
            "start_date": "2023-12-29",
            "end_date": "2024-01-05",
            "timezone": "Asia/Taipei"
        }
    }"#;

    #[test]
    fn parses_both_sections() {
        let status = parse_status(SAMPLE).unwrap();
        let sa = status.stock_analysis.unwrap();
        assert_eq!(sa.trade_date.as_deref(), Some("2024-01-05"));
        assert_eq!(
            sa.summary(),
            "2024-01-05 18:30:00 (Asia/Taipei), trade date 2024-01-05"
        );
        let sh = status.shareholder.unwrap();
        assert!(sh.summary().ends_with("period 2023-12-29 ~ 2024-01-05"));
    }

    #[test]
    fn sections_are_optional() {
        assert_eq!(parse_status("{}").unwrap(), LastUpdate::default());
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(matches!(parse_status("<html>"), Err(StatusError::Json(_))));
    }

    #[test]
    fn fetch_propagates_load_errors() {
        let src = MapSource(HashMap::new());
        assert!(matches!(
            fetch_status(&src, STATUS_FILE),
            Err(StatusError::Load(LoadError::NotReady { .. }))
        ));
        let src = MapSource(HashMap::from([(STATUS_FILE.to_string(), SAMPLE.to_string())]));
        assert!(fetch_status(&src, STATUS_FILE).unwrap().shareholder.is_some());
    }
}
