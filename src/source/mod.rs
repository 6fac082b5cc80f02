//! Data source abstraction for upstream strategy files.
//!
//! A [`DataSource`] fetches one named file (CSV or the status JSON) either
//! over HTTP ([`HttpSource`]) or from a local directory ([`DirSource`]).
//! Sources are shared with loader threads, hence `Send + Sync`.

mod dir;
mod http;
pub mod status;

pub use dir::DirSource;
pub use http::HttpSource;

use chrono::{DateTime, Local};

use crate::dataset::{Dataset, DatasetError};

/// Error types that can occur while loading a strategy file.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The file does not exist (yet) upstream. `status` is the HTTP status,
    /// `None` for a missing local file.
    NotReady { file: String, status: Option<u16> },
    /// Transport failure (DNS, connect, TLS, timeout).
    Network(String),
    /// Local I/O error other than a missing file.
    Io(String),
    /// The file was fetched but could not be decoded.
    Parse(String),
}

impl LoadError {
    /// Panel heading for this error.
    pub fn title(&self) -> &'static str {
        match self {
            LoadError::NotReady { .. } | LoadError::Network(_) | LoadError::Io(_) => {
                "Data not available"
            }
            LoadError::Parse(_) => "Data could not be parsed",
        }
    }

    /// What the user can do about it.
    pub fn hint(&self) -> &'static str {
        match self {
            LoadError::NotReady { .. } => {
                "The screening job may not have run yet today. Check that it \
                 completed and published its files, then press r to reload."
            }
            LoadError::Network(_) => {
                "Check the network connection and --base-url, then press r to reload."
            }
            LoadError::Io(_) => "Check --data-dir and file permissions, then press r to reload.",
            LoadError::Parse(_) => {
                "The file exists but is not valid CSV. It may have been written \
                 partially; press r to reload after the job finishes."
            }
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::NotReady {
                file,
                status: Some(code),
            } => write!(f, "{} is not ready (HTTP {})", file, code),
            LoadError::NotReady { file, status: None } => write!(f, "{} is not ready", file),
            LoadError::Network(msg) => write!(f, "network error: {}", msg),
            LoadError::Io(msg) => write!(f, "I/O error: {}", msg),
            LoadError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<DatasetError> for LoadError {
    fn from(err: DatasetError) -> Self {
        LoadError::Parse(err.to_string())
    }
}

/// Body of a fetched file with its modification time when known.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub body: String,
    pub modified: Option<DateTime<Local>>,
}

/// Abstraction for upstream file locations.
///
/// The trait is object-safe and designed to be shared as `Arc<dyn DataSource>`.
pub trait DataSource: Send + Sync {
    /// Fetches the file called `file_name`.
    fn fetch(&self, file_name: &str) -> Result<Fetched, LoadError>;

    /// Human-readable location, shown in the header and logs.
    fn describe(&self) -> String;
}

/// Parsed strategy file.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub dataset: Dataset,
    pub modified: Option<DateTime<Local>>,
    pub loaded_at: DateTime<Local>,
}

/// Fetches and parses one CSV file.
pub fn load_dataset(source: &dyn DataSource, file_name: &str) -> Result<Loaded, LoadError> {
    let started = std::time::Instant::now();
    let fetched = source.fetch(file_name)?;
    let dataset = Dataset::from_csv(&fetched.body)?;
    tracing::info!(
        file = file_name,
        rows = dataset.len(),
        columns = dataset.columns().len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "dataset loaded"
    );
    Ok(Loaded {
        dataset,
        modified: fetched.modified,
        loaded_at: Local::now(),
    })
}

#[cfg(test)]
pub(crate) mod memory {
    use super::*;
    use std::collections::HashMap;

    /// In-memory source for tests.
    pub(crate) struct MapSource(pub HashMap<String, String>);

    impl DataSource for MapSource {
        fn fetch(&self, file_name: &str) -> Result<Fetched, LoadError> {
            self.0
                .get(file_name)
                .map(|body| Fetched {
                    body: body.clone(),
                    modified: None,
                })
                .ok_or_else(|| LoadError::NotReady {
                    file: file_name.to_string(),
                    status: None,
                })
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::MapSource;
    use std::collections::HashMap;

    #[test]
    fn load_dataset_parses_body() {
        let src = MapSource(HashMap::from([(
            "a.csv".to_string(),
            "股票代碼,公司名稱\n2330,台積電\n".to_string(),
        )]));
        let loaded = load_dataset(&src, "a.csv").unwrap();
        assert_eq!(loaded.dataset.len(), 1);
    }

    #[test]
    fn load_dataset_maps_errors() {
        let src = MapSource(HashMap::from([("bad.csv".to_string(), "a\n1,2\n".to_string())]));
        assert!(matches!(
            load_dataset(&src, "bad.csv"),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            load_dataset(&src, "missing.csv"),
            Err(LoadError::NotReady { status: None, .. })
        ));
    }

    #[test]
    fn not_ready_and_parse_read_differently() {
        let not_ready = LoadError::NotReady {
            file: "外資大量買超.csv".into(),
            status: Some(404),
        };
        let parse = LoadError::Parse("bad".into());
        assert_eq!(not_ready.to_string(), "外資大量買超.csv is not ready (HTTP 404)");
        assert_ne!(not_ready.title(), parse.title());
        assert_ne!(not_ready.hint(), parse.hint());
    }
}
