//! Local directory data source.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::{DataSource, Fetched, LoadError};

/// Reads files from a directory, e.g. a checkout of the published data.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DataSource for DirSource {
    fn fetch(&self, file_name: &str) -> Result<Fetched, LoadError> {
        let path = self.root.join(file_name);
        tracing::debug!(path = %path.display(), "read");

        let body = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LoadError::NotReady {
                file: file_name.to_string(),
                status: None,
            },
            ErrorKind::InvalidData => {
                LoadError::Parse(format!("{} is not UTF-8", path.display()))
            }
            _ => LoadError::Io(format!("{}: {}", path.display(), e)),
        })?;

        let modified = std::fs::metadata(&path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Local>::from);

        Ok(Fetched { body, modified })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_file_with_mtime() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("強勢股篩選.csv"), "股票代碼\n2330\n").unwrap();
        let src = DirSource::new(dir.path());
        let fetched = src.fetch("強勢股篩選.csv").unwrap();
        assert_eq!(fetched.body, "股票代碼\n2330\n");
        assert!(fetched.modified.is_some());
    }

    #[test]
    fn missing_file_is_not_ready() {
        let dir = TempDir::new().unwrap();
        let src = DirSource::new(dir.path());
        assert_eq!(
            src.fetch("missing.csv").unwrap_err(),
            LoadError::NotReady {
                file: "missing.csv".into(),
                status: None
            }
        );
    }

    #[test]
    fn invalid_utf8_is_parse_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.csv"), [0xff, 0xfe, 0x00]).unwrap();
        let src = DirSource::new(dir.path());
        assert!(matches!(src.fetch("bad.csv"), Err(LoadError::Parse(_))));
    }

    #[test]
    fn directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let src = DirSource::new(dir.path());
        assert!(matches!(src.fetch("sub"), Err(LoadError::Io(_))));
    }
}
