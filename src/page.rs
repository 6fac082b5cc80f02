//! One mounted strategy view: `Loading -> Error | Ready`.
//!
//! Loads run on a short-lived worker thread and report back through a
//! callback tagged with the request id they were started for. A page only
//! accepts the result of its current request; anything older is dropped.

use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Local};

use crate::source::{DataSource, LoadError, Loaded, load_dataset};
use crate::strategy::Strategy;
use crate::table::TableState;

/// Monotonic id identifying one load request.
pub type RequestId = u64;

/// Hands out increasing request ids.
#[derive(Debug, Default)]
pub struct RequestIds {
    last: RequestId,
}

impl RequestIds {
    pub fn next(&mut self) -> RequestId {
        self.last += 1;
        self.last
    }
}

/// Loaded table with its timestamps.
#[derive(Debug, Clone)]
pub struct ReadyPage {
    pub table: TableState,
    pub modified: Option<DateTime<Local>>,
    pub loaded_at: DateTime<Local>,
}

#[derive(Debug, Clone)]
pub enum PageState {
    Loading,
    Error(LoadError),
    Ready(Box<ReadyPage>),
}

/// Page instance bound to one strategy.
#[derive(Debug)]
pub struct Page {
    pub strategy: &'static Strategy,
    request_id: RequestId,
    pub state: PageState,
}

impl Page {
    /// New instance waiting for request `request_id`.
    pub fn mount(strategy: &'static Strategy, request_id: RequestId) -> Self {
        Self {
            strategy,
            request_id,
            state: PageState::Loading,
        }
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Drops the current data and waits for `request_id`.
    pub fn reload(&mut self, request_id: RequestId) {
        self.request_id = request_id;
        self.state = PageState::Loading;
    }

    /// Applies a load result. Returns `false` (and changes nothing) when the
    /// result belongs to a superseded request.
    pub fn apply(&mut self, request_id: RequestId, result: Result<Loaded, LoadError>) -> bool {
        if request_id != self.request_id {
            tracing::debug!(
                file = self.strategy.file_name,
                stale = request_id,
                current = self.request_id,
                "discarding stale load result"
            );
            return false;
        }
        self.state = match result {
            Ok(loaded) => PageState::Ready(Box::new(ReadyPage {
                table: TableState::new(loaded.dataset, self.strategy.table_config()),
                modified: loaded.modified,
                loaded_at: loaded.loaded_at,
            })),
            Err(err) => {
                tracing::warn!(file = self.strategy.file_name, error = %err, "load failed");
                PageState::Error(err)
            }
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PageState::Loading)
    }

    pub fn ready(&self) -> Option<&ReadyPage> {
        match &self.state {
            PageState::Ready(page) => Some(page.as_ref()),
            _ => None,
        }
    }

    pub fn table_mut(&mut self) -> Option<&mut TableState> {
        match &mut self.state {
            PageState::Ready(page) => Some(&mut page.table),
            _ => None,
        }
    }

    /// Timestamp shown next to the title.
    pub fn updated_at(&self) -> Option<DateTime<Local>> {
        let page = self.ready()?;
        if self.strategy.shows_modified {
            page.modified.or(Some(page.loaded_at))
        } else {
            Some(page.loaded_at)
        }
    }
}

/// Loads `file_name` on a worker thread and passes the result to `done`.
pub fn spawn_load<F>(
    source: Arc<dyn DataSource>,
    file_name: &'static str,
    request_id: RequestId,
    done: F,
) where
    F: FnOnce(RequestId, Result<Loaded, LoadError>) + Send + 'static,
{
    tracing::debug!(file = file_name, request_id, "starting load");
    let spawned = thread::Builder::new()
        .name("tsboard-load".to_string())
        .spawn(move || {
            let result = load_dataset(source.as_ref(), file_name);
            done(request_id, result);
        });
    if let Err(e) = spawned {
        tracing::error!(error = %e, "failed to spawn loader thread");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::source::memory::MapSource;
    use crate::strategy::find;
    use std::collections::HashMap;
    use std::sync::mpsc;
    use std::time::Duration;

    fn loaded(csv: &str) -> Loaded {
        Loaded {
            dataset: Dataset::from_csv(csv).unwrap(),
            modified: None,
            loaded_at: Local::now(),
        }
    }

    #[test]
    fn request_ids_increase() {
        let mut ids = RequestIds::default();
        let a = ids.next();
        let b = ids.next();
        assert!(b > a);
    }

    #[test]
    fn ready_after_matching_result() {
        let mut page = Page::mount(find("strong-stocks").unwrap(), 1);
        assert!(page.is_loading());
        assert!(page.apply(1, Ok(loaded("股票代碼\n2330\n"))));
        assert_eq!(page.ready().unwrap().table.dataset().len(), 1);
    }

    #[test]
    fn stale_result_is_ignored() {
        let mut page = Page::mount(find("strong-stocks").unwrap(), 1);
        page.reload(2);
        assert!(!page.apply(1, Ok(loaded("股票代碼\n2330\n"))));
        assert!(page.is_loading());
        assert!(page.apply(2, Err(LoadError::Parse("bad".into()))));
        assert!(matches!(page.state, PageState::Error(LoadError::Parse(_))));
    }

    #[test]
    fn reload_returns_to_loading() {
        let mut page = Page::mount(find("breakthrough").unwrap(), 1);
        page.apply(1, Ok(loaded("a\n1\n")));
        page.reload(5);
        assert!(page.is_loading());
        assert_eq!(page.request_id(), 5);
    }

    #[test]
    fn daily_rush_prefers_modification_time() {
        let mut page = Page::mount(find("daily-rush").unwrap(), 1);
        let modified = Local::now() - chrono::Duration::hours(3);
        let mut result = loaded("a\n1\n");
        result.modified = Some(modified);
        page.apply(1, Ok(result));
        assert_eq!(page.updated_at(), Some(modified));
    }

    #[test]
    fn spawn_load_reports_through_callback() {
        let source: Arc<dyn DataSource> = Arc::new(MapSource(HashMap::from([(
            "強勢股篩選.csv".to_string(),
            "股票代碼\n2330\n".to_string(),
        )])));
        let (tx, rx) = mpsc::channel();
        spawn_load(source, "強勢股篩選.csv", 7, move |id, result| {
            let _ = tx.send((id, result));
        });
        let (id, result) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(id, 7);
        assert_eq!(result.unwrap().dataset.len(), 1);
    }
}
