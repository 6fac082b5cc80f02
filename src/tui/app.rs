//! Main TUI application.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::page::spawn_load;
use crate::source::DataSource;
use crate::source::status::fetch_status;
use crate::util::open_url;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::{AppState, LoadRequest, StatusInfo, View};

/// Main TUI application.
pub struct App {
    source: Arc<dyn DataSource>,
    status_file: String,
    state: AppState,
    should_quit: bool,
}

impl App {
    /// Creates a new App reading from `source`.
    pub fn new(source: Arc<dyn DataSource>, status_file: String) -> Self {
        let label = source.describe();
        Self {
            source,
            status_file,
            state: AppState::new(label),
            should_quit: false,
        }
    }

    /// Runs the TUI application, starting on `initial` view.
    pub fn run(mut self, tick_rate: Duration, initial: View) -> io::Result<()> {
        let events = EventHandler::new(tick_rate)?;
        let tx = events.sender();

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.load_status(&tx);
        self.navigate(initial, &tx);

        let result = self.event_loop(&mut terminal, &events, &tx);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &EventHandler,
        tx: &Sender<Event>,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|frame| render(frame, &mut self.state))?;

            match events.next() {
                Ok(Event::Tick) | Ok(Event::Resize(_)) => {}
                Ok(Event::Key(key)) => match handle_key(&mut self.state, key) {
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::Navigate(view) => self.navigate(view, tx),
                    KeyAction::Reload => self.reload(tx),
                    KeyAction::OpenLink(url) => self.open_link(&url),
                    KeyAction::None => {}
                },
                Ok(Event::Loaded { request_id, result }) => {
                    self.state.on_loaded(request_id, result);
                }
                Ok(Event::Status(result)) => self.state.on_status(result),
                Err(_) => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn navigate(&mut self, view: View, tx: &Sender<Event>) {
        tracing::debug!(view = view.name(), "navigate");
        if let Some(request) = self.state.navigate(view) {
            self.start_load(request, tx);
        }
    }

    fn reload(&mut self, tx: &Sender<Event>) {
        match self.state.reload() {
            Some(request) => self.start_load(request, tx),
            None => self.load_status(tx),
        }
    }

    fn start_load(&self, request: LoadRequest, tx: &Sender<Event>) {
        let tx = tx.clone();
        spawn_load(
            Arc::clone(&self.source),
            request.file_name,
            request.request_id,
            move |request_id, result| {
                let _ = tx.send(Event::Loaded { request_id, result });
            },
        );
    }

    fn load_status(&mut self, tx: &Sender<Event>) {
        let source = Arc::clone(&self.source);
        let file = self.status_file.clone();
        let tx = tx.clone();
        self.state.status = StatusInfo::Loading;
        let spawned = thread::Builder::new()
            .name("tsboard-status".to_string())
            .spawn(move || {
                let _ = tx.send(Event::Status(fetch_status(source.as_ref(), &file)));
            });
        if let Err(e) = spawned {
            tracing::error!(error = %e, "failed to spawn status thread");
        }
    }

    fn open_link(&mut self, url: &str) {
        match open_url(url) {
            Ok(()) => {
                tracing::info!(url, "opened link");
                self.state.status_message = Some("Opened chart in browser".to_string());
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "failed to open link");
                self.state.status_message = Some(format!("Cannot open browser: {}", e));
            }
        }
    }
}
