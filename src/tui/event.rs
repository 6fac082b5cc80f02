//! Terminal, timer and loader events feeding the UI loop.
//!
//! One input thread polls crossterm and emits a tick whenever the poll
//! times out. Loader threads post into the same channel through
//! [`EventHandler::sender`], so the UI thread has a single blocking `recv`.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::page::RequestId;
use crate::source::status::{LastUpdate, StatusError};
use crate::source::{LoadError, Loaded};

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Poll timeout; redraws the clock.
    Tick,
    /// Key press.
    Key(KeyEvent),
    /// Terminal resize (width).
    Resize(u16),
    /// A strategy file finished loading.
    Loaded {
        request_id: RequestId,
        result: Result<Loaded, LoadError>,
    },
    /// The status file finished loading.
    Status(Result<LastUpdate, StatusError>),
}

/// Maps a crossterm event to an application event. Key releases and
/// repeats are dropped so each press acts once on every platform.
fn translate(evt: CrosstermEvent) -> Option<Event> {
    match evt {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(width, _) => Some(Event::Resize(width)),
        _ => None,
    }
}

/// Owns the event channel and the input thread.
pub struct EventHandler {
    rx: Receiver<Event>,
    tx: Sender<Event>,
}

impl EventHandler {
    /// Starts the input thread; `tick_rate` is the poll timeout.
    pub fn new(tick_rate: Duration) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let input_tx = tx.clone();

        thread::Builder::new()
            .name("tsboard-input".to_string())
            .spawn(move || {
                loop {
                    let next = match event::poll(tick_rate) {
                        Ok(true) => match event::read() {
                            Ok(evt) => translate(evt),
                            Err(e) => {
                                tracing::warn!(error = %e, "terminal read failed");
                                None
                            }
                        },
                        Ok(false) => Some(Event::Tick),
                        Err(e) => {
                            tracing::error!(error = %e, "terminal poll failed");
                            break;
                        }
                    };
                    if let Some(event) = next {
                        // Receiver gone: the UI has shut down.
                        if input_tx.send(event).is_err() {
                            break;
                        }
                    }
                }
            })?;

        Ok(Self { rx, tx })
    }

    /// Sender for loader threads.
    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    /// Blocks until the next event.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}
