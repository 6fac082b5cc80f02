//! tsboard - terminal dashboard for Taiwan stock screening results.
//!
//! Supports two modes:
//! - Interactive (default): TUI with a Home screen and one tab per strategy
//! - Print mode: load one strategy, print a page as plain text and exit
//!
//! Usage:
//!   tsboard                              # browse the published results
//!   tsboard --data-dir ./data/latest     # browse a local checkout
//!   tsboard --view daily-rush            # start on a strategy tab
//!   tsboard --print disposal-alert       # print the first page
//!   tsboard --print category-stocks --category 半導體 --sort 漲幅 --desc

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::File;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use tsboard::source::status::STATUS_FILE;
use tsboard::source::{DataSource, DirSource, HttpSource, load_dataset};
use tsboard::strategy::{self, STRATEGIES, Strategy};
use tsboard::table::{CategoryFilter, SortDirection, TableState};
use tsboard::tui::{App, View};
use tsboard::view::table::build_strategy_view;
use tsboard::view::text::render_text;

/// Published screening results.
const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/Roy12123/stock-analysis-platform/main/data/latest/";

/// Terminal dashboard for Taiwan stock screening results.
#[derive(Parser)]
#[command(name = "tsboard", about = "Taiwan stock screening dashboard")]
struct Args {
    /// Base URL of the result files.
    #[arg(long, env = "TSBOARD_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Read result files from a local directory instead of --base-url.
    #[arg(long, env = "TSBOARD_DATA_DIR", value_name = "PATH")]
    data_dir: Option<String>,

    /// Update status file, relative to the data location.
    #[arg(long, default_value = STATUS_FILE, value_name = "FILE")]
    status_file: String,

    /// Strategy to open on start (key or title). Default: Home.
    #[arg(long, value_name = "STRATEGY")]
    view: Option<String>,

    /// HTTP timeout in seconds. Default: no timeout.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// UI refresh interval in milliseconds.
    #[arg(long, default_value_t = 250, value_name = "MS")]
    tick: u64,

    /// Write logs to this file (the TUI owns the terminal).
    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,

    /// Increase verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,

    /// Print one page of a strategy as text and exit.
    #[arg(long, value_name = "STRATEGY")]
    print: Option<String>,

    /// Sort column for --print.
    #[arg(long, value_name = "COLUMN", requires = "print")]
    sort: Option<String>,

    /// Sort ascending (--print).
    #[arg(long, conflicts_with = "desc", requires = "print")]
    asc: bool,

    /// Sort descending (--print).
    #[arg(long, requires = "print")]
    desc: bool,

    /// Category filter value for --print.
    #[arg(long, value_name = "VALUE", requires = "print")]
    category: Option<String>,

    /// Page number for --print (1-based).
    #[arg(long, value_name = "N", requires = "print")]
    page: Option<usize>,
}

fn init_logging(verbose: u8, quiet: bool, log_file: Option<&str>, print_mode: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("tsboard={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    if let Some(path) = log_file {
        match File::create(path) {
            Ok(file) => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init(),
            Err(e) => {
                eprintln!("Error: cannot open log file '{}': {}", path, e);
                std::process::exit(1);
            }
        }
    } else if print_mode {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}

fn find_strategy(name: &str) -> &'static Strategy {
    match strategy::find(name) {
        Some(s) => s,
        None => {
            let keys: Vec<&str> = STRATEGIES.iter().map(|s| s.key).collect();
            eprintln!("Error: unknown strategy '{}'", name);
            eprintln!("Available: {}", keys.join(", "));
            std::process::exit(1);
        }
    }
}

fn make_source(args: &Args) -> Arc<dyn DataSource> {
    if let Some(ref dir) = args.data_dir {
        return Arc::new(DirSource::new(dir));
    }
    let timeout = args.timeout.map(Duration::from_secs);
    match HttpSource::new(&args.base_url, timeout) {
        Ok(source) => Arc::new(source),
        Err(e) => {
            eprintln!("Error: invalid base URL '{}': {}", args.base_url, e);
            std::process::exit(1);
        }
    }
}

/// Loads one strategy synchronously and prints the requested page.
fn print_mode(args: &Args, name: &str, source: &dyn DataSource) {
    let strategy = find_strategy(name);
    let loaded = match load_dataset(source, strategy.file_name) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error: {}: {}", e.title(), e);
            eprintln!("{}", e.hint());
            std::process::exit(1);
        }
    };

    let mut table = TableState::new(loaded.dataset, strategy.table_config());

    if let Some(ref value) = args.category {
        if !table.has_filter() {
            eprintln!("Error: '{}' has no category column", strategy.key);
            std::process::exit(1);
        }
        table.select_category(CategoryFilter::Only(value.clone()));
    }

    let direction = if args.asc {
        Some(SortDirection::Ascending)
    } else if args.desc {
        Some(SortDirection::Descending)
    } else {
        None
    };
    if let Some(ref column) = args.sort {
        if table.dataset().column_index(column).is_none() {
            eprintln!("Error: unknown column '{}'", column);
            eprintln!("Columns: {}", table.dataset().columns().join(", "));
            std::process::exit(1);
        }
        table.set_sort(column, direction);
    } else if let Some(direction) = direction {
        table.sort.direction = direction;
    }

    table.goto_page(args.page.unwrap_or(1));
    print!("{}", render_text(&build_strategy_view(strategy, &table)));
}

fn main() {
    let args = Args::parse();
    init_logging(
        args.verbose,
        args.quiet,
        args.log_file.as_deref(),
        args.print.is_some(),
    );

    let source = make_source(&args);
    tracing::info!(source = %source.describe(), "starting");

    if let Some(ref name) = args.print {
        print_mode(&args, name, source.as_ref());
        return;
    }

    let initial = match args.view.as_deref() {
        None | Some("home") => View::Home,
        Some(name) => match strategy::index_of(name) {
            Some(i) => View::Strategy(i),
            None => {
                find_strategy(name);
                View::Home
            }
        },
    };

    let app = App::new(source, args.status_file.clone());
    if let Err(e) = app.run(Duration::from_millis(args.tick), initial) {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}
