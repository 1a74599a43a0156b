//! Console logging for hosts embedding Arbor components.
//!
//! Components only emit `tracing` events. A host that has no subscriber of
//! its own can call [`install_tracing`] once at startup.

use std::io::{self, Write};
use std::str::FromStr;
use std::sync::{Arc, Mutex, Once, OnceLock};

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::{self, writer::MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const TRACING_PREFIX: &str = "[arbor]";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

// ============================================================================
// Global State
// ============================================================================

static TRACING_INSTALLED: Once = Once::new();
static LOG_LEVEL: OnceLock<Arc<Mutex<LevelFilter>>> = OnceLock::new();

fn get_log_level_handle() -> Arc<Mutex<LevelFilter>> {
    LOG_LEVEL
        .get_or_init(|| Arc::new(Mutex::new(DEFAULT_LOG_LEVEL)))
        .clone()
}

fn current_log_level() -> LevelFilter {
    get_log_level_handle()
        .lock()
        .map(|guard| *guard)
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

/// Update the console log level at runtime.
///
/// Unrecognized levels fall back to `info`.
pub fn set_log_level(level: &str) {
    let parsed = LevelFilter::from_str(level).unwrap_or(DEFAULT_LOG_LEVEL);
    if let Ok(mut guard) = get_log_level_handle().lock() {
        *guard = parsed;
    }
}

// ============================================================================
// Installation
// ============================================================================

/// Install the console subscriber (idempotent).
///
/// `RUST_LOG` narrows output per target; [`set_log_level`] caps it globally.
pub fn install_tracing() {
    TRACING_INSTALLED.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let gate = filter_fn(|metadata| level_allows(current_log_level(), *metadata.level()));

        let console = fmt::layer()
            .compact()
            .with_writer(StderrWithPrefix)
            .with_ansi(false)
            .with_filter(filter)
            .with_filter(gate);

        if tracing_subscriber::registry().with(console).try_init().is_err() {
            eprintln!("{TRACING_PREFIX} a global tracing subscriber is already set");
        }
    });
}

const fn level_allows(filter: LevelFilter, level: Level) -> bool {
    match filter {
        LevelFilter::OFF => false,
        LevelFilter::ERROR => matches!(level, Level::ERROR),
        LevelFilter::WARN => matches!(level, Level::ERROR | Level::WARN),
        LevelFilter::INFO => matches!(level, Level::ERROR | Level::WARN | Level::INFO),
        LevelFilter::DEBUG => matches!(
            level,
            Level::ERROR | Level::WARN | Level::INFO | Level::DEBUG
        ),
        LevelFilter::TRACE => true,
    }
}

// ============================================================================
// Console Writer
// ============================================================================

/// Hands out stderr writers that tag every output line with the prefix.
#[derive(Clone, Copy, Default)]
struct StderrWithPrefix;

impl<'a> MakeWriter<'a> for StderrWithPrefix {
    type Writer = LinePrefixer<io::StderrLock<'static>>;

    fn make_writer(&'a self) -> Self::Writer {
        LinePrefixer::new(io::stderr().lock())
    }
}

struct LinePrefixer<W> {
    inner: W,
    at_line_start: bool,
}

impl<W> LinePrefixer<W> {
    const fn new(inner: W) -> Self {
        Self {
            inner,
            at_line_start: true,
        }
    }
}

impl<W: Write> Write for LinePrefixer<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for line in buf.split_inclusive(|&byte| byte == b'\n') {
            if self.at_line_start {
                write!(self.inner, "{TRACING_PREFIX} ")?;
            }
            self.inner.write_all(line)?;
            self.at_line_start = line.ends_with(b"\n");
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
