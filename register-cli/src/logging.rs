//! Tracing setup for the `register` binary.
//!
//! One subscriber is installed at startup with a reloadable level filter, a
//! stdout layer that can be muted and a file layer that stays idle until a
//! log file is configured. [`apply`] then folds the `[logging]` config table
//! and the command-line overrides into those three knobs.

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use std::{
    fs::{self, File},
    io::{self, IsTerminal, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};
use tracing::{Event, Level, Subscriber, debug};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

use crate::config::LoggingConfig;

/// Command-line settings that take precedence over `[logging]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogOverrides {
    /// `--log-level`; beats both RUST_LOG and the config file.
    pub level: Option<String>,
    /// `--log-file`; beats `logging.file`.
    pub file: Option<PathBuf>,
    /// `--quiet`; mutes stdout whatever the config says.
    pub quiet: bool,
}

// --- Formatter ---

/// `<local time> <LEVEL> [<crate>] <file:line> <fields>`
///
/// The crate tag keeps engine, catalog and CLI records apart when they are
/// interleaved in one file.
struct RegisterFmt;

impl<S, N> FormatEvent<S, N> for RegisterFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let paint = |code: &'static str| if ansi { code } else { "" };

        write!(
            writer,
            "{}{}{} ",
            paint("\x1b[2m"),
            Local::now().format("%H:%M:%S%.3f"),
            paint("\x1b[0m")
        )?;

        let level_color = match *meta.level() {
            Level::ERROR => "\x1b[1;31m",
            Level::WARN => "\x1b[1;33m",
            Level::INFO => "\x1b[1;32m",
            Level::DEBUG => "\x1b[1;34m",
            Level::TRACE => "\x1b[1;35m",
        };
        write!(
            writer,
            "{}{:>5}{} [{:<4}] ",
            paint(level_color),
            meta.level(),
            paint("\x1b[0m"),
            crate_tag(meta.target())
        )?;

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            write!(
                writer,
                "{}{}:{line}{} ",
                paint("\x1b[36m"),
                short_path(file),
                paint("\x1b[0m")
            )?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Short tag for the crate an event came from: `register_core::engine` is
/// `core`, `register_cli` is `cli`. Foreign targets keep their crate name.
fn crate_tag(target: &str) -> &str {
    let krate = target.split_once("::").map_or(target, |(head, _)| head);
    krate.strip_prefix("register_").unwrap_or(krate)
}

/// Path below `src/`, or the whole path for tests and foreign files.
fn short_path(file: &str) -> &str {
    file.split_once("src/")
        .or_else(|| file.split_once("src\\"))
        .map_or(file, |(_, rest)| rest)
}

// --- Late-bound file writer ---

type LogFile = Arc<Mutex<Option<File>>>;

/// Writer for the file layer. Discards everything while no file is open.
#[derive(Clone)]
struct FileSlot(LogFile);

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

// --- Installed subscriber ---

type ReloadFn<T> = Box<dyn Fn(T) -> Result<()> + Send + Sync>;

/// Knobs of the subscriber installed by [`init`].
struct Handles {
    level: ReloadFn<EnvFilter>,
    stdout: ReloadFn<EnvFilter>,
    file: LogFile,
}

static HANDLES: OnceLock<Handles> = OnceLock::new();

fn handles() -> Result<&'static Handles> {
    HANDLES
        .get()
        .ok_or_else(|| anyhow!("logging not yet initialized"))
}

fn reloader<S>(
    handle: reload::Handle<EnvFilter, S>,
    what: &'static str,
) -> ReloadFn<EnvFilter>
where
    S: Subscriber + Send + Sync + 'static,
{
    Box::new(move |filter| {
        handle
            .reload(filter)
            .map_err(|e| anyhow!("{what} filter reload failed: {e}"))
    })
}

/// Installs the global subscriber at `default_level`, or at RUST_LOG when
/// that is set. Stdout is colored only on a terminal. Later calls, including
/// concurrent ones, wait for the first and then do nothing.
pub fn init(default_level: &str) {
    HANDLES.get_or_init(|| install(default_level));
}

fn install(default_level: &str) -> Handles {
    let level = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let (level_filter, level_handle) = reload::Layer::new(level);
    let (stdout_gate, stdout_handle) = reload::Layer::new(EnvFilter::new("trace"));
    let file: LogFile = Arc::new(Mutex::new(None));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(RegisterFmt)
        .with_ansi(io::stdout().is_terminal())
        .with_filter(stdout_gate);
    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(RegisterFmt)
        .with_ansi(false)
        .with_writer(FileSlot(Arc::clone(&file)));

    // Fails only when another subscriber already owns the process. Reloads
    // through the handles then report the dropped subscriber as an error.
    let _ = tracing_subscriber::registry()
        .with(level_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init();

    Handles {
        level: reloader(level_handle, "level"),
        stdout: reloader(stdout_handle, "stdout"),
        file,
    }
}

/// Replaces the level filter. Takes a bare level or any EnvFilter directive
/// such as `info,register_core=debug`.
pub fn set_log_level(level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(level).map_err(|e| anyhow!("invalid log level '{level}': {e}"))?;
    (handles()?.level)(filter)
}

/// Mutes or unmutes stdout. The file layer is not affected.
pub fn set_stdout_enabled(enabled: bool) -> Result<()> {
    // "trace" lets everything through; the level filter is still the ceiling.
    let gate = EnvFilter::new(if enabled { "trace" } else { "off" });
    (handles()?.stdout)(gate)
}

/// Starts appending records to `path`, creating missing parent directories.
/// Replaces any file opened earlier. Returns the path actually opened.
pub fn enable_file_logging(path: &Path) -> Result<PathBuf> {
    let handles = handles()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create log directory '{}'", parent.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;

    *handles.file.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
    Ok(path.to_path_buf())
}

/// Level directive to install, if any. `None` leaves the filter [`init`]
/// took from RUST_LOG in place.
fn effective_level<'a>(
    config: &'a LoggingConfig,
    overrides: &'a LogOverrides,
    rust_log_set: bool,
) -> Option<&'a str> {
    match &overrides.level {
        Some(level) => Some(level.as_str()),
        None if rust_log_set => None,
        None => Some(config.level.as_str()),
    }
}

/// Applies `[logging]` on top of [`init`], with `overrides` winning. Returns
/// the log file opened, if any.
pub fn apply(
    config: &LoggingConfig,
    overrides: &LogOverrides,
) -> Result<Option<PathBuf>> {
    let rust_log_set = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
    if let Some(level) = effective_level(config, overrides, rust_log_set) {
        set_log_level(level)?;
    }

    set_stdout_enabled(config.stdout && !overrides.quiet)?;

    let opened = overrides
        .file
        .as_deref()
        .or(config.file.as_deref())
        .map(enable_file_logging)
        .transpose()?;
    debug!(log_file = ?opened, "logging configured");
    Ok(opened)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn crate_tag_drops_module_path_and_prefix() {
        assert_eq!(crate_tag("register_core::engine::state"), "core");
        assert_eq!(crate_tag("register_data::loader"), "data");
        assert_eq!(crate_tag("register_cli"), "cli");
        assert_eq!(crate_tag("register"), "register");
        assert_eq!(crate_tag("csv::reader"), "csv");
    }

    #[test]
    fn short_path_strips_src_prefix() {
        assert_eq!(short_path("register-core/src/engine/state.rs"), "engine/state.rs");
        assert_eq!(short_path("src\\main.rs"), "main.rs");
        assert_eq!(short_path("tests/script_integration.rs"), "tests/script_integration.rs");
    }

    #[test]
    fn command_line_level_beats_env_and_config() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            ..LoggingConfig::default()
        };
        let overrides = LogOverrides {
            level: Some("trace".to_string()),
            ..LogOverrides::default()
        };

        assert_eq!(effective_level(&config, &overrides, true), Some("trace"));
        assert_eq!(effective_level(&config, &overrides, false), Some("trace"));
    }

    #[test]
    fn rust_log_beats_config_level() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            ..LoggingConfig::default()
        };
        let overrides = LogOverrides::default();

        assert_eq!(effective_level(&config, &overrides, true), None);
        assert_eq!(effective_level(&config, &overrides, false), Some("warn"));
    }

    #[test]
    fn invalid_level_is_rejected_before_reload() {
        init("info");

        let result = set_log_level("register_core=loud");

        assert!(result.is_err());
    }

    #[test]
    fn file_override_is_opened_in_a_new_directory() {
        init("info");
        let dir = std::env::temp_dir().join(format!("register-log-{}", std::process::id()));
        let path = dir.join("nested").join("register.log");
        let config = LoggingConfig {
            file: Some(dir.join("ignored.log")),
            ..LoggingConfig::default()
        };
        let overrides = LogOverrides {
            file: Some(path.clone()),
            quiet: true,
            ..LogOverrides::default()
        };

        let opened = apply(&config, &overrides).unwrap();

        assert_eq!(opened, Some(path.clone()));
        assert!(path.is_file());
        assert!(!dir.join("ignored.log").exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
