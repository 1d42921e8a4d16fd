//! `log` backend for the browser console.
//!
//! On `wasm32` records go to `console.error/warn/info/debug`; elsewhere (tests,
//! the CLI) they are written to stderr as `[LEVEL target] message`.

use std::sync::OnceLock;

use log::{Level, LevelFilter, Log, Metadata, Record};

static LOGGER: ConsoleLogger = ConsoleLogger;
/// Outcome of the one `log::set_logger` attempt.
static INSTALLED: OnceLock<bool> = OnceLock::new();

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        write_record(record.level(), record.target(), &record.args().to_string());
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_record(level: Level, target: &str, message: &str) {
    let line = wasm_bindgen::JsValue::from_str(&format!("[{target}] {message}"));
    match level {
        Level::Error => web_sys::console::error_1(&line),
        Level::Warn => web_sys::console::warn_1(&line),
        Level::Info => web_sys::console::info_1(&line),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_record(level: Level, target: &str, message: &str) {
    eprintln!("[{level} {target}] {message}");
}

/// Install the console logger and set the maximum level.
///
/// Safe to call more than once: later calls only adjust the level. Returns
/// `false`, on every call, if another logger was installed first; the level
/// is then left to that logger's owner.
pub fn init(level: LevelFilter) -> bool {
    install_once(&INSTALLED, level, || log::set_logger(&LOGGER).is_ok())
}

fn install_once(
    installed: &OnceLock<bool>,
    level: LevelFilter,
    install: impl FnOnce() -> bool,
) -> bool {
    let ours = *installed.get_or_init(install);
    if ours {
        log::set_max_level(level);
    }
    ours
}
