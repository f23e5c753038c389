use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use once_cell::sync::Lazy;
use log::{
    LevelFilter,
    Metadata,
    Record
};

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));
static CONSOLE: AtomicBool = AtomicBool::new(true);

static MY_LOGGER: MyLogger = MyLogger;
struct MyLogger;
impl log::Log for MyLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "[{}] [{}] {}",
            record.target(),
            record.level(),
            record.args()
        );

        if CONSOLE.load(Ordering::Relaxed) {
            println!("{}", line);
        }
        if let Ok(mut guard) = LOG_FILE.lock() {
            if let Some(file) = guard.as_mut() {
                _ = writeln!(file, "{}", line);
            }
        }
    }

    fn flush(&self) {
        _ = io::stdout().flush();
        if let Ok(mut guard) = LOG_FILE.lock() {
            if let Some(file) = guard.as_mut() {
                _ = file.flush();
            }
        }
    }
}

static NULL_LOGGER: NullLogger = NullLogger;
struct NullLogger;
impl log::Log for NullLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        false
    }
    fn log(&self, _: &Record) {}
    fn flush(&self) {}
}

/// Installs the process-wide logger. Log lines go to stdout and, when
/// `file` is given, are appended to that file as well.
pub fn setup(level: LevelFilter, file: Option<&str>) {
    if let Some(path) = file {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => {
                if let Ok(mut guard) = LOG_FILE.lock() {
                    *guard = Some(f);
                }
            },
            Err(e) => eprintln!("Opening log file {} error: {}", path, e),
        }
    }

    CONSOLE.store(true, Ordering::Relaxed);
    _ = log::set_logger(&MY_LOGGER);
    log::set_max_level(level);
}

/// Keeps file output but stops echoing to stdout, used by the
/// interactive shell so log lines do not break the prompt.
pub fn revert_console_output() {
    CONSOLE.store(false, Ordering::Relaxed);
}

pub fn teardown() {
    log::set_max_level(LevelFilter::Off);
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = None;
    }
    _ = log::set_logger(&NULL_LOGGER);
}
