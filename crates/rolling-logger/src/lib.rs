//! Rolling File Logger
//!
//! Installs a `tracing` subscriber that writes every event (including
//! records emitted through the `log` facade) to a size-rotated set of files
//! and keeps the most recent lines in a circular buffer for diagnostics.

use std::collections::VecDeque;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;

/// Rotate once the active file grows past this size
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;
/// Number of files kept, active file included
pub const MAX_FILES: usize = 5;
/// Lines kept in memory for `recent_lines`
pub const BUFFER_LINES: usize = 500;

static LOGGER: OnceLock<Arc<Shared>> = OnceLock::new();

// ========================
// Rolling file
// ========================

/// Size-rotated log files: `<name>.log`, `<name>.1.log`, ... oldest last.
pub struct RollingFile {
    dir: PathBuf,
    name: String,
    max_bytes: u64,
    max_files: usize,
    file: File,
    written: u64,
}

impl RollingFile {
    pub fn open(dir: &Path, name: &str, max_bytes: u64, max_files: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{name}.log"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            dir: dir.to_path_buf(),
            name: name.to_string(),
            max_bytes,
            max_files: max_files.max(1),
            file,
            written,
        })
    }

    /// Path of the file at rotation `index` (0 = active file)
    pub fn path_for(&self, index: usize) -> PathBuf {
        if index == 0 {
            self.dir.join(format!("{}.log", self.name))
        } else {
            self.dir.join(format!("{}.{}.log", self.name, index))
        }
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let oldest = self.path_for(self.max_files - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (0..self.max_files - 1).rev() {
            let from = self.path_for(index);
            if from.exists() {
                fs::rename(&from, self.path_for(index + 1))?;
            }
        }

        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(0))?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

// ========================
// Circular line buffer
// ========================

/// Keeps the last `capacity` complete lines written to it.
pub struct LineBuffer {
    lines: VecDeque<String>,
    capacity: usize,
    partial: String,
}

impl LineBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            partial: String::new(),
        }
    }

    pub fn push_bytes(&mut self, buf: &[u8]) {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            if self.lines.len() == self.capacity {
                self.lines.pop_front();
            }
            self.lines.push_back(line.trim_end().to_string());
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

// ========================
// Subscriber plumbing
// ========================

struct Shared {
    app_name: String,
    file: Mutex<RollingFile>,
    buffer: Mutex<LineBuffer>,
}

#[derive(Clone)]
struct SharedWriter(Arc<Shared>);

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = {
            let mut file = self
                .0
                .file
                .lock()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
            file.write(buf)?
        };
        if let Ok(mut buffer) = self.0.buffer.lock() {
            buffer.push_bytes(&buf[..n]);
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0.file.lock() {
            Ok(mut file) => file.flush(),
            Err(_) => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for SharedWriter {
    type Writer = SharedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Initialize the global logger, writing into `log_dir/<app_name>.log`.
///
/// Fails if a logger (or any other global subscriber) is already installed.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Err("logger already initialized".to_string());
    }

    let file = RollingFile::open(log_dir.as_ref(), app_name, MAX_FILE_BYTES, MAX_FILES)
        .map_err(|e| format!("failed to open log file: {}", e))?;
    let shared = Arc::new(Shared {
        app_name: app_name.to_string(),
        file: Mutex::new(file),
        buffer: Mutex::new(LineBuffer::new(BUFFER_LINES)),
    });

    let level = if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_writer(SharedWriter(shared.clone()))
        .with_ansi(false)
        .with_timer(LocalTimer)
        .with_max_level(level)
        .try_init()
        .map_err(|e| format!("failed to install subscriber: {}", e))?;

    LOGGER
        .set(shared)
        .map_err(|_| "logger already initialized".to_string())?;

    tracing::info!(app = app_name, "rolling logger started");
    Ok(())
}

/// Log an info line under the app's target
pub fn info(msg: &str) -> Result<(), String> {
    let shared = LOGGER.get().ok_or("logger not initialized")?;
    log::info!(target: shared.app_name.as_str(), "{}", msg);
    Ok(())
}

/// Log an error line under the app's target
pub fn error(msg: &str) -> Result<(), String> {
    let shared = LOGGER.get().ok_or("logger not initialized")?;
    log::error!(target: shared.app_name.as_str(), "{}", msg);
    Ok(())
}

/// Most recent log lines, oldest first (empty before init)
pub fn recent_lines() -> Vec<String> {
    LOGGER
        .get()
        .and_then(|shared| shared.buffer.lock().ok().map(|buffer| buffer.lines()))
        .unwrap_or_default()
}
