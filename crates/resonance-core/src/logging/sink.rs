//! Output sinks for the logging subsystem.
//!
//! A `SinkSet` is the fan-out of output targets for one logging session:
//! a size-rotating session file plus, optionally, standard output. It is
//! built exactly once per registry initialization and shared read-only by
//! every named logger created during that session.
//!
//! Writes on the log path are best-effort: a sink that fails to write
//! swallows the error rather than failing the caller. Construction errors
//! (directory creation, file open) are surfaced, not swallowed; the
//! caller decides whether to proceed without persistence.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use parking_lot::Mutex;

use crate::error::CoreResult;

/// File name prefix for session log files
const SESSION_FILE_PREFIX: &str = "resonance";

/// A single output destination for formatted log lines.
pub trait Sink: Send + Sync {
    /// Append one formatted line.
    fn write_line(&self, line: &str);

    /// Block until buffered output has reached the backing store.
    fn flush(&self);
}

/// Rotation policy for the session file sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Rotate once the current file would exceed this many bytes
    pub max_bytes: u64,
    /// Number of rotated files to retain (`<file>.1` .. `<file>.N`)
    pub max_files: usize,
}

impl Default for RotationPolicy {
    /// 5 MiB per file, 3 rotated files retained. Deployments that want the
    /// larger 10 MiB / 5 files variant configure it through [`LogConfig`].
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            max_files: 3,
        }
    }
}

/// Configuration for building a registry's sink set.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log directory; `None` resolves to the platform default
    pub log_dir: Option<PathBuf>,
    /// Also mirror log lines to standard output
    pub console: bool,
    /// Rotation policy for the session file
    pub rotation: RotationPolicy,
    /// Period of the background best-effort flush; `None` disables it
    pub flush_interval: Option<Duration>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            console: true,
            rotation: RotationPolicy::default(),
            flush_interval: Some(Duration::from_secs(2)),
        }
    }
}

/// Sink that writes to standard output.
pub struct ConsoleSink;

impl Sink for ConsoleSink {
    fn write_line(&self, line: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{}", line);
    }

    fn flush(&self) {
        let _ = io::stdout().lock().flush();
    }
}

/// Size-rotating sink for the session log file.
///
/// Writes to `<dir>/<prefix>_<YYYYMMDD_HHMMSS>.log` and keeps up to
/// `max_files` numbered backups: `.1` is the most recent rotation, higher
/// numbers are older, the oldest is deleted first. All writes are
/// serialized behind the sink's own lock.
pub struct RotatingFileSink {
    path: PathBuf,
    policy: RotationPolicy,
    inner: Mutex<RotatingInner>,
}

struct RotatingInner {
    writer: BufWriter<File>,
    written: u64,
}

impl RotatingFileSink {
    /// Open (or create) the session file in append mode.
    pub fn create(path: impl Into<PathBuf>, policy: RotationPolicy) -> io::Result<Self> {
        let path = path.into();
        let (writer, written) = Self::open_current(&path)?;
        Ok(Self {
            path,
            policy,
            inner: Mutex::new(RotatingInner { writer, written }),
        })
    }

    /// Path of the current session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_current(path: &Path) -> io::Result<(BufWriter<File>, u64)> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok((BufWriter::new(file), written))
    }

    /// Shift numbered backups up by one, dropping the oldest, move the
    /// current file to `.1` and reopen a fresh current file.
    fn rotate(&self, inner: &mut RotatingInner) -> io::Result<()> {
        inner.writer.flush()?;

        let oldest = self.backup_path(self.policy.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for i in (1..self.policy.max_files).rev() {
            let from = self.backup_path(i);
            if from.exists() {
                fs::rename(&from, self.backup_path(i + 1))?;
            }
        }
        if self.policy.max_files > 0 {
            fs::rename(&self.path, self.backup_path(1))?;
        } else {
            fs::remove_file(&self.path)?;
        }

        // The old handle still points at the renamed file until it is
        // replaced here; everything was flushed above.
        let (writer, written) = Self::open_current(&self.path)?;
        inner.writer = writer;
        inner.written = written;
        Ok(())
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }
}

impl Sink for RotatingFileSink {
    fn write_line(&self, line: &str) {
        let mut inner = self.inner.lock();
        let pending = line.len() as u64 + 1;
        if inner.written > 0 && inner.written + pending > self.policy.max_bytes {
            // If rotation fails, keep appending to the current file
            let _ = self.rotate(&mut inner);
        }
        if writeln!(inner.writer, "{}", line).is_ok() {
            inner.written += pending;
        }
    }

    fn flush(&self) {
        let _ = self.inner.lock().writer.flush();
    }
}

impl Drop for RotatingFileSink {
    fn drop(&mut self) {
        let _ = self.inner.get_mut().writer.flush();
    }
}

/// The shared, append-only fan-out of output targets for one session.
pub struct SinkSet {
    sinks: Vec<Box<dyn Sink>>,
    session_path: PathBuf,
}

impl SinkSet {
    /// Build the session sinks: the rotating file first, then the console
    /// if requested.
    ///
    /// Creates `log_dir` recursively and opens a session file named from
    /// the current wall clock. Directory or file creation failures surface
    /// as [`crate::error::CoreError::Io`].
    pub fn build(log_dir: &Path, config: &LogConfig) -> CoreResult<Self> {
        fs::create_dir_all(log_dir)?;

        let session_path = log_dir.join(session_filename());
        let file_sink = RotatingFileSink::create(&session_path, config.rotation)?;

        let mut sinks: Vec<Box<dyn Sink>> = vec![Box::new(file_sink)];
        if config.console {
            sinks.push(Box::new(ConsoleSink));
        }

        Ok(Self { sinks, session_path })
    }

    /// Forward one formatted line to every sink, in order.
    pub fn write_line(&self, line: &str) {
        for sink in &self.sinks {
            sink.write_line(line);
        }
    }

    /// Flush every sink.
    pub fn flush(&self) {
        for sink in &self.sinks {
            sink.flush();
        }
    }

    /// Path of the current session log file.
    pub fn session_path(&self) -> &Path {
        &self.session_path
    }
}

/// Session file name from the current wall clock:
/// `resonance_YYYYMMDD_HHMMSS.log`
fn session_filename() -> String {
    format!(
        "{}_{}.log",
        SESSION_FILE_PREFIX,
        Local::now().format("%Y%m%d_%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tiny_policy() -> RotationPolicy {
        RotationPolicy {
            max_bytes: 64,
            max_files: 2,
        }
    }

    fn file_only_config() -> LogConfig {
        LogConfig {
            console: false,
            flush_interval: None,
            ..LogConfig::default()
        }
    }

    #[test]
    fn test_session_filename_shape() {
        let name = session_filename();
        assert!(name.starts_with("resonance_"));
        assert!(name.ends_with(".log"));
        // resonance_YYYYMMDD_HHMMSS.log
        assert_eq!(name.len(), "resonance_".len() + 15 + ".log".len());
    }

    #[test]
    fn test_build_creates_directory_and_session_file() {
        let temp = TempDir::new().unwrap();
        let log_dir = temp.path().join("nested").join("logs");

        let sinks = SinkSet::build(&log_dir, &file_only_config()).unwrap();

        assert!(log_dir.exists());
        assert!(sinks.session_path().exists());
        assert!(sinks.session_path().starts_with(&log_dir));
    }

    #[test]
    fn test_build_fails_when_directory_cannot_be_created() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        // A file where the directory should go makes create_dir_all fail
        let result = SinkSet::build(&blocker, &file_only_config());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_line_reaches_file_after_flush() {
        let temp = TempDir::new().unwrap();
        let sinks = SinkSet::build(temp.path(), &file_only_config()).unwrap();

        sinks.write_line("first line");
        sinks.write_line("second line");
        sinks.flush();

        let content = fs::read_to_string(sinks.session_path()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, vec!["first line", "second line"]);
    }

    #[test]
    fn test_rotation_creates_numbered_backup() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rotate.log");
        let sink = RotatingFileSink::create(&path, tiny_policy()).unwrap();

        // 20 bytes per line with the newline; the fourth write would pass
        // 64 bytes and triggers a rotation first
        for _ in 0..4 {
            sink.write_line("0123456789012345678");
        }
        sink.flush();

        let backup = temp.path().join("rotate.log.1");
        assert!(backup.exists());
        let rotated = fs::read_to_string(&backup).unwrap();
        assert_eq!(rotated.lines().count(), 3);
        let current = fs::read_to_string(&path).unwrap();
        assert_eq!(current.lines().count(), 1);
    }

    #[test]
    fn test_rotation_retains_bounded_backups() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rotate.log");
        let sink = RotatingFileSink::create(&path, tiny_policy()).unwrap();

        // Enough writes for three rotations with max_files = 2: the first
        // three lines fall off the end
        for _ in 0..12 {
            sink.write_line("0123456789012345678");
        }
        sink.flush();

        assert!(path.exists());
        assert!(temp.path().join("rotate.log.1").exists());
        assert!(temp.path().join("rotate.log.2").exists());
        assert!(!temp.path().join("rotate.log.3").exists());
    }

    #[test]
    fn test_oversize_first_line_does_not_rotate_empty_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rotate.log");
        let sink = RotatingFileSink::create(&path, tiny_policy()).unwrap();

        let long_line = "x".repeat(200);
        sink.write_line(&long_line);
        sink.flush();

        assert!(!temp.path().join("rotate.log.1").exists());
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
