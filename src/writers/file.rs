//! File writer implementation

use crate::core::{Formatter, LogEvent, LoggerError, OutputFormat, Result, TimestampFormat, Writer};
use fs2::FileExt;
use parking_lot::{Mutex, RwLock};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends rendered events to a file
///
/// The destination may be left unset at construction and supplied later with
/// [`FileWriter::set_path`]. Every append opens the file in append mode and
/// holds both an in-process mutex and an exclusive advisory lock on the file
/// for exactly one event, so concurrent writers (threads or processes) never
/// interleave partial lines.
pub struct FileWriter {
    path: RwLock<Option<PathBuf>>,
    formatter: Box<dyn Formatter>,
    output_format: OutputFormat,
    timestamp_format: TimestampFormat,
    append_lock: Mutex<()>,
}

impl FileWriter {
    /// A writer with no destination, rendering as text
    pub fn new() -> Self {
        Self {
            path: RwLock::new(None),
            formatter: OutputFormat::Text.build(TimestampFormat::default()),
            output_format: OutputFormat::Text,
            timestamp_format: TimestampFormat::default(),
            append_lock: Mutex::new(()),
        }
    }

    /// A text writer appending to `path`
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new().with_path(path)
    }

    #[must_use]
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        *self.path.write() = Some(path.into());
        self
    }

    /// Set the output format for this writer
    ///
    /// # Examples
    ///
    /// ```
    /// use hierarchical_logger::writers::FileWriter;
    /// use hierarchical_logger::{OutputFormat, Writer};
    ///
    /// let writer = FileWriter::open("/var/log/app.log").with_output_format(OutputFormat::Json);
    /// assert_eq!(writer.formatter().name(), "json");
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self.formatter = format.build(self.timestamp_format.clone());
        self
    }

    /// Set the timestamp format for this writer
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.formatter = self.output_format.build(format.clone());
        self.timestamp_format = format;
        self
    }

    /// Set or replace the destination; later events go to the new file
    pub fn set_path(&self, path: impl Into<PathBuf>) {
        *self.path.write() = Some(path.into());
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.path.read().clone()
    }

    fn append(&self, path: &Path, rendered: &str) -> Result<()> {
        let _guard = self.append_lock.lock();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LoggerError::destination_unavailable(path.display().to_string(), e))?;

        file.lock_exclusive()
            .map_err(|e| LoggerError::file_lock(path.display().to_string(), e))?;
        let _unlock = LockedFile(&file);

        let mut bytes = rendered.as_bytes().to_vec();
        if !rendered.ends_with('\n') {
            bytes.push(b'\n');
        }

        (&file).write_all(&bytes).map_err(|e| {
            LoggerError::io_operation("appending to log file", path.display().to_string(), e)
        })?;
        (&file).flush()?;
        Ok(())
    }
}

impl Default for FileWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases the advisory lock when the append finishes, on every exit path
struct LockedFile<'a>(&'a File);

impl Drop for LockedFile<'_> {
    fn drop(&mut self) {
        let _ = FileExt::unlock(self.0);
    }
}

impl Writer for FileWriter {
    fn process_event(&self, event: &LogEvent) -> Result<()> {
        let path = self
            .path()
            .ok_or_else(|| LoggerError::destination_not_set(self.name()))?;
        let rendered = self.formatter.format_event(event)?;
        self.append(&path, &rendered)
    }

    fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CallSite, LogLevel};
    use std::fs;
    use tempfile::TempDir;

    fn event(message: &str) -> LogEvent {
        LogEvent::new("App\\Job", LogLevel::Info, CallSite::new("src/job.rs", 10, 1))
            .with_message(message)
    }

    #[test]
    fn test_destination_not_set() {
        let writer = FileWriter::new();
        let err = writer.process_event(&event("x")).unwrap_err();
        assert!(matches!(err, LoggerError::DestinationNotSet { .. }));
    }

    #[test]
    fn test_destination_unavailable() {
        let dir = TempDir::new().unwrap();
        let writer = FileWriter::open(dir.path().join("missing").join("app.log"));

        let err = writer.process_event(&event("x")).unwrap_err();
        assert!(matches!(err, LoggerError::DestinationUnavailable { .. }));
    }

    #[test]
    fn test_appends_one_line_per_event() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let writer = FileWriter::open(&path);

        writer.process_event(&event("first")).unwrap();
        writer.process_event(&event("second")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("App\\Job.10 first"));
        assert!(lines[1].ends_with("App\\Job.10 second"));
    }

    #[test]
    fn test_late_destination_and_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("late.log");
        let writer = FileWriter::new().with_output_format(OutputFormat::Json);
        assert!(writer.path().is_none());

        writer.set_path(&path);
        writer.process_event(&event("late")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("}\n"));
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_bad_timestamp_pattern_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let writer = FileWriter::open(&path)
            .with_timestamp_format(TimestampFormat::Custom("%Q bogus".to_string()));

        let err = writer.process_event(&event("x")).unwrap_err();
        assert!(matches!(err, LoggerError::FormatterError { .. }));
        assert!(!path.exists());
    }
}
