//! In-memory writer
//!
//! Keeps every processed event together with its rendering. Clones share the
//! same buffer, so a handle kept by the caller observes what a logger wrote.

use crate::core::{Formatter, LogEvent, OutputFormat, Result, TimestampFormat, Writer};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Clone)]
pub struct MemoryWriter {
    records: Arc<Mutex<Vec<(LogEvent, String)>>>,
    formatter: Arc<dyn Formatter>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::with_output_format(OutputFormat::Text)
    }

    pub fn with_output_format(format: OutputFormat) -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            formatter: Arc::from(format.build(TimestampFormat::default())),
        }
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.records.lock().iter().map(|(event, _)| event.clone()).collect()
    }

    pub fn lines(&self) -> Vec<String> {
        self.records.lock().iter().map(|(_, line)| line.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Default for MemoryWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for MemoryWriter {
    fn process_event(&self, event: &LogEvent) -> Result<()> {
        let rendered = self.formatter.format_event(event)?;
        self.records.lock().push((event.clone(), rendered));
        Ok(())
    }

    fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    #[test]
    fn test_clones_share_records() {
        let writer = MemoryWriter::new();
        let handle = writer.clone();

        writer
            .process_event(&LogEvent::create("App", LogLevel::Info).with_message("stored"))
            .unwrap();

        assert_eq!(handle.len(), 1);
        assert_eq!(handle.events()[0].message(), Some("stored"));
        assert!(handle.lines()[0].contains("[INFO]"));

        handle.clear();
        assert!(writer.is_empty());
    }

    #[test]
    fn test_output_format() {
        let writer = MemoryWriter::with_output_format(OutputFormat::Xml);
        writer.process_event(&LogEvent::create("App", LogLevel::Info)).unwrap();
        assert!(writer.lines()[0].starts_with("<entry>"));
    }
}
