//! Stress tests for concurrent dispatch
//!
//! These tests verify:
//! - Concurrent file appends never interleave partial events
//! - Loggers shared across threads keep consistent metrics
//! - Reconfiguration while other threads log is safe

use hierarchical_logger::prelude::*;
use hierarchical_logger::writers::FileWriter;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const EVENTS_PER_THREAD: usize = 200;

/// Many threads appending through one file writer produce whole lines only
#[test]
fn test_concurrent_file_appends_do_not_interleave() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("concurrent.log");

    let writers: Vec<Box<dyn Writer>> = vec![Box::new(FileWriter::open(&log_file))];
    let logger = Logger::from_parts("Stress\\File", Some(LogLevel::Debug), writers);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..EVENTS_PER_THREAD {
                    logger
                        .info(format!("thread-{}-event-{}-{}", t, i, "x".repeat(64)))
                        .expect("append failed");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread panicked");
    }

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * EVENTS_PER_THREAD);

    let mut seen = HashSet::new();
    for line in &lines {
        assert_eq!(line.matches("[INFO]").count(), 1, "merged line: {}", line);
        let message = line.rsplit(' ').next().unwrap();
        assert!(message.ends_with(&"x".repeat(64)), "truncated line: {}", line);
        assert!(seen.insert(message.to_string()), "duplicate line: {}", line);
    }
}

/// Two independent writers on the same file still keep lines whole
#[test]
fn test_separate_writers_same_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("shared.log");

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let path = log_file.clone();
            thread::spawn(move || {
                let writers: Vec<Box<dyn Writer>> = vec![Box::new(FileWriter::open(path))];
                let logger =
                    Logger::from_parts(format!("Writer{}", t), Some(LogLevel::Info), writers);
                for i in 0..EVENTS_PER_THREAD {
                    logger.warning(format!("w{}-{}", t, i)).expect("append failed");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread panicked");
    }

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content.lines().count(), 4 * EVENTS_PER_THREAD);
    assert!(content.lines().all(|line| line.contains("[WARNING]")));
}

/// Metrics stay exact under contention
#[test]
fn test_shared_logger_metrics() {
    let sink = MemoryWriter::new();
    let writers: Vec<Box<dyn Writer>> = vec![Box::new(sink.clone())];
    let logger = Logger::from_parts("Stress\\Metrics", Some(LogLevel::Warning), writers);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..EVENTS_PER_THREAD {
                    if i % 2 == 0 {
                        logger.error("kept").unwrap();
                    } else {
                        logger.debug("dropped").unwrap();
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread panicked");
    }

    let half = (THREADS * EVENTS_PER_THREAD / 2) as u64;
    assert_eq!(logger.metrics().events_dispatched(), half);
    assert_eq!(logger.metrics().events_suppressed(), half);
    assert_eq!(sink.len() as u64, half);
}

/// Reloading the configuration while other threads create loggers and log
#[test]
fn test_reconfigure_under_load() {
    let manager = Arc::new(LoggerManager::new());
    manager
        .configure(vec![ConfigurationRule::new("App", LogLevel::Debug)])
        .unwrap();

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                for i in 0..EVENTS_PER_THREAD {
                    let logger = manager
                        .logger(&format!("App\\Worker{}", t % 3))
                        .expect("logger creation failed");
                    let threshold = logger.threshold().expect("App rule always matches");
                    assert!(threshold == LogLevel::Debug || threshold == LogLevel::Error);
                    logger.info(format!("tick {}", i)).unwrap();
                }
            })
        })
        .collect();

    for round in 0..50 {
        let level = if round % 2 == 0 { LogLevel::Error } else { LogLevel::Debug };
        manager
            .configure(vec![ConfigurationRule::new("App", level)])
            .unwrap();
    }

    for worker in workers {
        worker.join().expect("thread panicked");
    }
}
