use std::fs;
use std::time::Duration;
use tempfile::tempdir;
use thw_logger::{LevelFilter, Logger};

#[test]
fn json_file_logging_writes_structured_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let log_dir = tmp.path().join("logs");

    let logger = Logger::builder()
        .name("thw-file-logging")
        .console(false)
        .directory(&log_dir)
        .json(true)
        .level(LevelFilter::INFO)
        .init()?;
    assert!(logger.writes_files());

    tracing::info!(capability = "storage", "registered singleton");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("a log file should be created");

    let content = fs::read_to_string(log_file)?;
    let line = content.lines().find(|l| l.contains("registered singleton")).expect("event line");
    assert!(line.starts_with('{'), "file output should be JSON: {line}");
    assert!(line.contains("\"capability\":\"storage\""));

    Ok(())
}
