use confine_logger::{AUDIT_TARGET, LevelFilter, Logger};
use std::fs;
use tempfile::tempdir;

#[test]
fn audit_only_log_keeps_nothing_but_audit_events() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let dir = tmp.path().join("logs");

    let logger = Logger::builder()
        .name("confine-audit-only")
        .console(false)
        .audit_only(true)
        .level(LevelFilter::TRACE)
        .path(&dir)
        .json()
        .init()?;

    tracing::warn!("disk almost full");
    tracing::info!(target: AUDIT_TARGET, "configuration of 'workers': input: '0' output: '4'");
    drop(logger);

    let mut contents = String::new();
    for entry in fs::read_dir(&dir)?.flatten() {
        contents.push_str(&fs::read_to_string(entry.path())?);
    }
    assert!(contents.contains("configuration of 'workers'"), "{contents}");
    assert!(contents.contains(AUDIT_TARGET), "{contents}");
    assert!(!contents.contains("disk almost full"), "{contents}");

    Ok(())
}
