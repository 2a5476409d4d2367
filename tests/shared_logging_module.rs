use orgmap::shared::logging::EventLog;
use serde_json::Value;
use std::fs;

#[test]
fn shared_logging_appends_json_lines() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("logs/orgmap.log");
    let log = EventLog::new(&path);

    log.info("store.appended", "saved cfg-1");
    log.warn("store.load_failed", "bad json");

    let raw = fs::read_to_string(&path).expect("read log");
    let events: Vec<Value> = raw
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["level"], "info");
    assert_eq!(events[0]["event"], "store.appended");
    assert_eq!(events[1]["level"], "warn");
    assert_eq!(events[1]["message"], "bad json");
    assert!(events[1]["timestamp"].as_i64().is_some());
}

#[test]
fn shared_logging_never_fails_the_caller() {
    let temp = tempfile::tempdir().expect("tempdir");
    let blocker = temp.path().join("not-a-dir");
    fs::write(&blocker, "file").expect("seed");

    EventLog::new(blocker.join("orgmap.log")).error("store.failed", "ignored");
    EventLog::disabled().info("store.appended", "ignored");
    assert!(EventLog::disabled().path().is_none());
}
