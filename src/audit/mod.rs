// src/audit/mod.rs
//
// Append-only audit trail.
//
// One `action-name,timestamp` line per notable catalog action, written to a
// CSV file. The trail is fire-and-forget: a failed write is reported through
// the log facade and never reaches the caller.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::events::{
    AuthorRegistered, AuthorRemoved, BookAdded, BookBorrowed, BookRemoved, BookReturned,
    DomainEvent, EventBus, ReaderRegistered, ReaderRemoved, SectionRegistered, SectionRemoved,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct AuditTrail {
    path: PathBuf,
}

impl AuditTrail {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one `action,timestamp` line. Never fails the caller.
    pub fn record(&self, action: &str, at: DateTime<Utc>) {
        let line = format!("{},{}\n", action, at.format(TIMESTAMP_FORMAT));
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));
        if let Err(err) = result {
            log::warn!("audit write to {} failed: {}", self.path.display(), err);
        }
    }
}

/// Subscribe the audit trail to every catalog event on the bus.
pub fn register_audit_handlers(bus: &EventBus, trail: Arc<AuditTrail>) {
    macro_rules! audit {
        ($event:ty) => {{
            let trail = Arc::clone(&trail);
            bus.subscribe::<$event, _>(move |event| {
                trail.record(event.event_type(), event.occurred_at());
            });
        }};
    }

    audit!(AuthorRegistered);
    audit!(SectionRegistered);
    audit!(BookAdded);
    audit!(ReaderRegistered);
    audit!(BookRemoved);
    audit!(AuthorRemoved);
    audit!(ReaderRemoved);
    audit!(SectionRemoved);
    audit!(BookBorrowed);
    audit!(BookReturned);
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_record_appends_one_line_per_action() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.csv");
        let trail = AuditTrail::new(&path);

        trail.record("BookBorrowed", Utc::now());
        trail.record("BookReturned", Utc::now());

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("BookBorrowed,"));
        assert!(lines[1].starts_with("BookReturned,"));
    }

    #[test]
    fn test_record_on_unwritable_path_does_not_panic() {
        let trail = AuditTrail::new("/nonexistent-dir/audit.csv");
        trail.record("BookBorrowed", Utc::now());
    }

    #[test]
    fn test_bus_subscription_writes_audit_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.csv");
        let bus = EventBus::new();
        register_audit_handlers(&bus, Arc::new(AuditTrail::new(&path)));

        bus.emit(BookAdded::new(Uuid::new_v4(), "Luceafarul".to_string()));
        bus.emit(BookBorrowed::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        ));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("BookAdded,"));
        assert!(contents.contains("BookBorrowed,"));
    }
}
