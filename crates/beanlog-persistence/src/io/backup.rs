//! Backup export and import.

use std::fs;
use std::path::{Path, PathBuf};

use beanlog_model::{Snapshot, validate};
use chrono::NaiveDate;
use serde_json::Value;

use super::write_atomic;
use crate::error::{PersistenceError, Result};

/// Leading part of every backup file name.
pub const BACKUP_PREFIX: &str = "beanlog";

/// Top-level keys a backup must carry.
const REQUIRED_KEYS: [&str; 2] = ["beans", "shots"];

/// A serialized backup, ready to be written or offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    pub file_name: String,
    /// Pretty-printed `{beans, shots}` JSON.
    pub contents: String,
}

impl Backup {
    /// Write the backup into `dir`, returning the file path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        write_atomic(&path, self.contents.as_bytes())?;
        tracing::info!(path = %path.display(), "Exported backup");
        Ok(path)
    }
}

/// `beanlog-backup-<YYYY-MM-DD>.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("{BACKUP_PREFIX}-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Serialize a snapshot as a dated backup.
pub fn export_snapshot(snapshot: &Snapshot, date: NaiveDate) -> Result<Backup> {
    let contents = serde_json::to_string_pretty(snapshot)
        .map_err(|source| PersistenceError::Serialization { source })?;
    Ok(Backup {
        file_name: backup_file_name(date),
        contents,
    })
}

/// Read a backup file chosen by the user.
pub fn read_backup(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse and fully check a backup.
///
/// Accepts only a JSON object with both `beans` and `shots`, every record
/// matching the schema, and no broken model invariant. Extra top-level keys
/// are ignored. Nothing is touched on failure.
pub fn import_snapshot(raw: &str) -> Result<Snapshot> {
    let value: Value =
        serde_json::from_str(raw).map_err(|source| PersistenceError::Malformed { source })?;

    for key in REQUIRED_KEYS {
        if value.get(key).is_none_or(Value::is_null) {
            return Err(PersistenceError::MissingKey { key });
        }
    }

    let snapshot: Snapshot =
        serde_json::from_value(value).map_err(|source| PersistenceError::Schema { source })?;

    validate(&snapshot).map_err(|violations| PersistenceError::Invalid { violations })?;

    tracing::info!(
        beans = snapshot.beans.len(),
        shots = snapshot.shots.len(),
        "Backup accepted"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_backup_file_name() {
        assert_eq!(backup_file_name(date()), "beanlog-backup-2024-05-01.json");
    }

    #[test]
    fn test_export_is_pretty_printed() {
        let backup = export_snapshot(&Snapshot::default(), date()).unwrap();
        assert_eq!(backup.contents, "{\n  \"beans\": [],\n  \"shots\": []\n}");
    }

    #[test]
    fn test_write_to_directory() {
        let dir = tempdir().unwrap();
        let backup = export_snapshot(&Snapshot::default(), date()).unwrap();
        let path = backup.write_to(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("beanlog-backup-2024-05-01.json"));
        assert_eq!(read_backup(&path).unwrap(), backup.contents);
    }

    #[test]
    fn test_import_rejects_malformed() {
        let err = import_snapshot("{not valid").unwrap_err();
        assert!(matches!(err, PersistenceError::Malformed { .. }));
    }

    #[test]
    fn test_import_requires_both_keys() {
        assert!(matches!(
            import_snapshot(r#"{"beans": []}"#),
            Err(PersistenceError::MissingKey { key: "shots" })
        ));
        assert!(matches!(
            import_snapshot(r#"{"beans": null, "shots": []}"#),
            Err(PersistenceError::MissingKey { key: "beans" })
        ));
        assert!(matches!(
            import_snapshot("[1, 2]"),
            Err(PersistenceError::MissingKey { key: "beans" })
        ));
    }

    #[test]
    fn test_import_rejects_wrong_shapes() {
        let bad_roast = r#"{"beans":[{"id":"b1","roaster":"A","name":"B","originType":"Blend","roastType":"Burnt","createdAt":1}],"shots":[]}"#;
        assert!(matches!(
            import_snapshot(bad_roast),
            Err(PersistenceError::Schema { .. })
        ));
        let fractional_time = r#"{"beans":[{"id":"b1","roaster":"A","name":"B","originType":"Blend","roastType":"Dark","createdAt":1}],"shots":[{"id":"s1","beanId":"b1","timestamp":2,"dose":18,"yield":36,"time":28.5,"rating":8}]}"#;
        assert!(matches!(
            import_snapshot(fractional_time),
            Err(PersistenceError::Schema { .. })
        ));
        assert!(matches!(
            import_snapshot(r#"{"beans": "lots", "shots": []}"#),
            Err(PersistenceError::Schema { .. })
        ));
    }

    #[test]
    fn test_import_rejects_invariant_violations() {
        let dangling = r#"{"beans":[],"shots":[{"id":"s1","beanId":"b1","timestamp":2,"dose":18,"yield":36,"time":28,"rating":8}]}"#;
        match import_snapshot(dangling) {
            Err(PersistenceError::Invalid { violations }) => assert_eq!(violations.len(), 1),
            other => panic!("expected Invalid, got {other:?}"),
        }
        let bad_rating = r#"{"beans":[{"id":"b1","roaster":"A","name":"B","originType":"Blend","roastType":"Dark","createdAt":1}],"shots":[{"id":"s1","beanId":"b1","timestamp":2,"dose":18,"yield":36,"time":28,"rating":0}]}"#;
        assert!(matches!(
            import_snapshot(bad_rating),
            Err(PersistenceError::Invalid { .. })
        ));
    }

    #[test]
    fn test_import_accepts_web_app_backup() {
        let raw = r#"{
  "beans": [
    {
      "id": "3f1c2a9e-2b7d-4c1e-9a6f-0d8e5b4c3a21",
      "roaster": "Acme",
      "name": "Dark Roast",
      "originType": "Single Origin",
      "roastType": "Dark",
      "tastingNotes": "",
      "image": "",
      "createdAt": 1714550400000
    }
  ],
  "shots": [
    {
      "id": "7a2b",
      "beanId": "3f1c2a9e-2b7d-4c1e-9a6f-0d8e5b4c3a21",
      "timestamp": 1714550500000,
      "dose": 18,
      "yield": 36,
      "time": 28,
      "grindSetting": "",
      "rating": 8,
      "notes": ""
    }
  ],
  "exportedBy": "someone"
}"#;
        let snapshot = import_snapshot(raw).unwrap();
        assert_eq!(snapshot.beans.len(), 1);
        assert_eq!(snapshot.shots[0].rating, 8);
        assert_eq!(snapshot.beans[0].image.as_deref(), Some(""));
    }
}
