//! Loading and saving the snapshot slot.

use beanlog_model::{Bean, Shot, Snapshot, validate};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{PersistenceError, Result};
use crate::slot::{RESCUE_KEY, STORAGE_KEY, SlotStore};

/// Load the persisted snapshot.
///
/// Never fails. A missing or unreadable slot yields an empty snapshot. Records
/// are read one at a time: a `null` or absent `beans`/`shots` is an empty
/// collection, a fractional shot `time` is rounded, and a record that still
/// does not fit is dropped with a `warn`. Whenever anything is dropped or
/// rewritten, the raw slot is first copied to [`RESCUE_KEY`] so the next save
/// cannot lose it.
pub fn load_snapshot<S: SlotStore + ?Sized>(slot: &mut S) -> Snapshot {
    let raw = match slot.read(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key = STORAGE_KEY, "no saved data, starting empty");
            return Snapshot::default();
        }
        Err(error) => {
            tracing::warn!(key = STORAGE_KEY, %error, "failed to read saved data, starting empty");
            return Snapshot::default();
        }
    };

    let mut document = match serde_json::from_str(&raw) {
        Ok(Value::Object(document)) => document,
        Ok(other) => {
            tracing::warn!(
                key = STORAGE_KEY,
                kind = json_kind(&other),
                "saved data is not an object, starting empty"
            );
            rescue(slot, &raw);
            return Snapshot::default();
        }
        Err(error) => {
            tracing::warn!(key = STORAGE_KEY, %error, "saved data is malformed, starting empty");
            rescue(slot, &raw);
            return Snapshot::default();
        }
    };

    let mut lossy = false;
    let beans: Vec<Bean> = records(document.remove("beans"), "beans", &mut lossy, |_, _| false);
    let shots: Vec<Shot> = records(document.remove("shots"), "shots", &mut lossy, round_time);
    if lossy {
        rescue(slot, &raw);
    }
    let snapshot = Snapshot::new(beans, shots);

    if let Err(violations) = validate(&snapshot) {
        tracing::warn!(
            key = STORAGE_KEY,
            count = violations.len(),
            "saved data breaks model invariants; keeping it as-is"
        );
    }

    tracing::info!(
        beans = snapshot.beans.len(),
        shots = snapshot.shots.len(),
        "Loaded bean log"
    );
    snapshot
}

/// Read each element of a saved collection on its own.
///
/// `repair` may patch a record before it is parsed and reports whether it did.
fn records<T: DeserializeOwned>(
    value: Option<Value>,
    key: &'static str,
    lossy: &mut bool,
    repair: impl Fn(&mut Map<String, Value>, usize) -> bool,
) -> Vec<T> {
    let items = match value {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => {
            tracing::warn!(
                key,
                kind = json_kind(&other),
                "saved collection is not a list, dropping it"
            );
            *lossy = true;
            return Vec::new();
        }
    };

    let mut kept = Vec::with_capacity(items.len());
    for (index, mut item) in items.into_iter().enumerate() {
        if let Value::Object(record) = &mut item
            && repair(record, index)
        {
            *lossy = true;
        }
        match serde_json::from_value(item) {
            Ok(record) => kept.push(record),
            Err(error) => {
                tracing::warn!(key, index, %error, "dropping unreadable saved record");
                *lossy = true;
            }
        }
    }
    kept
}

/// Round a fractional, non-negative `time` to whole seconds.
fn round_time(shot: &mut Map<String, Value>, index: usize) -> bool {
    let Some(seconds) = shot.get("time").and_then(Value::as_f64) else {
        return false;
    };
    if seconds.fract() == 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&seconds) {
        return false;
    }
    let rounded = seconds.round() as u32;
    tracing::warn!(key = "shots", index, seconds, rounded, "rounding fractional shot time");
    shot.insert("time".to_string(), Value::from(rounded));
    true
}

/// Keep the raw slot aside before the loaded state replaces it.
fn rescue<S: SlotStore + ?Sized>(slot: &mut S, raw: &str) {
    match slot.write(RESCUE_KEY, raw) {
        Ok(()) => tracing::warn!(key = RESCUE_KEY, "kept a copy of the unreadable saved data"),
        Err(error) => {
            tracing::error!(
                key = RESCUE_KEY,
                %error,
                "could not keep a copy of the unreadable saved data"
            );
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Serialize the snapshot and overwrite the slot.
pub fn save_snapshot<S: SlotStore + ?Sized>(slot: &mut S, snapshot: &Snapshot) -> Result<()> {
    let json =
        serde_json::to_string(snapshot).map_err(|source| PersistenceError::Serialization { source })?;
    slot.write(STORAGE_KEY, &json)?;
    tracing::info!(
        beans = snapshot.beans.len(),
        shots = snapshot.shots.len(),
        bytes = json.len(),
        "Saved bean log"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::MemorySlotStore;

    const SAVED: &str = r#"{"beans":[{"id":"b1","roaster":"Acme","name":"House","originType":"Blend","roastType":"Medium","tastingNotes":"","createdAt":1}],"shots":[{"id":"s1","beanId":"b1","timestamp":2,"dose":18.0,"yield":36.0,"time":28,"grindSetting":"","rating":8,"notes":""}]}"#;

    #[test]
    fn test_load_missing_slot_is_empty() {
        let mut slot = MemorySlotStore::new();
        assert!(load_snapshot(&mut slot).is_empty());
        assert_eq!(slot.get(RESCUE_KEY), None);
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let mut slot = MemorySlotStore::new();
        slot.insert(STORAGE_KEY, "{not valid");
        assert!(load_snapshot(&mut slot).is_empty());
        assert_eq!(slot.get(RESCUE_KEY), Some("{not valid"));
    }

    #[test]
    fn test_load_absent_key_is_empty_collection() {
        let mut slot = MemorySlotStore::new();
        slot.insert(
            STORAGE_KEY,
            r#"{"beans":[{"id":"b1","roaster":"Acme","name":"House","originType":"Blend","roastType":"Dark","createdAt":1}]}"#,
        );
        let snapshot = load_snapshot(&mut slot);
        assert_eq!(snapshot.beans.len(), 1);
        assert!(snapshot.shots.is_empty());
    }

    #[test]
    fn test_save_of_load_is_identical() {
        let mut slot = MemorySlotStore::new();
        slot.insert(STORAGE_KEY, SAVED);
        let snapshot = load_snapshot(&mut slot);
        save_snapshot(&mut slot, &snapshot).unwrap();
        assert_eq!(slot.get(STORAGE_KEY), Some(SAVED));
        assert_eq!(slot.get(RESCUE_KEY), None);
    }

    #[test]
    fn test_load_keeps_good_records() {
        let mut slot = MemorySlotStore::new();
        let raw = r#"{"beans":[{"id":"b1","roaster":"Acme","name":"House","originType":"Blend","roastType":"Medium","createdAt":1},{"id":"b2","roaster":"Acme","name":"Broken","originType":"Blend","roastType":"Burnt","createdAt":2}],"shots":[{"id":"s1","beanId":"b1","timestamp":2,"dose":18,"yield":36,"time":27.5,"rating":8}]}"#;
        slot.insert(STORAGE_KEY, raw);

        let snapshot = load_snapshot(&mut slot);
        assert_eq!(snapshot.beans.len(), 1);
        assert_eq!(snapshot.beans[0].name, "House");
        assert_eq!(snapshot.shots.len(), 1);
        assert_eq!(snapshot.shots[0].time, 28);
        assert_eq!(slot.get(RESCUE_KEY), Some(raw));
    }

    #[test]
    fn test_load_null_collections_are_empty() {
        let mut slot = MemorySlotStore::new();
        slot.insert(
            STORAGE_KEY,
            r#"{"beans":[{"id":"b1","roaster":"Acme","name":"House","originType":"Blend","roastType":"Dark","createdAt":1}],"shots":null}"#,
        );
        let snapshot = load_snapshot(&mut slot);
        assert_eq!(snapshot.beans.len(), 1);
        assert!(snapshot.shots.is_empty());
        assert_eq!(slot.get(RESCUE_KEY), None);
    }

    #[test]
    fn test_load_non_list_collection_is_rescued() {
        let mut slot = MemorySlotStore::new();
        slot.insert(STORAGE_KEY, r#"{"beans":"lots","shots":[]}"#);
        assert!(load_snapshot(&mut slot).is_empty());
        assert!(slot.get(RESCUE_KEY).is_some());
    }

    #[test]
    fn test_save_failure_is_reported() {
        let mut slot = MemorySlotStore::with_quota(8);
        slot.insert(STORAGE_KEY, SAVED);
        let snapshot = load_snapshot(&mut slot);
        let err = save_snapshot(&mut slot, &snapshot).unwrap_err();
        assert!(matches!(err, PersistenceError::QuotaExceeded { .. }));
        assert_eq!(slot.get(STORAGE_KEY), Some(SAVED));
    }
}
