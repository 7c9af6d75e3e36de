//! The one persisted document: the commissioning checklist, stored as a
//! single JSON snapshot and rewritten in full on every change.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use sf_core::checklist::Checklist;

use crate::validate::validate_checklist_json;
use crate::StoreError;

pub const CHECKLIST_FILE: &str = "commissioning_checklist.json";

/// Parse + structurally validate an imported document. All-or-nothing: any
/// violation rejects the whole document.
pub fn parse_checklist(text: &str) -> Result<Checklist, StoreError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let validation = validate_checklist_json(&value);
    if !validation.valid {
        return Err(StoreError::ImportRejected(validation.errors));
    }
    Ok(serde_json::from_value(value)?)
}

#[derive(Debug, Clone)]
pub struct ChecklistStore {
    path: PathBuf,
}

impl ChecklistStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        ChecklistStore { path: data_dir.into().join(CHECKLIST_FILE) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing snapshot means a fresh install: return the seeded default.
    pub fn load(&self) -> Result<Checklist, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no checklist snapshot, seeding default");
            return Ok(Checklist::default());
        }
        let text = fs::read_to_string(&self.path)?;
        parse_checklist(&text)
    }

    pub fn save(&self, doc: &Checklist) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), "checklist snapshot written");
        Ok(())
    }

    /// Import from a user-supplied file; the current snapshot is untouched
    /// unless the whole document validates.
    pub fn import_file(&self, path: &Path) -> Result<Checklist, StoreError> {
        let text = fs::read_to_string(path)?;
        let doc = parse_checklist(&text)?;
        self.save(&doc)?;
        Ok(doc)
    }

    /// Export the current document as formatted JSON.
    pub fn export_to(&self, doc: &Checklist, path: &Path) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(doc)?;
        fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(tag: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "sf-store-{tag}-{}-{:?}",
                std::process::id(),
                std::thread::current().id()
            ));
            fs::create_dir_all(&dir).unwrap();
            TempDir(dir)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn load_returns_default_when_no_snapshot_exists() {
        let tmp = TempDir::new("fresh");
        let store = ChecklistStore::new(&tmp.0);
        assert_eq!(store.load().unwrap(), Checklist::default());
    }

    #[test]
    fn save_then_load_round_trips_the_document() {
        let tmp = TempDir::new("roundtrip");
        let store = ChecklistStore::new(&tmp.0);
        let doc = Checklist::default();
        store.save(&doc).unwrap();
        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn invalid_import_leaves_the_snapshot_untouched() {
        let tmp = TempDir::new("badimport");
        let store = ChecklistStore::new(&tmp.0);
        let doc = Checklist::default();
        store.save(&doc).unwrap();

        let bad = tmp.0.join("import.json");
        fs::write(&bad, r#"{"Safety": [{"item": "X", "checked": "yes"}]}"#).unwrap();
        let err = store.import_file(&bad).unwrap_err();
        match err {
            StoreError::ImportRejected(errors) => {
                assert!(errors.iter().any(|e| e.contains("Safety")));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn extra_section_is_rejected_with_itemized_errors_not_a_parse_error() {
        let tmp = TempDir::new("extras");
        let store = ChecklistStore::new(&tmp.0);
        let doc = Checklist::default();
        store.save(&doc).unwrap();

        let mut value = serde_json::to_value(&doc).unwrap();
        value
            .as_object_mut()
            .unwrap()
            .insert("Extras".to_string(), serde_json::json!([]));
        let bad = tmp.0.join("import.json");
        fs::write(&bad, serde_json::to_string(&value).unwrap()).unwrap();

        match store.import_file(&bad).unwrap_err() {
            StoreError::ImportRejected(errors) => {
                assert!(errors.iter().any(|e| e.contains("Extras")));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn unparsable_import_is_a_parse_error() {
        let tmp = TempDir::new("garbage");
        let store = ChecklistStore::new(&tmp.0);
        let bad = tmp.0.join("import.json");
        fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(store.import_file(&bad), Err(StoreError::Parse(_))));
    }
}
