use apps_portal::storage::{FileStorage, MemoryStorage, StorageProvider};

#[cfg(test)]
mod file_tests {
    use super::*;

    #[test]
    fn set_get_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(storage.get("demo-auth-user").unwrap().is_none());

        storage.set("demo-auth-user", r#"{"hello":"world"}"#).unwrap();
        assert_eq!(
            storage.get("demo-auth-user").unwrap().as_deref(),
            Some(r#"{"hello":"world"}"#)
        );

        storage.delete("demo-auth-user").unwrap();
        assert!(storage.get("demo-auth-user").unwrap().is_none());
    }

    #[test]
    fn set_overwrites_the_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("slot", "one").unwrap();
        storage.set("slot", "two").unwrap();
        assert_eq!(storage.get("slot").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn deleting_an_absent_slot_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(storage.delete("never-written").is_ok());
    }

    #[test]
    fn traversal_components_in_keys_stay_inside_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("../../etc/passwd", "nope").unwrap();

        // The value round-trips under the sanitized key...
        assert_eq!(storage.get("../../etc/passwd").unwrap().as_deref(), Some("nope"));

        // ...and the only file written lives directly under the storage dir.
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let name = entries[0].as_ref().unwrap().file_name();
        assert!(!name.to_string_lossy().contains(".."));
    }

    #[test]
    fn construction_against_a_missing_directory_reads_as_empty() {
        let storage = FileStorage::new("/nonexistent-portal-dir/for-tests");
        assert!(storage.get("anything").unwrap().is_none());
    }
}

#[cfg(test)]
mod memory_tests {
    use super::*;

    #[test]
    fn round_trip_and_seed() {
        let storage = MemoryStorage::new();

        assert!(storage.get("k").unwrap().is_none());
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.delete("k").unwrap();
        assert!(storage.get("k").unwrap().is_none());

        storage.seed("k", "planted");
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("planted"));
    }

    #[test]
    fn failing_mode_rejects_every_operation() {
        let storage = MemoryStorage::new_failing();
        assert!(storage.get("k").is_err());
        assert!(storage.set("k", "v").is_err());
        assert!(storage.delete("k").is_err());
    }
}
