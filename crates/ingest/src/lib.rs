//! # Snapshot Ingestion
//!
//! The data-access collaborator of the analytics engine. It reads a JSON
//! snapshot exported by the surrounding application and folds the loosely
//! typed legacy records onto the canonical `core-types` structures: field
//! aliases are resolved here, numbers and dates are coerced leniently, and
//! status strings are normalized, so the engine never sees more than one
//! spelling per concept.

// Declare the modules that make up this crate.
pub mod error;
pub mod raw;

// Re-export the core types to provide a clean public API.
pub use error::IngestError;
pub use raw::{RawItem, RawLot, RawSnapshot, Snapshot};

use std::path::Path;

/// Loads and converts a snapshot file.
///
/// Only a missing file or a malformed JSON document is an error; individual
/// incomplete records degrade field by field instead of being rejected.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, IngestError> {
    let contents = std::fs::read_to_string(path)?;
    let raw: RawSnapshot = serde_json::from_str(&contents)?;
    let snapshot = raw.into_snapshot();
    tracing::debug!(
        items = snapshot.items.len(),
        lots = snapshot.lots.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_snapshot_reads_and_converts_a_file() {
        let path = std::env::temp_dir().join("lotbook-ingest-test-snapshot.json");
        std::fs::write(
            &path,
            r#"{"items": [{"id": "i1", "status": "sold"}], "lots": [{"id": "l1", "totalCost": 10}]}"#,
        )
        .unwrap();

        let snapshot = load_snapshot(&path).unwrap();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.lots.len(), 1);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn a_missing_file_is_an_io_error() {
        let result = load_snapshot(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(IngestError::Io(_))));
    }

    #[test]
    fn a_malformed_document_is_a_parse_error() {
        let path = std::env::temp_dir().join("lotbook-ingest-test-garbage.json");
        std::fs::write(&path, "not json at all").unwrap();

        let result = load_snapshot(&path);
        assert!(matches!(result, Err(IngestError::Parse(_))));

        std::fs::remove_file(&path).ok();
    }
}
