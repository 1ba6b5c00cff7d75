use crate::model::Registry;

/// Snapshot bundled into the binary at build time.
pub(super) const BASELINE_DOCUMENT: &str = include_str!("../../data/baseline.json");

/// Parse the bundled snapshot. `None` when the document does not match the
/// current schema.
pub(super) fn parse_baseline(document: &str) -> Option<Registry> {
    match serde_json::from_str(document) {
        Ok(registry) => Some(registry),
        Err(e) => {
            log::warn!("Bundled baseline snapshot is unreadable: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DATA_FORMAT_VERSION;

    #[test]
    fn test_bundled_baseline_parses() {
        let registry = parse_baseline(BASELINE_DOCUMENT).unwrap();
        assert_eq!(registry.metadata.data_format_version, DATA_FORMAT_VERSION);
        assert!(registry.type_count() > 0);
        assert!(registry.variants("Node").is_some());
    }

    #[test]
    fn test_garbage_is_absent() {
        assert!(parse_baseline("{ not json").is_none());
        assert!(parse_baseline("[]").is_none());
    }
}
