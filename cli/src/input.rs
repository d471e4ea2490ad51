use anyhow::{Context, bail};
use plasmid_core::PlasmidRecord;
use serde_json::Value as JsonValue;
use std::path::Path;

/// Reads one record object or an array of them.
pub(crate) fn read_records(path: &Path) -> anyhow::Result<Vec<PlasmidRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_records(&text).with_context(|| format!("failed to parse {}", path.display()))
}

pub(crate) fn parse_records(text: &str) -> anyhow::Result<Vec<PlasmidRecord>> {
    match serde_json::from_str(text)? {
        JsonValue::Array(items) => Ok(items.into_iter().map(PlasmidRecord::from_json).collect()),
        object @ JsonValue::Object(_) => Ok(vec![PlasmidRecord::from_json(object)]),
        other => bail!("expected a record object or an array of records, found {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_object() {
        let records = parse_records(r#"{"lot": "12", "sublot": "1", "bag": "C1"}"#).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].full_id(), "12-1");
    }

    #[test]
    fn test_array() {
        let records = parse_records(r#"[{"lot": "12"}, {"lot": "13"}]"#).unwrap();

        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_rejects_scalar() {
        assert!(parse_records("42").is_err());
        assert!(parse_records("{not json").is_err());
    }

    #[test]
    fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, r#"[{"lot": "1", "sublot": "0", "bag": "C2", "samples": ["1.0"]}]"#)
            .unwrap();

        let records = read_records(&path).unwrap();

        assert!(records[0].is_valid());
    }
}
