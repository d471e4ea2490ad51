use super::*;
use chrono::{TimeZone, Utc};
use serde_json::json;

fn stored() -> PlasmidRecord {
    PlasmidRecord::from_json(json!({
        "lot": 5317, "sublot": 2, "bag": "C1", "notes": "pUC19",
        "samples": [{"volume": 1.5}, {"volume": null}],
    }))
}

#[test]
fn test_record_lists_samples() {
    assert_eq!(
        record(&stored()),
        "  5317-2  total 1.5 mL  (pUC19)\n    Sample 1: 1.5 mL\n    Sample 2: -"
    );
}

#[test]
fn test_checked_out_sample() {
    let now = Utc.with_ymd_and_hms(2024, 4, 2, 9, 0, 0).unwrap();
    let taken = stored().check_out(0, "mira", now).unwrap();

    assert!(record(&taken).contains(
        "Sample 1: 1.5 mL, checked out by mira at 2024-04-02T09:00:00.000Z"
    ));
}

#[test]
fn test_validation_lists_every_message() {
    let text = validation(&stored().with_bag("3C"));

    assert_eq!(
        text,
        "5317-2: invalid\n  Bag: must be one letter followed by a number with no leading zeros (e.g., C20)\n  Sample 2: this field cannot be empty"
    );
}

#[test]
fn test_summary_reports_missing() {
    let found = SearchSummary {
        found: Some("1/2".into()),
        bags: [("C1".to_string(), vec![stored()])].into_iter().collect(),
        not_found: vec!["9-9".into()],
    };

    let text = summary(&found);

    assert!(text.starts_with("C1:\n  5317-2"));
    assert!(text.ends_with("found 1/2\nnot found: 9-9"));
}
