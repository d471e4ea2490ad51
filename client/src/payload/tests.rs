use super::*;
use serde_json::{Value, json};

mod common {
    use super::*;

    pub(super) fn record(lot: &str, volume: &str) -> PlasmidRecord {
        PlasmidRecord::from_json(json!({
            "lot": lot,
            "sublot": "1",
            "bag": "C1",
            "samples": [volume],
            "notes": "",
            "date_added": "",
        }))
    }

    pub(super) fn to_json(value: &impl Serialize) -> Value {
        serde_json::to_value(value).unwrap()
    }
}

mod add_request {
    use super::common::*;
    use super::*;

    #[test]
    fn test_single_record_is_an_object() {
        let body = to_json(&add_request(&[record("12", "1.0")]).unwrap());

        assert_eq!(body["lot"], "12");
        assert_eq!(body["samples"][0]["volume"], "1.0");
        assert_eq!(body["samples"][0]["is_checked_out"], false);
    }

    #[test]
    fn test_several_records_are_an_array() {
        let body = to_json(&add_request(&[record("12", "1.0"), record("13", "2.0")]).unwrap());

        assert_eq!(body.as_array().map(Vec::len), Some(2));
        assert_eq!(body[1]["lot"], "13");
    }

    #[test]
    fn test_refuses_invalid_record() {
        let err = add_request(&[record("12", "1.0"), record("012", "1.0")]).unwrap_err();

        assert_eq!(
            err.to_string(),
            "record 012-1 is not valid: Lot: this field cannot have leading zeros"
        );
    }

    #[test]
    fn test_refuses_empty_batch() {
        assert!(matches!(add_request(&[]), Err(ClientError::NothingToSend)));
    }
}

mod modify_request {
    use super::common::*;
    use super::*;

    #[test]
    fn test_carries_both_versions() {
        let previous = record("12", "1.0");
        let updated = previous.clone().with_notes("moved");

        let body = to_json(&modify_request(&updated, &previous).unwrap());

        assert_eq!(body["updated"]["notes"], "moved");
        assert_eq!(body["previous"]["notes"], "");
    }

    #[test]
    fn test_only_updated_must_be_valid() {
        let previous = record("12", "0.1");
        let updated = previous.clone().with_samples(json!(["1.0"]));

        assert!(modify_request(&updated, &previous).is_ok());
        assert!(modify_request(&previous, &updated).is_err());
    }
}

mod checkout_requests {
    use super::common::*;
    use super::*;

    #[test]
    fn test_check_out_shape() {
        let request = CheckOutRequest {
            record: record("12", "1.0").to_api_payload(),
            sample_index: 0,
            checked_out_by: "ana",
        };

        let body = to_json(&request);

        assert_eq!(body["sample_index"], 0);
        assert_eq!(body["checked_out_by"], "ana");
        assert_eq!(body["record"]["lot"], "12");
    }

    #[test]
    fn test_check_in_shape() {
        let request = CheckInRequest {
            record: record("12", "1.0").to_api_payload(),
            sample_index: 2,
        };

        let body = to_json(&request);

        assert_eq!(body, json!({"record": body["record"].clone(), "sample_index": 2}));
    }
}

mod responses {
    use super::*;

    #[test]
    fn test_listing() {
        let body = r#"{"success": true, "data": {"C1": [{"lot": 5317, "sublot": 2, "bag": "C1", "samples": [{"volume": 1.5}], "notes": null, "date_added": ""}]}}"#;

        let listing = parse_listing(body).unwrap();

        assert_eq!(listing["C1"][0].full_id(), "5317-2");
        assert_eq!(listing["C1"][0].total_volume(), 1.5);
    }

    #[test]
    fn test_listing_fills_missing_bag() {
        let body = r#"{"data": {"C4": [{"lot": 1, "sublot": 1, "samples": [1.0]}]}}"#;

        let listing = parse_listing(body).unwrap();

        assert_eq!(listing["C4"][0].bag(), "C4");
    }

    #[test]
    fn test_listing_without_data() {
        assert!(matches!(
            parse_listing(r#"{"success": true}"#),
            Err(ClientError::MissingData("data"))
        ));
    }

    #[test]
    fn test_search_summary() {
        let body = r#"{"summary": {"found": "1/2", "bags": {"C2": [{"lot": 3380, "sublot": 4, "bag": "C2"}]}, "not_found": ["1-1"]}}"#;

        let summary = parse_search(body).unwrap();

        assert_eq!(summary.found.as_deref(), Some("1/2"));
        assert_eq!(summary.bags["C2"][0].full_id(), "3380-4");
        assert_eq!(summary.not_found, vec!["1-1"]);
    }

    #[test]
    fn test_search_flat_results() {
        let body = r#"{"results": [{"lot": 1, "sublot": 1, "bag": "C2"}, {"lot": 2, "sublot": 1, "bag": "C1"}]}"#;

        let summary = parse_search(body).unwrap();

        let bags: Vec<&String> = summary.bags.keys().collect();
        assert_eq!(bags, vec!["C1", "C2"]);
        assert_eq!(summary.found, None);
    }

    #[test]
    fn test_message() {
        assert_eq!(
            parse_message(r#"{"success": true, "message": "Plasmid 1-1 successfully deleted"}"#),
            "Plasmid 1-1 successfully deleted"
        );
        assert_eq!(parse_message("not json"), "");
    }

    #[test]
    fn test_backend_error_prefers_error_field() {
        let err = backend_error(400, r#"{"error": "Missing 'lot', 'sublot' fields"}"#);

        assert_eq!(
            err.to_string(),
            "backend (400): Missing 'lot', 'sublot' fields"
        );
    }

    #[test]
    fn test_backend_error_falls_back_to_body() {
        assert_eq!(
            backend_error(502, " Bad Gateway \n").to_string(),
            "backend (502): Bad Gateway"
        );
        assert_eq!(backend_error(500, "").to_string(), "backend (500): request failed");
    }
}
