use super::*;
use serde_json::json;

mod parse_float_prefix {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_float_prefix("2"), Some(2.0));
        assert_eq!(parse_float_prefix("2.50"), Some(2.5));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("3."), Some(3.0));
    }

    #[test]
    fn test_reads_leading_number_only() {
        assert_eq!(parse_float_prefix("  1.5mL"), Some(1.5));
        assert_eq!(parse_float_prefix("4.2.1"), Some(4.2));
        assert_eq!(parse_float_prefix("1e2x"), Some(100.0));
    }

    #[test]
    fn test_rejects_non_numbers() {
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix("mL 2"), None);
    }
}

mod from_json {
    use super::*;

    #[test]
    fn test_shapes() {
        assert_eq!(Volume::from_json(json!(null)), Volume::Empty);
        assert_eq!(Volume::from_json(json!("1.5")), Volume::Text("1.5".into()));
        assert_eq!(Volume::from_json(json!(2.5)), Volume::Number(2.5));
        assert_eq!(Volume::from_json(json!(3)), Volume::Number(3.0));
        assert_eq!(Volume::from_json(json!(true)), Volume::Text("true".into()));
    }

    #[test]
    fn test_serialize_matches_input_shape() {
        assert_eq!(serde_json::to_value(Volume::Empty).unwrap(), json!(null));
        assert_eq!(serde_json::to_value(Volume::from("2.0")).unwrap(), json!("2.0"));
        assert_eq!(serde_json::to_value(Volume::Number(2.0)).unwrap(), json!(2.0));
    }
}

mod amount {
    use super::*;

    #[test]
    fn test_non_numeric_contributes_zero() {
        assert_eq!(Volume::Empty.amount(), 0.0);
        assert_eq!(Volume::from("abc").amount(), 0.0);
        assert_eq!(Volume::Number(f64::NAN).amount(), 0.0);
        assert_eq!(Volume::from("1.25").amount(), 1.25);
    }

    #[test]
    fn test_entry_text_of_numbers() {
        assert_eq!(Volume::Number(5.0).as_entry_text().as_deref(), Some("5"));
        assert_eq!(Volume::Number(2.5).as_entry_text().as_deref(), Some("2.5"));
        assert_eq!(Volume::Empty.as_entry_text(), None);
    }
}

mod equality {
    use super::*;

    #[test]
    fn test_type_sensitive() {
        assert_ne!(Volume::from("2.0"), Volume::Number(2.0));
        assert_ne!(Volume::Empty, Volume::from(""));
    }

    #[test]
    fn test_nan_equals_itself() {
        let nan = Volume::Number(f64::NAN);
        assert_eq!(nan, nan.clone());
    }
}
