use super::*;

#[test]
fn bag_name_normalizes_case_and_whitespace() {
    let bag = BagName::try_new(" c20 ".to_string()).unwrap();
    assert_eq!(bag.to_string(), "C20");
    assert_eq!(bag.to_string(), "C20");
}

#[test]
fn bag_name_rejects_bad_shapes() {
    for name in ["", "C", "C0", "C07", "3C", "CC3", "C-1"] {
        let result = BagName::try_new(name.to_string());
        assert!(result.is_err(), "'{name}' should be rejected");
    }
}

#[test]
fn bag_name_orders_naturally() {
    let mut bags: Vec<BagName> = ["C10", "C2", "B7", "C1"]
        .iter()
        .map(|s| BagName::try_new(s.to_string()).unwrap())
        .collect();
    bags.sort();

    let names: Vec<&str> = bags.iter().map(|b| b.as_ref()).collect();
    assert_eq!(names, vec!["B7", "C1", "C2", "C10"]);
}

#[test]
fn record_id_parses_and_displays() {
    let id: RecordId = " 5317-2 ".parse().unwrap();
    assert_eq!(id, RecordId::new(5317, 2));
    assert_eq!(id.to_string(), "5317-2");
}

#[test]
fn record_id_rejects_malformed() {
    for input in ["5317", "5317-", "-2", "53a7-2", "1-2-3", ""] {
        assert!(input.parse::<RecordId>().is_err(), "'{input}' should fail");
    }
}

#[test]
fn record_id_orders_numerically() {
    let mut ids = vec![RecordId::new(10, 1), RecordId::new(9, 2), RecordId::new(9, 1)];
    ids.sort();
    assert_eq!(
        ids,
        vec![RecordId::new(9, 1), RecordId::new(9, 2), RecordId::new(10, 1)]
    );
}
