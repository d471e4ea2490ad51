use plasmid_core::types::{PartialSample, SampleInput, SamplesInput, parse_float_prefix};
use plasmid_core::{PlasmidRecord, RecordInit, Sample, Volume};
use proptest::prelude::*;

fn volume() -> impl Strategy<Value = Volume> {
    prop_oneof![
        Just(Volume::Empty),
        "[0-9]{0,3}(\\.[0-9]{0,2})?".prop_map(Volume::from),
        "[a-z0-9. ]{0,6}".prop_map(Volume::from),
        (-1.0e6..1.0e6f64).prop_map(Volume::from),
    ]
}

fn partial_sample() -> impl Strategy<Value = PartialSample> {
    (
        proptest::option::of(volume()),
        proptest::option::of("[0-9:TZ-]{0,12}"),
        proptest::option::of("[0-9:TZ-]{0,12}"),
        proptest::option::of(any::<bool>()),
        proptest::option::of("[a-z]{0,6}"),
    )
        .prop_map(
            |(volume, date_created, date_modified, is_checked_out, checked_out_by)| PartialSample {
                volume,
                date_created,
                date_modified,
                is_checked_out,
                checked_out_by,
                ..PartialSample::default()
            },
        )
}

fn samples_input() -> impl Strategy<Value = SamplesInput> {
    let element = prop_oneof![
        partial_sample().prop_map(SampleInput::Object),
        volume().prop_map(SampleInput::Primitive),
    ];
    prop_oneof![
        Just(SamplesInput::Missing),
        Just(SamplesInput::List(Vec::new())),
        volume().prop_map(SamplesInput::Single),
        proptest::collection::vec(element, 1..5).prop_map(SamplesInput::List),
    ]
}

fn record_init() -> impl Strategy<Value = RecordInit> {
    (
        "[0-9]{0,5}",
        "[0-9a]{0,3}",
        "[A-Za-z]?[0-9]{0,3}",
        samples_input(),
        ".{0,12}",
        "[0-9T:-]{0,10}",
    )
        .prop_map(|(lot, sublot, bag, samples, notes, date_added)| RecordInit {
            lot,
            sublot,
            bag,
            samples,
            notes,
            date_added,
        })
}

fn expected_total(samples: &[Sample]) -> f64 {
    samples
        .iter()
        .map(|sample| match &sample.volume {
            Volume::Empty => 0.0,
            Volume::Text(text) => parse_float_prefix(text).unwrap_or(0.0),
            Volume::Number(n) if n.is_nan() => 0.0,
            Volume::Number(n) => *n,
        })
        .sum()
}

proptest! {
    /// Normalization never yields an empty sample list.
    #[test]
    fn test_normalized_samples_never_empty(input in samples_input()) {
        prop_assert!(!input.normalize().is_empty());
    }

    /// `total_volume` is the sum of the numeric sample volumes, also after an override.
    #[test]
    fn test_total_volume_matches_samples(init in record_init(), replacement in samples_input()) {
        let record = PlasmidRecord::new(init);
        prop_assert_eq!(record.total_volume(), expected_total(record.samples()));

        let record = record.with_samples(replacement);
        prop_assert_eq!(record.total_volume(), expected_total(record.samples()));
    }

    /// Every record equals itself.
    #[test]
    fn test_equality_is_reflexive(init in record_init()) {
        let record = PlasmidRecord::new(init);
        prop_assert_eq!(&record, &record.clone());
    }

    /// Rebuilding a record from its serialized payload loses nothing that equality compares.
    #[test]
    fn test_payload_round_trip(init in record_init()) {
        let record = PlasmidRecord::new(init);
        let json = serde_json::to_value(record.to_api_payload()).unwrap();

        prop_assert_eq!(PlasmidRecord::from_json(json), record);
    }

    /// Identity text ignores validity.
    #[test]
    fn test_full_id_is_literal(lot in "[0-9]{0,4}", sublot in "[0-9]{0,3}") {
        let record = PlasmidRecord::default().with_lot(lot.clone()).with_sublot(sublot.clone());
        prop_assert_eq!(record.full_id(), format!("{lot}-{sublot}"));
    }
}
