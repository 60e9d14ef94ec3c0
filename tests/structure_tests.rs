//! Data structure and display tests

use rstest::rstest;
use sdmx_registry::models::{
    Attribute, AttributeRelationship, MeasureDimension, OBS_VALUE, PrimaryMeasure, TimeDimension,
};
use sdmx_registry::text::UNNAMED_ARTEFACT;
use sdmx_registry::{
    Codelist, Component, ComponentKind, DataStructure, DataStructureBuilder, Dimension,
    DisplayOptions, MaintainableArtefact, Nameable, Reference, RegistryError, TimePeriod,
    PeriodKind,
};

fn exchange_rate_structure() -> DataStructure {
    DataStructureBuilder::new("ECB", "ECB_EXR1", Some("1.0"))
        .dimension(Dimension::new("FREQ"))
        .dimension(Dimension::new("CURRENCY"))
        .dimension(Dimension::from_component(Component::from_concept(Reference::item(
            "ECB",
            "ECB_CONCEPTS",
            Some("1.0"),
            "EXR_TYPE",
        ))))
        .time_dimension(TimeDimension::new("TIME_PERIOD"))
        .measure_dimension(MeasureDimension::new("MEASURE"))
        .attribute(
            Attribute::new("OBS_STATUS")
                .mandatory()
                .attached_to(AttributeRelationship::PrimaryMeasure),
        )
        .attribute(Attribute::new("CURRENCY"))
        .primary_measure(PrimaryMeasure::new("EXR_VALUE"))
        .build()
}

mod component_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case("FREQ", ComponentKind::Dimension)]
    #[case("EXR_TYPE", ComponentKind::Dimension)]
    #[case("CURRENCY", ComponentKind::Dimension)]
    #[case("OBS_STATUS", ComponentKind::Attribute)]
    #[case("MEASURE", ComponentKind::MeasureDimension)]
    #[case("TIME_PERIOD", ComponentKind::TimeDimension)]
    #[case("EXR_VALUE", ComponentKind::PrimaryMeasure)]
    #[case(OBS_VALUE, ComponentKind::PrimaryMeasure)]
    fn test_find_component_kind(#[case] id: &str, #[case] kind: ComponentKind) {
        let dsd = exchange_rate_structure();
        assert_eq!(dsd.find_component(id).map(|c| c.kind()), Some(kind));
    }

    #[test]
    fn test_unknown_component_is_a_miss() {
        let dsd = exchange_rate_structure();
        assert!(dsd.find_component("UNIT_MULT").is_none());
        assert!(!dsd.is_dimension("UNIT_MULT"));
    }

    #[test]
    fn test_shared_id_resolves_to_dimension() {
        let dsd = exchange_rate_structure();
        assert!(dsd.is_dimension("CURRENCY"));
        assert!(!dsd.is_attribute("CURRENCY"));
        assert!(dsd.is_measure_dimension("MEASURE"));
        assert!(dsd.is_time_dimension("TIME_PERIOD"));
    }

    #[test]
    fn test_key_layout() {
        let dsd = exchange_rate_structure();
        assert_eq!(dsd.key_ids(), vec!["FREQ", "CURRENCY", "EXR_TYPE", "TIME_PERIOD"]);
        assert_eq!(dsd.key_position("EXR_TYPE"), Ok(2));
        assert_eq!(dsd.key_position("TIME_PERIOD"), Ok(3));
        assert!(matches!(
            dsd.key_position("MEASURE"),
            Err(RegistryError::KeyPosition { .. })
        ));
    }

    #[test]
    fn test_components_round_trip_through_json() {
        let dsd = exchange_rate_structure();
        let json = serde_json::to_string(&dsd).unwrap();
        let parsed: DataStructure = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, dsd);
    }
}

mod display_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn codelist(maintainable: MaintainableArtefact) -> Codelist {
        Codelist::new(maintainable)
    }

    #[test]
    fn test_name_in_requested_locale() {
        let cl = codelist(
            MaintainableArtefact::new("ECB", "CL_FREQ", None)
                .with_name("en", "Frequency")
                .with_name("de", "Frequenz"),
        );
        assert_eq!(cl.display_text(&DisplayOptions::for_locale("de")), "Frequenz");
        assert_eq!(cl.display_text(&DisplayOptions::for_locale("it")), "Frequency");
    }

    #[test]
    fn test_description_in_other_language_beats_id() {
        let mut maintainable = MaintainableArtefact::new("ECB", "CL_FREQ", None);
        maintainable.nameable = maintainable.nameable.with_description("fr", "Fréquence");
        let cl = codelist(maintainable);

        assert_eq!(cl.display_text(&DisplayOptions::for_locale("de")), "Fréquence");
    }

    #[test]
    fn test_id_then_literal() {
        let cl = codelist(MaintainableArtefact::new("ECB", "CL_FREQ", None));
        assert_eq!(cl.display_text(&DisplayOptions::default()), "CL_FREQ");

        let mut anonymous = MaintainableArtefact::default();
        anonymous.agency_id = Some("ECB".to_string());
        assert_eq!(codelist(anonymous).display_text(&DisplayOptions::default()), UNNAMED_ARTEFACT);
    }

    #[test]
    fn test_sanitised_and_truncated() {
        let cl = codelist(
            MaintainableArtefact::new("ECB", "CL_FREQ", None).with_name("en", "Rates \"daily\""),
        );
        let options = DisplayOptions::builder().sanitize(true).max_length(12).build();
        assert_eq!(cl.display_text(&options), "Rates &quot;daily");
    }
}

mod time_period_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case("2019", "2019")]
    #[case("2019-S2", "2019-S2")]
    #[case("2019-Q4", "2019-Q4")]
    #[case("2019-M07", "2019-07")]
    #[case("2019-W01", "2019-W01")]
    #[case("2019-12-31", "2019-12-31")]
    fn test_canonical_form(#[case] input: &str, #[case] expected: &str) {
        let period: TimePeriod = input.parse().unwrap();
        assert_eq!(period.to_string(), expected);
    }

    #[test]
    fn test_out_of_range_year_is_rejected() {
        assert_eq!(
            "10000".parse::<TimePeriod>(),
            Err(RegistryError::InvalidTimePeriod("10000".to_string()))
        );
        assert_eq!(
            TimePeriod::month(0, 1),
            Err(RegistryError::YearOutOfRange {
                year: 0,
                min: 1,
                max: 9999
            })
        );
    }

    #[test]
    fn test_zero_sub_periods_never_construct() {
        for result in [
            TimePeriod::semester(2020, 0),
            TimePeriod::quarter(2020, 0),
            TimePeriod::month(2020, 0),
            TimePeriod::month(2020, 13),
            TimePeriod::week(2020, 0),
        ] {
            assert!(matches!(result, Err(RegistryError::InvalidTimePeriod(_))));
        }
    }

    #[test]
    fn test_first_sub_periods_sort_by_start() {
        let mut periods: Vec<TimePeriod> = ["2020-Q1", "2020-S1", "2020-M01", "2020", "2020-01-01"]
            .iter()
            .map(|p| p.parse().unwrap())
            .collect();
        periods.sort();

        let kinds: Vec<PeriodKind> = periods.iter().map(|p| p.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                PeriodKind::Year,
                PeriodKind::Semester,
                PeriodKind::Quarter,
                PeriodKind::Month,
                PeriodKind::Day
            ]
        );
        assert!(periods.iter().all(|p| p.start_date() == periods[0].start_date()));
    }
}
