//! Registry lookup tests

use sdmx_registry::models::{Code, Concept, Representation};
use sdmx_registry::{
    CodeLists, Codelist, Component, ConceptScheme, DataStructureBuilder, Dataflow, Dimension, Identifiable,
    Maintainable, MaintainableArtefact, Reference, SharedStructures, StructureClass, Structures,
    Versionable,
};
use std::sync::Arc;

fn codelist(agency: &str, id: &str, version: Option<&str>) -> Codelist {
    Codelist::new(MaintainableArtefact::new(agency, id, version))
}

fn exchange_rates() -> Structures {
    let freq = Codelist::with_items(
        MaintainableArtefact::new("ECB", "CL_FREQ", Some("1.0")),
        vec![Code::new("A"), Code::new("Q"), Code::new("M")],
    );
    let currency = Codelist::with_items(
        MaintainableArtefact::new("ECB", "CL_CURRENCY", Some("1.0")),
        vec![Code::new("EUR"), Code::new("USD")],
    );
    let concepts = ConceptScheme::with_items(
        MaintainableArtefact::new("ECB", "ECB_CONCEPTS", Some("1.0")),
        vec![
            Concept::new("FREQ").with_representation(Representation::enumerated(Reference::new(
                "ECB",
                "CL_FREQ",
                Some("1.0"),
            ))),
            Concept::new("CURRENCY"),
        ],
    );
    let dsd = DataStructureBuilder::new("ECB", "ECB_EXR1", Some("1.0"))
        .dimension(Dimension::from_component(Component::new("FREQ").with_concept(
            Reference::item("ECB", "ECB_CONCEPTS", Some("1.0"), "FREQ"),
        )))
        .dimension(Dimension::from_component(
            Component::new("CURRENCY").with_representation(
                Representation::enumerated(Reference::new("ECB", "CL_CURRENCY", Some("1.0"))),
            ),
        ))
        .build();
    let flow = Dataflow::new(
        MaintainableArtefact::new("ECB", "EXR", Some("1.0")),
        Some(Reference::new("ECB", "ECB_EXR1", None)),
    );

    Structures::new()
        .with_codelists(vec![freq, currency].into())
        .with_concepts(vec![concepts].into())
        .with_data_structures(vec![dsd].into())
        .with_dataflows(vec![flow].into())
}

mod collection_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identity_is_reflexive() {
        let lists: CodeLists = vec![codelist("ABC", "CL_A", Some("1.0"))].into();
        let own = lists.get(0).unwrap();
        let found = lists
            .find_by_key(own.agency_id().unwrap(), own.id().unwrap(), own.version())
            .unwrap();
        assert_eq!(found, own);
    }

    #[test]
    fn test_version_wildcard_both_ways() {
        let unversioned: CodeLists = vec![codelist("ABC", "CL_A", None)].into();
        assert!(unversioned.find_by_key("ABC", "CL_A", Some("7.0")).is_some());

        let versioned: CodeLists = vec![codelist("ABC", "CL_A", Some("7.0"))].into();
        assert!(versioned.find_by_key("ABC", "CL_A", None).is_some());
        assert!(versioned.find_by_key("ABC", "CL_A", Some("7.1")).is_none());
    }

    #[test]
    fn test_best_version_tie_break() {
        let lists: CodeLists = vec![
            codelist("ABC", "CL_A", Some("1.0")),
            codelist("ABC", "CL_A", Some("2.0")),
        ]
        .into();
        assert_eq!(lists.find_by_id("CL_A").unwrap().version(), Some("2.0"));

        let reversed: CodeLists = vec![
            codelist("ABC", "CL_A", Some("2.0")),
            codelist("ABC", "CL_A", Some("1.0")),
        ]
        .into();
        assert_eq!(reversed.find_by_id("CL_A").unwrap().version(), Some("2.0"));
    }

    #[test]
    fn test_numeric_version_ordering() {
        let lists: CodeLists = vec![
            codelist("ABC", "CL_A", Some("1.9")),
            codelist("ABC", "CL_A", Some("1.10")),
            codelist("ABC", "CL_A", None),
        ]
        .into();
        assert_eq!(lists.find_by_id("CL_A").unwrap().version(), Some("1.10"));
    }

    #[test]
    fn test_merge_without_dedup() {
        let mut y: CodeLists = vec![
            codelist("ABC", "CL_A", Some("1.0")),
            codelist("ABC", "CL_B", Some("1.0")),
            codelist("ABC", "CL_C", Some("1.0")),
        ]
        .into();
        let x: CodeLists = vec![
            codelist("ABC", "CL_A", Some("1.0")),
            codelist("ABC", "CL_D", Some("1.0")),
        ]
        .into();

        y.merge(x);
        assert_eq!(y.size(), 5);
        assert!(!y.is_empty());
    }

    #[test]
    fn test_wildcard_urn_finds_any_version() {
        let lists: CodeLists = vec![codelist("ECB", "CL_FREQ", Some("2.0"))].into();
        let wildcard = Reference::new("ECB", "CL_FREQ", None);
        assert!(lists.find_by_reference(&wildcard).is_some());

        let urn = wildcard.to_urn(StructureClass::Codelist).unwrap();
        assert_eq!(lists.find_by_uri(&urn).unwrap().version(), Some("2.0"));
    }

    #[test]
    fn test_undecodable_uri_is_a_miss() {
        let lists: CodeLists = vec![codelist("ABC", "CL_A", Some("1.0"))].into();
        assert!(lists.find_by_uri("not a urn at all").is_none());
    }
}

mod structures_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dataflow_to_structure_to_codelist() {
        let structures = exchange_rates();
        let flow = structures
            .find_dataflow_by_uri("urn:sdmx:org.sdmx.infomodel.datastructure.Dataflow=ECB:EXR(1.0)")
            .unwrap();
        let dsd = structures.structure_of(flow).unwrap();
        assert_eq!(dsd.id(), Some("ECB_EXR1"));

        let via_concept = structures.codelist_for_component(dsd, "FREQ").unwrap();
        assert_eq!(via_concept.id(), Some("CL_FREQ"));
        assert_eq!(via_concept.len(), 3);

        let local = structures.codelist_for_component(dsd, "CURRENCY").unwrap();
        assert_eq!(local.id(), Some("CL_CURRENCY"));
    }

    #[test]
    fn test_find_code_by_urn() {
        let structures = exchange_rates();
        let code = structures
            .find_code(&Reference::from_urn_string(
                "urn:sdmx:org.sdmx.infomodel.codelist.Code=ECB:CL_CURRENCY(1.0).USD",
            ))
            .unwrap();
        assert_eq!(code.id(), Some("USD"));
    }

    #[test]
    fn test_find_by_rest_url() {
        let structures = exchange_rates();
        let codelist = structures
            .find_codelist_by_uri("https://sdw-wsrest.ecb.europa.eu/service/codelist/ECB/CL_FREQ/latest")
            .unwrap();
        assert_eq!(codelist.version(), Some("1.0"));
    }

    #[test]
    fn test_merge_structures() {
        let mut structures = exchange_rates();
        let extra = Structures::new().with_codelists(vec![codelist("ECB", "CL_FREQ", Some("2.0"))].into());
        structures.merge(extra);

        assert_eq!(structures.codelists().map(|c| c.len()), Some(3));
        let latest = structures.find_codelist(&Reference::bare("CL_FREQ")).unwrap();
        assert_eq!(latest.version(), Some("2.0"));
    }
}

mod shared_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::thread;

    #[test]
    fn test_readers_keep_their_snapshot() {
        let shared = Arc::new(SharedStructures::new(exchange_rates()));
        let reader = shared.snapshot();

        shared.merge(Structures::new().with_codelists(vec![codelist("ECB", "CL_NEW", None)].into()));

        assert_eq!(reader.codelists().map(|c| c.len()), Some(2));
        assert_eq!(shared.snapshot().codelists().map(|c| c.len()), Some(3));
    }

    #[test]
    fn test_reads_during_writes_see_whole_snapshots() {
        let shared = Arc::new(SharedStructures::new(exchange_rates()));

        let writer = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..20 {
                    let mut addition = Structures::new();
                    addition.set_codelists(vec![codelist("ECB", &format!("CL_{}", i), None)].into());
                    addition.set_concepts(
                        vec![ConceptScheme::new(MaintainableArtefact::new("ECB", &format!("CS_{}", i), None))]
                            .into(),
                    );
                    shared.merge(addition);
                }
            })
        };

        for _ in 0..20 {
            let snapshot = shared.snapshot();
            let codelists = snapshot.codelists().map_or(0, |c| c.len());
            let concepts = snapshot.concepts().map_or(0, |c| c.len());
            assert_eq!(codelists, concepts + 1);
        }
        writer.join().unwrap();
    }
}
