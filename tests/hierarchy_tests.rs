//! Item hierarchy tests

use sdmx_registry::models::MAX_HIERARCHY_DEPTH;
use sdmx_registry::{Code, Codelist, Concept, ConceptScheme, Identifiable, MaintainableArtefact};

fn areas() -> Codelist {
    Codelist::with_items(
        MaintainableArtefact::new("ESTAT", "CL_GEO", Some("1.0")),
        vec![
            Code::new("EU27").with_name("en", "European Union"),
            Code::new("EA20").with_name("en", "Euro area"),
            Code::new("DE").with_parent("EU27"),
            Code::new("FR").with_parent("EU27"),
            Code::new("DE1").with_parent("DE"),
            Code::new("DE11").with_parent("DE1"),
        ],
    )
}

fn ids<T: Identifiable>(items: Vec<&T>) -> Vec<&str> {
    items.into_iter().filter_map(|i| i.id()).collect()
}

mod level_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_roots() {
        assert_eq!(ids(areas().sub_items_of(None)), vec!["EU27", "EA20"]);
    }

    #[test]
    fn test_children_in_insertion_order() {
        let cl = areas();
        assert_eq!(ids(cl.sub_items_of(Some("EU27"))), vec!["DE", "FR"]);
        assert!(cl.sub_items_of(Some("FR")).is_empty());
    }

    #[test]
    fn test_levels() {
        let cl = areas();
        assert_eq!(cl.level_of("EU27"), 1);
        assert_eq!(cl.level_of("DE"), 2);
        assert_eq!(cl.level_of("DE11"), 4);
        assert_eq!(cl.max_level(), 4);
        assert_eq!(ids(cl.items_on_level(2)), vec!["DE", "FR"]);
        assert!(cl.items_on_level(5).is_empty());
    }

    #[test]
    fn test_empty_scheme() {
        let cl = Codelist::new(MaintainableArtefact::new("ESTAT", "CL_EMPTY", None));
        assert!(cl.is_empty());
        assert!(cl.is_flat());
        assert_eq!(cl.max_level(), 0);
    }

    #[test]
    fn test_cycle_is_bounded() {
        let cl = Codelist::with_items(
            MaintainableArtefact::new("ESTAT", "CL_LOOP", None),
            vec![
                Code::new("X").with_parent("Y"),
                Code::new("Y").with_parent("Z"),
                Code::new("Z").with_parent("X"),
            ],
        );
        assert_eq!(cl.level_of("X"), MAX_HIERARCHY_DEPTH);
        assert!(cl.sub_items_of(None).is_empty());
    }

    #[test]
    fn test_deep_chain_is_capped() {
        let codes: Vec<Code> = (0..40)
            .map(|i| {
                let code = Code::new(&format!("L{}", i));
                if i == 0 {
                    code
                } else {
                    code.with_parent(&format!("L{}", i - 1))
                }
            })
            .collect();
        let cl = Codelist::with_items(MaintainableArtefact::new("ESTAT", "CL_DEEP", None), codes);

        assert_eq!(cl.level_of("L10"), 11);
        assert_eq!(cl.level_of("L39"), MAX_HIERARCHY_DEPTH);
    }
}

mod mutation_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flatness_follows_mutation() {
        let mut cl = Codelist::with_items(
            MaintainableArtefact::new("ESTAT", "CL_FLAT", None),
            vec![Code::new("A"), Code::new("B")],
        );
        assert!(cl.is_flat());

        cl.replace(1, Code::new("B").with_parent("A"));
        assert!(!cl.is_flat());
        assert_eq!(cl.level_of("B"), 2);

        cl.remove(0);
        assert_eq!(cl.level_of("B"), 1);
    }

    #[test]
    fn test_insert_past_end_appends() {
        let mut cl = areas();
        cl.insert(100, Code::new("XK"));
        assert_eq!(cl.position_of("XK"), Some(cl.len() - 1));
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first() {
        let mut cl = areas();
        cl.push(Code::new("DE").with_name("en", "Second Germany"));
        let index = cl.item_index();
        assert_eq!(index.len(), 6);
        assert_eq!(index["DE"].parent.as_deref(), Some("EU27"));
    }
}

mod concept_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_concept_scheme_hierarchy() {
        let scheme = ConceptScheme::with_items(
            MaintainableArtefact::new("ECB", "ECB_CONCEPTS", Some("1.0")),
            vec![
                Concept::new("CURRENCY"),
                Concept::new("CURRENCY_DENOM").with_parent("CURRENCY"),
            ],
        );
        assert!(!scheme.is_flat());
        assert_eq!(ids(scheme.ancestors_of("CURRENCY_DENOM")), vec!["CURRENCY"]);
    }
}
