//! Property tests for the Grouping Engine

use modgen::gen::{ApiResource, Grouper, KindGrouper};
use proptest::prelude::*;
use std::collections::HashSet;

fn arb_records() -> impl Strategy<Value = Vec<ApiResource>> {
    let triple = (
        prop::sample::select(vec!["", "apps", "batch", "rbac", "nets"]),
        prop::sample::select(vec!["v1", "v1beta1", "v2"]),
        prop::sample::select(vec!["Alpha", "Beta", "Gamma", "Delta"]),
    );

    prop::collection::vec(triple, 0..40).prop_map(|triples| {
        // Keep one record per (group, version, kind); duplicates are a
        // rejected input, covered by their own test.
        let mut seen = HashSet::new();
        triples
            .into_iter()
            .filter(|t| seen.insert((t.0, t.1, t.2)))
            .map(|(group, version, kind)| ApiResource {
                kind: kind.to_string(),
                group: group.to_string(),
                version: version.to_string(),
                description: String::new(),
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn test_grouping_partitions_every_record_exactly_once(records in arb_records()) {
        let input: HashSet<ApiResource> = records.iter().cloned().collect();
        let groups = KindGrouper.group(records).expect("deduped input groups cleanly");

        let mut output = HashSet::new();
        for group in &groups {
            for version in group.versions() {
                for record in version.records() {
                    prop_assert_eq!(record.group.as_str(), group.name());
                    prop_assert_eq!(record.version.as_str(), version.name());
                    prop_assert!(output.insert(record.clone()), "record rendered twice");
                }
            }
        }

        prop_assert_eq!(output, input);
    }

    #[test]
    fn test_group_and_version_order_is_sorted(records in arb_records()) {
        let groups = KindGrouper.group(records).expect("deduped input groups cleanly");

        let names: Vec<&str> = groups.iter().map(|g| g.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        prop_assert_eq!(&names, &sorted);

        for group in &groups {
            let versions: Vec<&str> = group.versions().iter().map(|v| v.name()).collect();
            let mut sorted = versions.clone();
            sorted.sort();
            prop_assert_eq!(&versions, &sorted);
        }
    }

    #[test]
    fn test_grouping_is_insensitive_to_input_order(records in arb_records()) {
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = KindGrouper.group(records).expect("groups cleanly");
        let backward = KindGrouper.group(reversed).expect("groups cleanly");

        // Same partition, whatever the arrival order.
        let forward_names: Vec<&str> = forward.iter().map(|g| g.name()).collect();
        let backward_names: Vec<&str> = backward.iter().map(|g| g.name()).collect();
        prop_assert_eq!(forward_names, backward_names);
    }
}
