use std::collections::BTreeSet;

use portfolio_pilot::model::{Category, Project, ProjectStatus, Scores};
use portfolio_pilot::scoring::compute_score;
use portfolio_pilot::store::new_project;
use portfolio_pilot::view::{filter_records, sort_records, FilterCriteria, SortDirection, SortKey};
use proptest::prelude::*;

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn status() -> impl Strategy<Value = ProjectStatus> {
    prop::sample::select(ProjectStatus::ALL.to_vec())
}

prop_compose! {
    fn project_fields()(
        name in "[a-z]{1,8}",
        category in category(),
        status in status(),
        benefit in 0u32..20_000_000,
        progress in 0u8..=100,
        portfolio in prop::option::of(1u64..4),
    ) -> (String, Category, ProjectStatus, u32, u8, Option<u64>) {
        (name, category, status, benefit, progress, portfolio)
    }
}

/// Projects with ids 1..=n in input order, so ids double as stability tags.
fn projects() -> impl Strategy<Value = Vec<Project>> {
    prop::collection::vec(project_fields(), 0..30).prop_map(|fields| {
        fields
            .into_iter()
            .enumerate()
            .map(|(i, (name, category, status, benefit, progress, portfolio))| {
                let mut p = new_project(name, "Amy Liu".to_string(), category, f64::from(benefit));
                p.id = i as u64 + 1;
                p.project_status = status;
                p.progress = progress;
                p.portfolio_id = portfolio;
                p
            })
            .collect()
    })
}

fn criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::option::of(category()),
        prop::option::of(status().prop_map(|s| s.label().to_string())),
        prop::option::of(1u64..4),
        prop::option::of(0u32..20_000_000),
        prop::option::of(0u32..20_000_000),
        prop::option::of("[a-z]"),
    )
        .prop_map(|(category, status, portfolio_id, min, max, search)| FilterCriteria {
            category,
            status,
            portfolio_id,
            min_benefit: min.map(f64::from),
            max_benefit: max.map(f64::from),
            search,
        })
}

fn sort_key() -> impl Strategy<Value = SortKey> {
    prop::sample::select(SortKey::ALL.to_vec())
}

fn direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)]
}

fn ids(records: &[&Project]) -> Vec<u64> {
    records.iter().map(|p| p.id).collect()
}

proptest! {
    #[test]
    fn prop_filter_is_idempotent(records in projects(), criteria in criteria()) {
        let once = filter_records(&records, &criteria);
        let twice = filter_records(once.iter().copied(), &criteria);
        prop_assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn prop_filter_is_conjunction(records in projects(), criteria in criteria()) {
        let category_only = FilterCriteria {
            category: criteria.category,
            ..Default::default()
        };
        let status_only = FilterCriteria {
            status: criteria.status.clone(),
            ..Default::default()
        };
        let rest = FilterCriteria {
            category: None,
            status: None,
            ..criteria.clone()
        };

        let combined = filter_records(&records, &criteria);
        let staged = filter_records(
            filter_records(filter_records(&records, &category_only), &status_only),
            &rest,
        );
        prop_assert_eq!(ids(&combined), ids(&staged));

        if let Some(status) = &criteria.status {
            prop_assert!(combined.iter().all(|p| p.project_status.label() == status.as_str()));
        }

        for p in &combined {
            prop_assert!(criteria.matches(*p));
        }
        let kept: BTreeSet<u64> = combined.iter().map(|p| p.id).collect();
        for p in records.iter().filter(|p| !kept.contains(&p.id)) {
            prop_assert!(!criteria.matches(p));
        }
    }

    #[test]
    fn prop_empty_filter_keeps_everything(records in projects()) {
        let all = filter_records(&records, &FilterCriteria::default());
        prop_assert_eq!(all.len(), records.len());
    }

    #[test]
    fn prop_sort_is_stable_permutation(
        records in projects(),
        key in sort_key(),
        direction in direction(),
    ) {
        let sorted = sort_records(&records, key, direction);
        prop_assert_eq!(sorted.len(), records.len());

        let mut seen: Vec<u64> = ids(&sorted);
        seen.sort_unstable();
        let expected: Vec<u64> = records.iter().map(|p| p.id).collect();
        prop_assert_eq!(seen, expected);

        // Equal keys keep input order, whichever the direction
        for pair in sorted.windows(2) {
            let ordering = portfolio_pilot::view::compare_by_key(pair[0], pair[1], key);
            if ordering == std::cmp::Ordering::Equal {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn prop_descending_is_reversed_ascending_for_distinct_keys(
        benefits in prop::collection::btree_set(0u32..50_000_000, 0..25),
    ) {
        let records: Vec<Project> = benefits
            .into_iter()
            .rev()
            .enumerate()
            .map(|(i, b)| {
                let mut p = new_project(format!("p{}", i), "Amy Liu".to_string(), Category::Production, f64::from(b));
                p.id = i as u64 + 1;
                p
            })
            .collect();

        let mut ascending = ids(&sort_records(&records, SortKey::BenefitProjection, SortDirection::Ascending));
        ascending.reverse();
        let descending = ids(&sort_records(&records, SortKey::BenefitProjection, SortDirection::Descending));
        prop_assert_eq!(ascending, descending);
    }

    #[test]
    fn prop_score_is_bounded(
        a in any::<i32>(),
        b in any::<i32>(),
        c in -5i32..15,
        d in -5i32..15,
        e in prop::option::of(-5i32..15),
    ) {
        let scores = Scores {
            risk_level: e,
            ..Scores::new(a, b, c, d, 0)
        };
        prop_assert!(compute_score(Some(&scores)) <= 100);
    }
}
