//! Property tests for dependency flattening and replay.

use proptest::prelude::*;

use pkgfile_frontend::domain::entities::{
    DependencyGroup, DependencyKind, DependencyRecord, DependencyTarget, NestedDependencies,
    NestedDependency, Placement, Requirement,
};
use pkgfile_frontend::domain::ports::{BuilderOptions, DescriptorBuilder};
use pkgfile_frontend::domain::services::{flatten, unflatten};
use pkgfile_frontend::domain::value_objects::VersionConstraint;
use pkgfile_frontend::infrastructure::JsonDescriptorBuilder;

use crate::common::RecordingBuilder;

fn version() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(proptest::string::string_regex("[0-9]\\.[0-9]{1,2}\\.[0-9]").unwrap())
}

fn constraint() -> impl Strategy<Value = VersionConstraint> {
    (version(), version(), version(), version()).prop_map(|(min, max, recommended, exclude)| {
        VersionConstraint {
            min,
            max,
            recommended,
            exclude,
        }
    })
}

fn name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Z][a-z]{1,8}(_[A-Z][a-z]{1,8})?").unwrap()
}

fn kind() -> impl Strategy<Value = DependencyKind> {
    prop_oneof![
        Just(DependencyKind::Package),
        Just(DependencyKind::Subpackage),
        Just(DependencyKind::Extension),
    ]
}

fn entry(kind: DependencyKind) -> impl Strategy<Value = NestedDependency> {
    (name(), constraint()).prop_map(move |(name, constraint)| {
        let dep = NestedDependency::new(name).with_constraint(&constraint);
        match kind {
            DependencyKind::Extension => dep,
            _ => dep.with_channel("pear.php.net"),
        }
    })
}

fn entries() -> impl Strategy<Value = Vec<(DependencyKind, NestedDependency)>> {
    proptest::collection::vec(kind().prop_flat_map(|k| entry(k).prop_map(move |e| (k, e))), 0..5)
}

/// Nested trees with up to three uniquely named groups.
fn tree() -> impl Strategy<Value = NestedDependencies> {
    (
        entries(),
        entries(),
        proptest::collection::vec(entries(), 0..=3),
    )
        .prop_map(|(required, optional, groups)| {
            let mut deps = NestedDependencies::default();
            for (kind, dep) in required {
                deps.set_mut(Requirement::Required).push(kind, dep);
            }
            for (kind, dep) in optional {
                deps.set_mut(Requirement::Optional).push(kind, dep);
            }
            for (idx, members) in groups.into_iter().enumerate() {
                let name = format!("group{}", idx);
                let group = deps.group_mut(&name, "optional features");
                for (kind, dep) in members {
                    group.members.push(kind, dep);
                }
            }
            deps
        })
}

fn record() -> impl Strategy<Value = DependencyRecord> {
    let placement = prop_oneof![
        Just(Placement::Required),
        Just(Placement::Optional),
        Just(Placement::Group(DependencyGroup::new("remote", "remote install"))),
        Just(Placement::Group(DependencyGroup::new("db", "databases"))),
    ];
    (placement, name()).prop_map(|(placement, name)| {
        DependencyRecord::new(
            DependencyTarget::Package {
                name,
                channel: "pear.php.net".to_string(),
            },
            placement,
            VersionConstraint::default(),
        )
    })
}

/// Number of maximal runs of consecutive records sharing a group.
fn group_runs(records: &[DependencyRecord]) -> usize {
    let mut runs = 0;
    let mut current: Option<&str> = None;
    for record in records {
        match record.group() {
            Some(group) if current != Some(group.name.as_str()) => {
                runs += 1;
                current = Some(group.name.as_str());
            }
            Some(_) => {}
            None => {}
        }
    }
    runs
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Replaying a flattened tree into a builder and flattening the
    /// builder's tree again yields the same rows.
    #[test]
    fn property_flatten_replay_is_stable(deps in tree()) {
        let records = flatten(&deps);
        let mut builder = JsonDescriptorBuilder::new(BuilderOptions::default());

        let warnings = unflatten(&records, &mut builder);

        prop_assert!(warnings.is_empty(), "warnings: {:?}", warnings);
        prop_assert_eq!(flatten(&builder.deps()), records);
    }

    /// PROPERTY: Flattening emits required rows, then optional rows, then
    /// group rows, with group rows contiguous per group.
    #[test]
    fn property_flatten_orders_placements(deps in tree()) {
        let rank = |record: &DependencyRecord| match &record.placement {
            Placement::Required => 0,
            Placement::Optional => 1,
            Placement::Group(_) => 2,
        };
        let records = flatten(&deps);
        prop_assert!(records.windows(2).all(|pair| rank(&pair[0]) <= rank(&pair[1])));

        let distinct_groups = deps
            .groups()
            .iter()
            .filter(|g| !g.members.is_empty())
            .count();
        prop_assert_eq!(group_runs(&records), distinct_groups);
    }

    /// PROPERTY: A group is declared once per run of consecutive members,
    /// never once per member.
    #[test]
    fn property_one_group_call_per_run(records in proptest::collection::vec(record(), 0..16)) {
        let mut builder = RecordingBuilder::new();
        unflatten(&records, &mut builder);

        prop_assert_eq!(builder.calls_to("group").len(), group_runs(&records));
        let members = records.iter().filter(|r| r.group().is_some()).count();
        prop_assert_eq!(builder.calls_to("group-dep").len(), members);
    }
}
