//! Property tests for role table resolution.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use pkgfile_frontend::domain::entities::RoleRule;
use pkgfile_frontend::domain::services::{path_parts, RoleResolver, ROOT_DIR};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{1,6}").unwrap()
}

fn extension() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("php".to_string())),
        Just(Some("txt".to_string())),
        Just(Some("html".to_string())),
        Just(Some("xyz".to_string())),
    ]
}

/// Package-relative file paths up to three directories deep.
fn package_path() -> impl Strategy<Value = String> {
    (proptest::collection::vec(segment(), 0..=3), segment(), extension()).prop_map(
        |(dirs, stem, ext)| {
            let name = match ext {
                Some(ext) => format!("{}.{}", stem, ext),
                None => stem,
            };
            dirs.into_iter()
                .chain(std::iter::once(name))
                .collect::<Vec<_>>()
                .join("/")
        },
    )
}

fn ext_roles() -> BTreeMap<String, String> {
    [("php", "php"), ("txt", "doc"), ("html", "doc"), ("*", "data")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn dir_roles() -> BTreeMap<String, String> {
    [("docs", "doc"), ("tests", "test")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Directory rows come first, then extension rows, each block
    /// sorted and free of duplicates; the wildcard never gets a row.
    #[test]
    fn property_role_table_is_ordered(paths in proptest::collection::vec(package_path(), 0..24)) {
        let exts = ext_roles();
        let dirs = dir_roles();
        let rules = RoleResolver::new(&dirs, &exts).resolve(paths.iter().map(String::as_str));

        let split = rules.iter().position(|r| !r.is_directory_rule()).unwrap_or(rules.len());
        prop_assert!(rules[split..].iter().all(|r| !r.is_directory_rule()));

        let dir_keys: Vec<&str> = rules[..split].iter().map(|r| r.directory.as_str()).collect();
        let ext_keys: Vec<&str> = rules[split..].iter().map(|r| r.extension.as_str()).collect();
        let mut sorted_dirs = dir_keys.clone();
        sorted_dirs.sort_unstable();
        sorted_dirs.dedup();
        let mut sorted_exts = ext_keys.clone();
        sorted_exts.sort_unstable();
        sorted_exts.dedup();

        prop_assert_eq!(dir_keys, sorted_dirs);
        prop_assert_eq!(&ext_keys, &sorted_exts);
        prop_assert!(!ext_keys.contains(&"*"));
        prop_assert!(!ext_keys.contains(&"xyz"));
    }

    /// PROPERTY: Every directory holding a file has exactly one row; the
    /// package root has none.
    #[test]
    fn property_every_directory_has_a_row(paths in proptest::collection::vec(package_path(), 0..24)) {
        let exts = ext_roles();
        let dirs = dir_roles();
        let rules = RoleResolver::new(&dirs, &exts).resolve(paths.iter().map(String::as_str));

        let expected: BTreeSet<&str> = paths
            .iter()
            .map(|p| path_parts(p).dirname)
            .filter(|d| *d != ROOT_DIR)
            .collect();
        let actual: BTreeSet<&str> = rules
            .iter()
            .filter(|r| r.is_directory_rule())
            .map(|r| r.directory.as_str())
            .collect();
        prop_assert_eq!(actual, expected);
    }

    /// PROPERTY: The table depends on the set of paths, not their order.
    #[test]
    fn property_role_table_ignores_input_order(paths in proptest::collection::vec(package_path(), 0..24)) {
        let exts = ext_roles();
        let dirs = dir_roles();
        let resolver = RoleResolver::new(&dirs, &exts);

        let forward: Vec<RoleRule> = resolver.resolve(paths.iter().map(String::as_str));
        let backward: Vec<RoleRule> = resolver.resolve(paths.iter().rev().map(String::as_str));
        prop_assert_eq!(forward, backward);
    }
}
