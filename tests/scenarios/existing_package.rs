//! Scenario: Cutting A New Release Of An Existing Package
//!
//! Journey: A maintainer opens a package that already has a manifest,
//! reviews what was imported and builds the next release.
//!
//! Steps:
//! 1. `info` shows the imported identity and release
//! 2. `deps` lists the flattened dependency rows, group included
//! 3. The release version is bumped with `set`
//! 4. `build` rewrites the manifest
//!
//! Success Criteria:
//! - Imported dependencies and replace tasks survive the rebuild
//! - The changelog gains an entry for the new release, oldest first

use serde_json::Value;

use crate::common::*;

fn existing_env() -> TestEnv {
    let env = TestEnv::with_files(&[("Foo/Bar.php", "<?php\n"), ("README", "Foo\n")]);
    env.write_package_file("package.json", EXISTING_MANIFEST);
    env
}

/// SCENARIO: The imported manifest seeds the page defaults
#[test]
fn scenario_existing_package_info() {
    let env = existing_env();

    let result = env.run(&["--json", "info"]);

    assert!(result.success, "info failed: {}", result.stderr);
    let complete = result.completion().expect("complete event");
    assert_eq!(complete["new_package"], false);
    assert_eq!(complete["package"]["packageName"], "Foo_Bar");
    assert_eq!(complete["package"]["phpVersion"]["min"], "5.2.0");
    assert_eq!(complete["release"]["releaseVersion"], "1.2.0");
    assert_eq!(complete["release"]["releaseLicense"]["content"], "MIT");
}

/// SCENARIO: Dependencies are listed flat, groups last
#[test]
fn scenario_existing_package_deps() {
    let env = existing_env();

    let result = env.run(&["deps"]);

    assert!(result.success, "deps failed: {}", result.stderr);
    let lines: Vec<&str> = result.stdout.lines().map(str::trim).collect();
    assert_eq!(lines.len(), 3, "{}", result.stdout);
    assert!(lines[0].starts_with("required") && lines[0].contains("Console_Getopt"));
    assert!(lines[0].contains("min=1.2"));
    assert!(lines[1].starts_with("optional") && lines[1].contains("curl"));
    assert!(lines[2].starts_with("group-package") && lines[2].contains("[group remote]"));
}

/// SCENARIO: Maintainers can be filtered by role
#[test]
fn scenario_existing_package_maintainers() {
    let env = existing_env();

    let leads = env.run(&["maintainers", "--role", "lead"]);
    assert!(leads.success, "maintainers failed: {}", leads.stderr);
    assert!(leads.stdout.contains("jdoe"));

    let helpers = env.run(&["maintainers", "--role", "helper"]);
    assert!(helpers.success);
    assert!(helpers.stdout.contains("No maintainers."));

    let unknown = env.run(&["maintainers", "--role", "boss"]);
    assert!(!unknown.success);
    assert!(unknown.stderr.contains("no such list of users"), "{}", unknown.stderr);
}

/// SCENARIO: Bumping the version rebuilds the manifest with history
#[test]
fn scenario_existing_package_new_release() {
    let env = existing_env();

    let result = env.run(&["set", "release", "releaseVersion", "1.3.0"]);
    assert!(result.success, "set failed: {}", result.stderr);
    let result = env.run(&["build"]);
    assert!(result.success, "build failed:\n{}", result.combined_output());

    let manifest: Value = serde_json::from_str(&env.read_package_file("package.json")).unwrap();
    assert_eq!(manifest["version"]["release"], "1.3.0");
    assert_eq!(manifest["dependencies"]["runtime"]["min"], "5.2.0");
    assert_eq!(
        manifest["dependencies"]["required"]["package"]["name"],
        "Console_Getopt"
    );
    assert_eq!(
        manifest["dependencies"]["group"][0]["attribs"]["name"],
        "remote"
    );

    let changelog: Vec<&str> = manifest["changelog"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|entry| entry["version"]["release"].as_str())
        .collect();
    assert_eq!(changelog, vec!["1.2.0", "1.3.0"]);

    let bar = manifest["contents"]["files"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["name"] == "Foo/Bar.php")
        .expect("Foo/Bar.php listed");
    assert_eq!(bar["replacements"][0]["from"], "@package_version@");
}
