//! Scenario: First Manifest For A Package
//!
//! Journey: A developer has a package tree without a manifest and builds one.
//!
//! Steps:
//! 1. `info` reports a new package with the proposed defaults
//! 2. Required fields are submitted page by page with `set`
//! 3. A lead maintainer is added
//! 4. `build --preview` renders the manifest without touching disk
//! 5. `build` writes package.json
//!
//! Success Criteria:
//! - Nothing is written before the final build
//! - The written manifest carries the submitted identity and release

use serde_json::Value;

use crate::common::*;

/// SCENARIO: A new package shows the proposed defaults
#[test]
fn scenario_new_package_info() {
    let env = TestEnv::with_files(PLATFORM_PACKAGE);

    let result = env.run(&["info"]);

    assert!(result.success, "info failed: {}", result.stderr);
    assert!(result.stdout.contains("New package"), "{}", result.stdout);
    assert!(result.stdout.contains("pear.php.net"), "{}", result.stdout);
    assert!(!env.package_path("package.json").exists());
}

/// SCENARIO: Preview renders the manifest, build writes it
#[test]
fn scenario_preview_then_build() {
    let env = TestEnv::with_files(PLATFORM_PACKAGE);
    env.fill_required();

    let preview = env.run(&["build", "--preview"]);
    assert!(
        preview.success,
        "preview failed:\n{}",
        preview.combined_output()
    );
    let rendered: Value = serde_json::from_str(&preview.stdout).expect("preview is JSON");
    assert_eq!(rendered["name"], "Foo_Bar");
    assert!(
        !env.package_path("package.json").exists(),
        "preview must not write"
    );

    let build = env.run(&["build"]);
    assert!(build.success, "build failed:\n{}", build.combined_output());
    assert!(build.stdout.contains("Package file written to"));

    let manifest: Value = serde_json::from_str(&env.read_package_file("package.json")).unwrap();
    assert_eq!(manifest["channel"], "pear.php.net");
    assert_eq!(manifest["version"]["release"], "1.0.0");
    assert_eq!(manifest["maintainers"][0]["handle"], "jdoe");

    let names: Vec<&str> = manifest["contents"]["files"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["name"].as_str())
        .collect();
    assert!(names.contains(&"Foo/Bar.php"));
    assert!(names.contains(&"tests/BarTest.php"));
    assert!(!names.contains(&"package.json"));
}

/// SCENARIO: A build missing required fields fails with a diagnostic
#[test]
fn scenario_incomplete_build_fails() {
    let env = TestEnv::with_files(PLATFORM_PACKAGE);
    let result = env.run(&["set", "package", "packageName", "Foo_Bar"]);
    assert!(result.success, "set failed: {}", result.stderr);

    let result = env.run(&["build"]);

    assert!(!result.success, "build should fail");
    assert_eq!(result.exit_code, 1);
    assert!(
        result.stderr.contains("missing required fields"),
        "stderr: {}",
        result.stderr
    );
    assert!(!env.package_path("package.json").exists());
}

/// SCENARIO: The legacy export is written next to the manifest
#[test]
fn scenario_build_exports_legacy_manifest() {
    let env = TestEnv::with_files(PLATFORM_PACKAGE);
    env.fill_required();

    let result = env.run(&["build", "--export-v1"]);

    assert!(result.success, "build failed:\n{}", result.combined_output());
    let legacy: Value = serde_json::from_str(&env.read_package_file("package-v1.json")).unwrap();
    assert_eq!(legacy["manifestVersion"], "1.0");
    assert_eq!(legacy["name"], "Foo_Bar");
}

/// SCENARIO: JSON mode emits one completion event per command
#[test]
fn scenario_json_build_events() {
    let env = TestEnv::with_files(PLATFORM_PACKAGE);
    env.fill_required();

    let result = env.run(&["--json", "build", "--preview"]);

    assert!(result.success, "build failed:\n{}", result.combined_output());
    let complete = result.completion().expect("complete event");
    assert_eq!(complete["command"], "build");
    assert_eq!(complete["preview"], true);
    assert!(complete["document"].as_str().unwrap().contains("Foo_Bar"));
}
