//! Scenario: Reviewing Files And Roles
//!
//! Journey: Before building, a developer checks which files will be packaged
//! and which roles they get.
//!
//! Steps:
//! 1. `files` enumerates the package tree with the preferred generator
//! 2. `files --generator Git` re-enumerates honouring .gitignore
//! 3. `roles` shows the directory and extension table
//!
//! Success Criteria:
//! - Listings use package-relative paths in a stable order
//! - The Git generator leaves ignored files out

use crate::common::*;

fn listed_paths(result: &TestResult) -> Vec<String> {
    let complete = result.completion().expect("complete event");
    complete["files"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["path"].as_str().map(str::to_string))
        .collect()
}

/// SCENARIO: The File generator lists every regular file
#[test]
fn scenario_files_lists_package_tree() {
    let env = TestEnv::with_files(EXAMPLE_PACKAGE);

    let result = env.run(&["--json", "files"]);

    assert!(result.success, "files failed: {}", result.stderr);
    assert_eq!(listed_paths(&result), vec!["README", "src/a.php", "src/b.txt"]);
    assert_eq!(result.completion().unwrap()["total"], 3);
}

/// SCENARIO: Switching to the Git generator drops ignored files
#[test]
fn scenario_git_generator_honours_gitignore() {
    let env = TestEnv::with_files(EXAMPLE_PACKAGE);
    env.write_package_file(".gitignore", "*.log\n");
    env.write_package_file("debug.log", "noise\n");

    let file = env.run(&["--json", "files"]);
    assert!(file.success, "files failed: {}", file.stderr);
    assert!(listed_paths(&file).contains(&"debug.log".to_string()));

    let git = env.run(&["--json", "files", "--generator", "Git"]);
    assert!(git.success, "files failed: {}", git.stderr);
    let paths = listed_paths(&git);
    assert!(!paths.contains(&"debug.log".to_string()), "{:?}", paths);
    assert!(paths.contains(&"src/a.php".to_string()));
}

/// SCENARIO: An unknown generator is reported, the listing is kept
#[test]
fn scenario_unknown_generator_fails() {
    let env = TestEnv::with_files(EXAMPLE_PACKAGE);

    let result = env.run(&["files", "--generator", "Cvs"]);

    assert!(!result.success);
    assert!(
        result.stderr.contains("no such file list generator"),
        "stderr: {}",
        result.stderr
    );
}

/// SCENARIO: The role table lists directories, then configured extensions
#[test]
fn scenario_roles_table() {
    let env = TestEnv::with_files(EXAMPLE_PACKAGE);
    env.write_package_file("docs/guide.html", "<html></html>\n");

    let result = env.run(&["--json", "roles"]);

    assert!(result.success, "roles failed: {}", result.stderr);
    let complete = result.completion().expect("complete event");
    let rows: Vec<(String, String, String)> = complete["roles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| {
            (
                r["directory"].as_str().unwrap_or_default().to_string(),
                r["extension"].as_str().unwrap_or_default().to_string(),
                r["role"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect();

    let expected: Vec<(String, String, String)> = [
        ("docs", "", "doc"),
        ("src", "", "source"),
        ("", "html", "doc"),
        ("", "php", "php"),
    ]
    .iter()
    .map(|(d, e, r)| (d.to_string(), e.to_string(), r.to_string()))
    .collect();
    assert_eq!(rows, expected);
}
