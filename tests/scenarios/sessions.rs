//! Scenario: Sessions And Preferences
//!
//! Journey: A developer works on two drafts side by side, tunes a preference
//! and starts over.
//!
//! Steps:
//! 1. Values set in one session are invisible to another
//! 2. `reset` drops a session record
//! 3. `preference --save` persists a preference for later runs
//!
//! Success Criteria:
//! - Session records are keyed by session id
//! - Unknown preferences fail with a clear message

use crate::common::*;

/// SCENARIO: Two sessions keep separate drafts
#[test]
fn scenario_sessions_are_isolated() {
    let env = TestEnv::with_files(EXAMPLE_PACKAGE);

    let result = env.run(&["-s", "draft", "add-maintainer", "lead", "jdoe", "J Doe", "j@example.com"]);
    assert!(result.success, "add-maintainer failed: {}", result.stderr);
    assert!(env.session_dir().is_dir(), "session record written");

    let draft = env.run(&["-s", "draft", "maintainers"]);
    assert!(draft.stdout.contains("jdoe"), "{}", draft.stdout);

    let other = env.run(&["-s", "other", "maintainers"]);
    assert!(other.success);
    assert!(other.stdout.contains("No maintainers."), "{}", other.stdout);
}

/// SCENARIO: Reset drops the session record
#[test]
fn scenario_reset_starts_over() {
    let env = TestEnv::with_files(EXAMPLE_PACKAGE);
    let result = env.run(&["add-maintainer", "lead", "jdoe", "J Doe", "j@example.com"]);
    assert!(result.success, "add-maintainer failed: {}", result.stderr);

    let listed = env.run(&["maintainers"]);
    assert!(listed.stdout.contains("jdoe"));

    let reset = env.run(&["reset"]);
    assert!(reset.success, "reset failed: {}", reset.stderr);
    assert!(reset.stdout.contains("Session default reset"));

    let listed = env.run(&["maintainers"]);
    assert!(listed.success);
    assert!(listed.stdout.contains("No maintainers."), "{}", listed.stdout);
}

/// SCENARIO: A saved preference applies to later runs
#[test]
fn scenario_saved_preference_applies() {
    let env = TestEnv::with_files(EXAMPLE_PACKAGE);

    let result = env.run(&["preference", "baseinstalldir", "Foo", "--save"]);
    assert!(result.success, "preference failed: {}", result.stderr);
    assert!(env.preferences_path().is_file());

    let result = env.run(&["preference", "baseinstalldir"]);
    assert!(result.success);
    assert!(result.stdout.contains("baseinstalldir = \"Foo\""), "{}", result.stdout);
}

/// SCENARIO: Preference environment overrides win over the document
#[test]
fn scenario_env_override_applies() {
    let env = TestEnv::with_files(EXAMPLE_PACKAGE);

    let result = env.run_with_env(
        &["--json", "preference", "simpleoutput"],
        &[("PKGFILE_SIMPLE_OUTPUT", "yes")],
    );

    assert!(result.success, "preference failed: {}", result.stderr);
    assert_eq!(result.completion().unwrap()["value"], true);
}

/// SCENARIO: Unknown preference names are rejected
#[test]
fn scenario_unknown_preference() {
    let env = TestEnv::with_files(EXAMPLE_PACKAGE);

    let result = env.run(&["preference", "colour"]);

    assert!(!result.success);
    assert!(result.stderr.contains("unknown option \"colour\""), "{}", result.stderr);
}
