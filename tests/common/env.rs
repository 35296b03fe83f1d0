//! Isolated environment for running the `pkgfile` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

/// Result of one CLI invocation.
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as one JSON event per line.
    pub fn events(&self) -> Vec<Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("not a JSON event ({}): {}", e, line))
            })
            .collect()
    }

    /// The `complete` event, if the command emitted one.
    pub fn completion(&self) -> Option<Value> {
        self.events()
            .into_iter()
            .find(|event| event["event"] == "complete")
    }
}

/// Package tree plus a separate state directory for sessions and
/// preferences, so nothing leaks into the user's real config.
pub struct TestEnv {
    pub package_root: TempDir,
    pub state_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            package_root: TempDir::new().expect("Failed to create package temp dir"),
            state_dir: TempDir::new().expect("Failed to create state temp dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_pkgfile")),
        }
    }

    /// Environment with `files` written into the package root.
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let env = Self::new();
        for (path, content) in files {
            env.write_package_file(path, content);
        }
        env
    }

    pub fn package_path(&self, relative: &str) -> PathBuf {
        self.package_root.path().join(relative)
    }

    pub fn session_dir(&self) -> PathBuf {
        self.state_dir.path().join("sessions")
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.state_dir.path().join("preferences.toml")
    }

    pub fn write_package_file(&self, relative: &str, content: &str) {
        write_file(&self.package_path(relative), content);
    }

    pub fn read_package_file(&self, relative: &str) -> String {
        std::fs::read_to_string(self.package_path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Run `pkgfile` against the package root with the isolated state.
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.package_root.path())
            .arg("--package-dir")
            .arg(self.package_root.path())
            .arg("--session-dir")
            .arg(self.session_dir())
            .args(args)
            .env("PKGFILE_PREFERENCES_PATH", self.preferences_path())
            .env_remove("RUST_LOG");
        for name in [
            "PKGFILE_FILELIST_GENERATOR",
            "PKGFILE_OUTPUT_DIRECTORY",
            "PKGFILE_BASE_INSTALL_DIR",
            "PKGFILE_CHANGELOG_OLD_TO_NEW",
            "PKGFILE_SIMPLE_OUTPUT",
            "PKGFILE_EXPORT_COMPATIBLE_V1",
            "PKGFILE_SESSION_DIR",
        ] {
            cmd.env_remove(name);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute pkgfile");
        to_result(output)
    }

    /// Fill every required field of a new package through the CLI.
    pub fn fill_required(&self) {
        for args in REQUIRED_FIELDS {
            let result = self.run(args);
            assert!(result.success, "{:?} failed: {}", args, result.stderr);
        }
        let result = self.run(&["add-maintainer", "lead", "jdoe", "J Doe", "j@example.com"]);
        assert!(result.success, "add-maintainer failed: {}", result.stderr);
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// `set` invocations covering the required manifest fields.
pub const REQUIRED_FIELDS: [&[&str]; 7] = [
    &["set", "package", "packageName", "Foo_Bar"],
    &["set", "package", "packageSummary", "Foo bar tools"],
    &["set", "package", "packageDescription", "Tools for foo and bar"],
    &["set", "release", "releaseLicense", r#"{"content": "MIT"}"#],
    &["set", "release", "releaseVersion", "1.0.0"],
    &["set", "release", "APIVersion", "1.0.0"],
    &["set", "release", "releaseState", "stable"],
];

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
