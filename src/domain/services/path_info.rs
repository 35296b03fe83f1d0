//! Path decomposition for package-relative paths
//!
//! Directory and extension are derived the way manifest tooling expects:
//! a file at the package root lives in directory `.`, the extension is the
//! text after the last dot of the file name (dotfiles included) and an empty
//! extension counts as none.

/// Directory of the package root.
pub const ROOT_DIR: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts<'a> {
    pub dirname: &'a str,
    pub extension: Option<&'a str>,
}

/// Split a `/`-separated relative path into directory and extension.
pub fn path_parts(path: &str) -> PathParts<'_> {
    let trimmed = path.trim_end_matches('/');
    let (dirname, basename) = match trimmed.rfind('/') {
        Some(0) => ("/", &trimmed[1..]),
        Some(idx) => (&trimmed[..idx], &trimmed[idx + 1..]),
        None => (ROOT_DIR, trimmed),
    };
    let extension = basename
        .rfind('.')
        .map(|idx| &basename[idx + 1..])
        .filter(|ext| !ext.is_empty());
    PathParts { dirname, extension }
}

/// Path of `full` relative to `package_dir`, without a leading `/`.
///
/// Paths outside the package directory are returned unchanged.
pub fn relative_path<'a>(full: &'a str, package_dir: &str) -> &'a str {
    let stripped = if package_dir.is_empty() {
        full
    } else {
        full.strip_prefix(package_dir).unwrap_or(full)
    };
    stripped.strip_prefix('/').unwrap_or(stripped)
}

/// `package_dir` with exactly one trailing `/`.
pub fn with_trailing_slash(dir: &str) -> String {
    let trimmed = dir.trim_end_matches('/');
    format!("{}/", trimmed)
}
