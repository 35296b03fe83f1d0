//! File role resolution
//!
//! Derives the role table shown to the user from the tracked file paths and
//! the configured directory / extension rules:
//! - every directory other than the package root gets a row, using its
//!   configured role or [`DEFAULT_DIRECTORY_ROLE`];
//! - every extension with a configured role gets a row;
//! - extensions without a rule fall under the `*` wildcard, which supplies
//!   the role but never appears as a row itself.
//!
//! Directory rows come first, then extension rows, each block sorted by key.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::entities::RoleRule;

use super::path_info::{path_parts, ROOT_DIR};

/// Role of a directory without an explicit rule.
pub const DEFAULT_DIRECTORY_ROLE: &str = "source";
/// Key of the fallback extension rule.
pub const WILDCARD: &str = "*";
/// Fallback role when the rules do not even carry a wildcard.
pub const DEFAULT_WILDCARD_ROLE: &str = "data";

pub struct RoleResolver<'a> {
    dir_roles: &'a BTreeMap<String, String>,
    ext_roles: &'a BTreeMap<String, String>,
}

impl<'a> RoleResolver<'a> {
    pub fn new(dir_roles: &'a BTreeMap<String, String>, ext_roles: &'a BTreeMap<String, String>) -> Self {
        Self {
            dir_roles,
            ext_roles,
        }
    }

    pub fn wildcard_role(&self) -> &'a str {
        self.ext_roles
            .get(WILDCARD)
            .map(String::as_str)
            .unwrap_or(DEFAULT_WILDCARD_ROLE)
    }

    /// Build the ordered role table for `paths` (package-relative).
    pub fn resolve<'p, I>(&self, paths: I) -> Vec<RoleRule>
    where
        I: IntoIterator<Item = &'p str>,
    {
        let mut seen_dirs: BTreeSet<&str> = BTreeSet::from([ROOT_DIR]);
        let mut seen_exts: BTreeSet<&str> = BTreeSet::new();
        let mut dir_rows: BTreeMap<String, String> = BTreeMap::new();
        let mut ext_rows: BTreeMap<String, String> = BTreeMap::new();

        for path in paths {
            let parts = path_parts(path);
            if seen_dirs.insert(parts.dirname) {
                let role = self
                    .dir_roles
                    .get(parts.dirname)
                    .map(String::as_str)
                    .unwrap_or(DEFAULT_DIRECTORY_ROLE);
                dir_rows.insert(parts.dirname.to_string(), role.to_string());
            }
            if let Some(ext) = parts.extension {
                if ext != WILDCARD && seen_exts.insert(ext) {
                    // Unruled extensions get no row; the wildcard covers them.
                    if let Some(role)= self.ext_roles.get(ext) {
                        ext_rows.insert(ext.to_string(), role.clone());
                    }
                }
            }
        }

        dir_rows
            .into_iter()
            .map(|(dir, role)| RoleRule::for_directory(dir, role))
            .chain(
                ext_rows
                    .into_iter()
                    .map(|(ext, role)| RoleRule::for_extension(ext, role)),
            )
            .collect()
    }

    /// Role the table implies for one file: its directory's role outside the
    /// package root, otherwise its extension's role or the wildcard.
    pub fn role_for(&self, path: &str) -> &'a str {
        let parts = path_parts(path);
        if parts.dirname != ROOT_DIR {
            return self
                .dir_roles
                .get(parts.dirname)
                .map(String::as_str)
                .unwrap_or(DEFAULT_DIRECTORY_ROLE);
        }
        parts
            .extension
            .and_then(|ext| self.ext_roles.get(ext))
            .map(String::as_str)
            .unwrap_or_else(|| self.wildcard_role())
    }
}
