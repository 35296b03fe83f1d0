//! Frontend construction options

use std::path::PathBuf;

use crate::domain::value_objects::PageNames;

/// Driver used when none is given.
pub const DEFAULT_DRIVER: &str = "cli";
/// Session id used when none is given.
pub const DEFAULT_SESSION_ID: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendOptions {
    /// Presentation variant; only partitions session records
    pub driver: String,
    pub session_id: String,
    /// Package root; `None` starts a new package in the current directory
    pub package_directory: Option<PathBuf>,
    /// Manifest to import; defaults to the one in the package root
    pub path_to_package_file: Option<PathBuf>,
    pub page_names: PageNames,
}

impl Default for FrontendOptions {
    fn default() -> Self {
        Self {
            driver: DEFAULT_DRIVER.to_string(),
            session_id: DEFAULT_SESSION_ID.to_string(),
            package_directory: None,
            path_to_package_file: None,
            page_names: PageNames::new(),
        }
    }
}

impl FrontendOptions {
    pub fn for_package(dir: impl Into<PathBuf>) -> Self {
        Self {
            package_directory: Some(dir.into()),
            ..Self::default()
        }
    }

    pub fn with_package_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.path_to_package_file = Some(path.into());
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>, driver: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self.driver = driver.into();
        self
    }

    pub fn with_page_names(mut self, page_names: PageNames) -> Self {
        self.page_names = page_names;
        self
    }
}
