//! Build options

/// Flags for a build run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Render into memory instead of writing anything
    pub preview: bool,
    /// Also write a legacy (v1) manifest before the primary one
    pub export_legacy: bool,
    pub changelog_old_to_new: bool,
    pub simple_output: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            preview: false,
            export_legacy: false,
            changelog_old_to_new: true,
            simple_output: false,
        }
    }
}

impl BuildOptions {
    pub fn preview() -> Self {
        Self {
            preview: true,
            ..Self::default()
        }
    }
}
