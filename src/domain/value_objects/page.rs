//! Page value object
//!
//! A session collects input page by page. Pages have fixed ids (`page1` ..
//! `page8`); a driver may present them under its own names, so page values
//! are stored under the driver name resolved through [`PageNames`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    /// Identity: name, channel, summary, directories, installer/runtime bounds
    Package,
    /// License, versions, stabilities, notes
    Release,
    Maintainers,
    Dependencies,
    /// File list generator and per-file replacements
    Replacements,
    /// Per-file platform / line ending / install-as edits
    Files,
    /// Per-file role exceptions
    Roles,
    /// Output flags (changelog ordering, simple output)
    Options,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Package,
        Page::Release,
        Page::Maintainers,
        Page::Dependencies,
        Page::Replacements,
        Page::Files,
        Page::Roles,
        Page::Options,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Page::Package => "page1",
            Page::Release => "page2",
            Page::Maintainers => "page3",
            Page::Dependencies => "page4",
            Page::Replacements => "page5",
            Page::Files => "page6",
            Page::Roles => "page7",
            Page::Options => "page8",
        }
    }

    /// Parse either the page id (`page4`) or its category name (`dependencies`).
    pub fn parse(s: &str) -> Option<Page> {
        let lower = s.trim().to_ascii_lowercase();
        Page::ALL.into_iter().find(|p| {
            p.id() == lower
                || match p {
                    Page::Package => lower == "package",
                    Page::Release => lower == "release",
                    Page::Maintainers => lower == "maintainers",
                    Page::Dependencies => lower == "dependencies",
                    Page::Replacements => lower == "replacements",
                    Page::Files => lower == "files",
                    Page::Roles => lower == "roles",
                    Page::Options => lower == "options",
                }
        })
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Maps page ids to the names a driver stores values under.
///
/// Pages without an explicit entry use their id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageNames {
    names: BTreeMap<Page, String>,
}

impl PageNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, page: Page, name: impl Into<String>) -> Self {
        self.names.insert(page, name.into());
        self
    }

    pub fn name(&self, page: Page) -> &str {
        self.names.get(&page).map(String::as_str).unwrap_or(page.id())
    }
}
