//! File record entity - per-path packaging directives
//!
//! Records are keyed by a stable integer assigned at enumeration time. The
//! key -> path mapping is kept in a parallel map so edits submitted against a
//! key always land on the same path for the lifetime of the session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{LineEnding, Platform};

/// Text substitution task applied at packaging time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub to: String,
}

impl Replacement {
    pub fn new(from: impl Into<String>, kind: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            kind: kind.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Excluded from the release entirely
    #[serde(default)]
    pub ignore: bool,
    /// Installation role, empty until resolved
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub eol: LineEnding,
    /// Alternate install name, empty means unchanged
    #[serde(default, rename = "installas")]
    pub install_as: String,
    /// Applied in sequence
    #[serde(default)]
    pub replacements: Vec<Replacement>,
}

impl FileRecord {
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }
}

/// Which records a file listing should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFilter {
    /// Records not marked `ignore`
    #[default]
    Selected,
    /// Only records marked `ignore`
    Ignored,
    All,
}

impl FileFilter {
    pub fn accepts(&self, record: &FileRecord) -> bool {
        match self {
            FileFilter::Selected => !record.ignore,
            FileFilter::Ignored => record.ignore,
            FileFilter::All => true,
        }
    }
}

/// Records plus the parallel key -> path mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInventory {
    records: BTreeMap<u32, FileRecord>,
    mapping: BTreeMap<u32, String>,
}

impl FileInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from enumerated paths; keys are assigned in enumeration order.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut inventory = Self::new();
        for path in paths {
            inventory.push(path, FileRecord::default());
        }
        inventory
    }

    /// Append a record under the next free key.
    pub fn push(&mut self, path: impl Into<String>, record: FileRecord) -> u32 {
        let key = self.next_key();
        self.records.insert(key, record);
        self.mapping.insert(key, path.into());
        key
    }

    fn next_key(&self) -> u32 {
        self.records
            .keys()
            .next_back()
            .map(|k| k + 1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: u32) -> Option<&FileRecord> {
        self.records.get(&key)
    }

    pub fn get_mut(&mut self, key: u32) -> Option<&mut FileRecord> {
        self.records.get_mut(&key)
    }

    pub fn path(&self, key: u32) -> Option<&str> {
        self.mapping.get(&key).map(String::as_str)
    }

    /// Records in key order, paired with their mapped path.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &FileRecord, &str)> {
        self.records.iter().filter_map(move |(key, record)| {
            self.mapping
                .get(key)
                .map(|path| (*key, record, path.as_str()))
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.mapping.values().map(String::as_str)
    }

    /// Subset of this inventory accepted by `filter`, keys preserved.
    pub fn filtered(&self, filter: FileFilter) -> FileInventory {
        let mut out = FileInventory::new();
        for (key, record, path) in self.iter() {
            if filter.accepts(record) {
                out.records.insert(key, record.clone());
                out.mapping.insert(key, path.to_string());
            }
        }
        out
    }
}
