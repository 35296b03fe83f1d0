//! Session state entity
//!
//! Everything a multi-request editing session accumulates for one
//! `(session id, driver)` pair: the descriptor handle, the file inventory,
//! the flattened dependency list, the role cache and the per-page
//! defaults / constants / submitted values / validity flags.
//!
//! The whole value is serialized into the session store between requests.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{DependencyRecord, FileInventory, Maintainer, RoleRule};

/// Field name -> submitted value, for one page.
pub type PageFields = Map<String, Value>;

/// Snapshots restored by the "reset to defaults" views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultSnapshots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainers: Option<Vec<Maintainer>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<DependencyRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<FileInventory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<RoleRule>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "B: Serialize", deserialize = "B: DeserializeOwned"))]
pub struct SessionState<B> {
    #[serde(default)]
    descriptor: Option<B>,
    #[serde(default)]
    is_new_package: bool,
    #[serde(default)]
    files: Option<FileInventory>,
    #[serde(default)]
    dependencies: Option<Vec<DependencyRecord>>,
    #[serde(default)]
    roles: Option<Vec<RoleRule>>,
    #[serde(default)]
    defaults: BTreeMap<String, PageFields>,
    #[serde(default)]
    constants: BTreeMap<String, PageFields>,
    #[serde(default)]
    values: BTreeMap<String, PageFields>,
    #[serde(default)]
    valid: BTreeMap<String, bool>,
    #[serde(default)]
    snapshots: DefaultSnapshots,
}

impl<B> Default for SessionState<B> {
    fn default() -> Self {
        Self {
            descriptor: None,
            is_new_package: false,
            files: None,
            dependencies: None,
            roles: None,
            defaults: BTreeMap::new(),
            constants: BTreeMap::new(),
            values: BTreeMap::new(),
            valid: BTreeMap::new(),
            snapshots: DefaultSnapshots::default(),
        }
    }
}

impl<B> SessionState<B> {
    pub fn new() -> Self {
        Self::default()
    }

    // === Descriptor ===

    pub fn descriptor(&self) -> Option<&B> {
        self.descriptor.as_ref()
    }

    pub fn descriptor_mut(&mut self) -> Option<&mut B> {
        self.descriptor.as_mut()
    }

    pub fn set_descriptor(&mut self, descriptor: B, is_new_package: bool) {
        self.descriptor = Some(descriptor);
        self.is_new_package = is_new_package;
    }

    /// Move the descriptor out so it can be driven while the rest of the
    /// state is read. Pair with [`SessionState::put_descriptor`].
    pub fn take_descriptor(&mut self) -> Option<B> {
        self.descriptor.take()
    }

    /// Return a descriptor taken with [`SessionState::take_descriptor`].
    pub fn put_descriptor(&mut self, descriptor: B) {
        self.descriptor = Some(descriptor);
    }

    pub fn is_new_package(&self) -> bool {
        self.is_new_package
    }

    // === Files and roles ===

    pub fn files(&self) -> Option<&FileInventory> {
        self.files.as_ref()
    }

    pub fn files_mut(&mut self) -> Option<&mut FileInventory> {
        self.files.as_mut()
    }

    /// Replace the inventory wholesale. The role cache is derived from the
    /// previous inventory, so it is dropped.
    pub fn set_files(&mut self, files: FileInventory) {
        self.files = Some(files);
        self.roles = None;
    }

    /// Put back a saved inventory. Not an enumeration, so the role cache
    /// stays.
    pub fn restore_files(&mut self, files: FileInventory) {
        self.files = Some(files);
    }

    pub fn roles(&self) -> Option<&[RoleRule]> {
        self.roles.as_deref()
    }

    pub fn set_roles(&mut self, roles: Vec<RoleRule>) {
        self.roles = Some(roles);
    }

    // === Dependencies ===

    pub fn dependencies(&self) -> Option<&[DependencyRecord]> {
        self.dependencies.as_deref()
    }

    pub fn dependencies_mut(&mut self) -> Option<&mut Vec<DependencyRecord>> {
        self.dependencies.as_mut()
    }

    pub fn set_dependencies(&mut self, dependencies: Vec<DependencyRecord>) {
        self.dependencies = Some(dependencies);
    }

    // === Page container ===

    pub fn values(&self, page: &str) -> Option<&PageFields> {
        self.values.get(page)
    }

    pub fn value(&self, page: &str, element: &str) -> Option<&Value> {
        self.values.get(page).and_then(|fields| fields.get(element))
    }

    /// Store submitted values; fields already present are overwritten.
    pub fn submit(&mut self, page: &str, fields: PageFields) {
        let entry = self.values.entry(page.to_string()).or_default();
        for (k, v) in fields {
            entry.insert(k, v);
        }
    }

    pub fn set_valid(&mut self, page: &str, valid: bool) {
        self.valid.insert(page.to_string(), valid);
    }

    pub fn is_valid(&self, page: &str) -> Option<bool> {
        self.valid.get(page).copied()
    }

    pub fn page_defaults(&self, page: &str) -> Option<&PageFields> {
        self.defaults.get(page)
    }

    pub fn set_page_defaults(&mut self, page: &str, fields: PageFields) {
        self.defaults.insert(page.to_string(), fields);
    }

    pub fn page_constants(&self, page: &str) -> Option<&PageFields> {
        self.constants.get(page)
    }

    pub fn set_page_constants(&mut self, page: &str, fields: PageFields) {
        self.constants.insert(page.to_string(), fields);
    }

    // === Snapshots ===

    pub fn snapshots(&self) -> &DefaultSnapshots {
        &self.snapshots
    }

    pub fn snapshots_mut(&mut self) -> &mut DefaultSnapshots {
        &mut self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> PageFields {
        match value {
            Value::Object(map) => map,
            _ => PageFields::new(),
        }
    }

    #[test]
    fn restore_files_keeps_role_cache() {
        let mut state: SessionState<()> = SessionState::new();
        state.set_roles(vec![RoleRule::for_extension("php", "php")]);
        state.restore_files(FileInventory::from_paths(["a.php", "b.txt"]));
        assert_eq!(state.roles().map(<[_]>::len), Some(1));
        assert_eq!(state.files().map(FileInventory::len), Some(2));
    }

    #[test]
    fn set_files_invalidates_role_cache() {
        let mut state: SessionState<()> = SessionState::new();
        state.set_roles(vec![RoleRule::for_extension("php", "php")]);
        state.set_files(FileInventory::from_paths(["a.php"]));
        assert!(state.roles().is_none());
        assert_eq!(state.files().map(FileInventory::len), Some(1));
    }

    #[test]
    fn submit_merges_fields_per_page() {
        let mut state: SessionState<()> = SessionState::new();
        state.submit("page1", fields(json!({"packageName": "Foo", "channel": "pear.php.net"})));
        state.submit("page1", fields(json!({"packageName": "Bar"})));

        assert_eq!(state.value("page1", "packageName"), Some(&json!("Bar")));
        assert_eq!(state.value("page1", "channel"), Some(&json!("pear.php.net")));
        assert_eq!(state.value("page2", "channel"), None);
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut state: SessionState<String> = SessionState::new();
        state.set_descriptor("handle".to_string(), true);
        state.set_valid("page1", true);

        let json = serde_json::to_value(&state).unwrap();
        let back: SessionState<String> = serde_json::from_value(json).unwrap();
        assert_eq!(back.descriptor().map(String::as_str), Some("handle"));
        assert!(back.is_new_package());
        assert_eq!(back.is_valid("page1"), Some(true));
    }

    #[test]
    fn empty_record_deserializes_to_fresh_state() {
        let state: SessionState<String> = serde_json::from_value(json!({})).unwrap();
        assert!(state.descriptor().is_none());
        assert!(state.files().is_none());
    }
}
