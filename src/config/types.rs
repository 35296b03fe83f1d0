//! Preference type definitions

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FrontendError, FrontendResult};

use super::flag::{deserialize_flag, deserialize_opt_flag};

/// Option names accepted by `get_option` / `set_option`.
pub const OPTION_NAMES: [&str; 12] = [
    "outputdirectory",
    "roles",
    "dir_roles",
    "changelogoldtonew",
    "simpleoutput",
    "exportcompatiblev1",
    "baseinstalldir",
    "package_type",
    "stability",
    "maintainer_roles",
    "plugingenerator",
    "filelistgenerator",
];

/// Frontend preferences.
///
/// Serialized field names are the option names of the settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Where generated package files go; the package directory when unset
    #[serde(rename = "outputdirectory", default, skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<PathBuf>,

    /// Extension -> role, `*` is the fallback
    pub roles: BTreeMap<String, String>,

    /// Directory -> role
    pub dir_roles: BTreeMap<String, String>,

    #[serde(rename = "changelogoldtonew", deserialize_with = "deserialize_flag")]
    pub changelog_old_to_new: bool,

    #[serde(rename = "simpleoutput", deserialize_with = "deserialize_flag")]
    pub simple_output: bool,

    #[serde(rename = "exportcompatiblev1", deserialize_with = "deserialize_flag")]
    pub export_compatible_v1: bool,

    #[serde(rename = "baseinstalldir")]
    pub base_install_dir: String,

    pub package_type: Vec<String>,

    pub stability: Vec<String>,

    pub maintainer_roles: Vec<String>,

    /// Tree generators offered to the user
    #[serde(rename = "plugingenerator")]
    pub plugin_generator: Vec<String>,

    #[serde(rename = "filelistgenerator")]
    pub filelist_generator: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn pairs(items: &[(&str, &str)]) -> BTreeMap<String, String> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            output_directory: None,
            roles: pairs(&[
                ("h", "src"),
                ("c", "src"),
                ("cpp", "src"),
                ("m4", "src"),
                ("w32", "src"),
                ("dll", "ext"),
                ("php", "php"),
                ("html", "doc"),
                ("*", "data"),
            ]),
            dir_roles: pairs(&[
                ("docs", "doc"),
                ("examples", "doc"),
                ("tests", "test"),
                ("scripts", "script"),
            ]),
            changelog_old_to_new: true,
            simple_output: false,
            export_compatible_v1: false,
            base_install_dir: "/".to_string(),
            package_type: strings(&["php", "extsrc", "extbin"]),
            stability: strings(&["snapshot", "devel", "alpha", "beta", "stable"]),
            maintainer_roles: strings(&["lead", "developer", "contributor", "helper"]),
            plugin_generator: strings(&["File", "Git"]),
            filelist_generator: "file".to_string(),
        }
    }
}

impl Preferences {
    /// Apply `overrides` field by field. Maps merge key by key, everything
    /// else is replaced.
    pub fn apply(&mut self, overrides: PreferenceOverrides) {
        let PreferenceOverrides {
            output_directory,
            roles,
            dir_roles,
            changelog_old_to_new,
            simple_output,
            export_compatible_v1,
            base_install_dir,
            package_type,
            stability,
            maintainer_roles,
            plugin_generator,
            filelist_generator,
        } = overrides;

        if let Some(dir) = output_directory {
            self.output_directory = Some(dir).filter(|d| !d.as_os_str().is_empty());
        }
        if let Some(roles) = roles {
            self.roles.extend(roles);
        }
        if let Some(dir_roles) = dir_roles {
            self.dir_roles.extend(dir_roles);
        }
        if let Some(v) = changelog_old_to_new {
            self.changelog_old_to_new = v;
        }
        if let Some(v) = simple_output {
            self.simple_output = v;
        }
        if let Some(v) = export_compatible_v1 {
            self.export_compatible_v1 = v;
        }
        if let Some(v) = base_install_dir {
            self.base_install_dir = v;
        }
        if let Some(v) = package_type {
            self.package_type = v;
        }
        if let Some(v) = stability {
            self.stability = v;
        }
        if let Some(v) = maintainer_roles {
            self.maintainer_roles = v;
        }
        if let Some(v) = plugin_generator {
            self.plugin_generator = v;
        }
        if let Some(v) = filelist_generator {
            self.filelist_generator = v;
        }
    }

    /// Value of one option, `None` for an unknown name.
    pub fn get_option(&self, name: &str) -> Option<Value> {
        if !OPTION_NAMES.contains(&name) {
            return None;
        }
        let value = serde_json::to_value(self).ok()?;
        Some(value.get(name).cloned().unwrap_or(Value::Null))
    }

    /// Replace one option. Maps are replaced too, not merged.
    pub fn set_option(&mut self, name: &str, value: Value) -> FrontendResult<()> {
        if !OPTION_NAMES.contains(&name) {
            return Err(FrontendError::UnknownOption {
                option: name.to_string(),
            });
        }
        let invalid = |e: serde_json::Error| FrontendError::InvalidOptionValue {
            option: name.to_string(),
            message: e.to_string(),
        };
        let mut current = serde_json::to_value(&*self).map_err(invalid)?;
        if let Value::Object(map) = &mut current {
            if value.is_null() {
                map.remove(name);
            } else {
                map.insert(name.to_string(), value);
            }
        }
        let updated: Preferences = serde_json::from_value(current).map_err(invalid)?;
        *self = updated;
        Ok(())
    }
}

/// Partial preferences as read from a settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceOverrides {
    #[serde(rename = "outputdirectory", default)]
    pub output_directory: Option<PathBuf>,
    #[serde(default)]
    pub roles: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub dir_roles: Option<BTreeMap<String, String>>,
    #[serde(rename = "changelogoldtonew", default, deserialize_with = "deserialize_opt_flag")]
    pub changelog_old_to_new: Option<bool>,
    #[serde(rename = "simpleoutput", default, deserialize_with = "deserialize_opt_flag")]
    pub simple_output: Option<bool>,
    #[serde(rename = "exportcompatiblev1", default, deserialize_with = "deserialize_opt_flag")]
    pub export_compatible_v1: Option<bool>,
    #[serde(rename = "baseinstalldir", default)]
    pub base_install_dir: Option<String>,
    #[serde(default)]
    pub package_type: Option<Vec<String>>,
    #[serde(default)]
    pub stability: Option<Vec<String>>,
    #[serde(default)]
    pub maintainer_roles: Option<Vec<String>>,
    #[serde(rename = "plugingenerator", default)]
    pub plugin_generator: Option<Vec<String>>,
    #[serde(rename = "filelistgenerator", default)]
    pub filelist_generator: Option<String>,
}

/// Settings document: preferences live under `[settings]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PreferencesDocument {
    #[serde(default)]
    pub settings: PreferenceOverrides,
}

#[derive(Debug, Serialize)]
pub(crate) struct PreferencesDocumentRef<'a> {
    pub settings: &'a Preferences,
}
