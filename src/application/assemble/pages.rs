//! Typed views of submitted page values
//!
//! Pages are stored as loose field maps; the assembler reads them through
//! these structs. Every field is optional so a partially filled page still
//! reads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::deserialize_opt_flag;
use crate::domain::entities::PageFields;
use crate::domain::value_objects::VersionConstraint;

/// Identity page (`page1`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackagePage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_output_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_install_dir: Option<String>,
    pub pear_installer: VersionConstraint,
    pub php_version: VersionConstraint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseField {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Release page (`page2`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReleasePage {
    pub release_license: LicenseField,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_version: Option<String>,
    #[serde(rename = "APIState", skip_serializing_if = "Option::is_none")]
    pub api_state: Option<String>,
    #[serde(rename = "APIVersion", skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_notes: Option<String>,
}

/// Replacements page (`page5`): only the generator choice matters here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplacementsPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filelistgenerator: Option<String>,
}

/// Output options page (`page8`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionsPage {
    #[serde(deserialize_with = "deserialize_opt_flag", skip_serializing_if = "Option::is_none")]
    pub changelog_old_to_new: Option<bool>,
    #[serde(deserialize_with = "deserialize_opt_flag", skip_serializing_if = "Option::is_none")]
    pub simple_output: Option<bool>,
}

/// Read a page struct from stored fields.
pub fn read_page<T>(fields: Option<&PageFields>) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    match fields {
        Some(fields) => serde_json::from_value(Value::Object(fields.clone())),
        None => Ok(T::default()),
    }
}

/// Render a page struct as stored fields.
pub fn to_fields<T: Serialize>(page: &T) -> PageFields {
    match serde_json::to_value(page) {
        Ok(Value::Object(map)) => map,
        _ => PageFields::new(),
    }
}

/// Blank strings count as not submitted.
pub(crate) fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
