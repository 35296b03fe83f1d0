//! Version constraint value object
//!
//! `min`/`max`/`recommended`/`exclude` bounds shared by dependency records and
//! the installer/runtime requirements. Empty strings and `false` (as posted by
//! form frontends) both mean "no bound".

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionConstraint {
    #[serde(default, deserialize_with = "lenient_version", skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, deserialize_with = "lenient_version", skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(default, deserialize_with = "lenient_version", skip_serializing_if = "Option::is_none")]
    pub recommended: Option<String>,
    #[serde(default, deserialize_with = "lenient_version", skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
}

impl VersionConstraint {
    pub fn min(version: impl Into<String>) -> Self {
        Self {
            min: Some(version.into()),
            ..Self::default()
        }
    }

    pub fn with_max(mut self, version: impl Into<String>) -> Self {
        self.max = Some(version.into());
        self
    }

    pub fn with_recommended(mut self, version: impl Into<String>) -> Self {
        self.recommended = Some(version.into());
        self
    }

    pub fn with_exclude(mut self, version: impl Into<String>) -> Self {
        self.exclude = Some(version.into());
        self
    }

    /// Drop blank bounds so every field is either a real version or absent.
    pub fn normalized(&self) -> Self {
        fn keep(v: &Option<String>) -> Option<String> {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        }
        Self {
            min: keep(&self.min),
            max: keep(&self.max),
            recommended: keep(&self.recommended),
            exclude: keep(&self.exclude),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        let n = self.normalized();
        n.min.is_none() && n.max.is_none() && n.recommended.is_none() && n.exclude.is_none()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVersion {
    Text(String),
    Flag(bool),
    Number(f64),
}

/// Accept a version string, `false`, `null` or a bare number.
pub(crate) fn lenient_version<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawVersion>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawVersion::Text(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(RawVersion::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
