//! Maintainer entity

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintainerRole {
    Lead,
    Developer,
    Contributor,
    Helper,
}

impl MaintainerRole {
    pub const ALL: [MaintainerRole; 4] = [
        MaintainerRole::Lead,
        MaintainerRole::Developer,
        MaintainerRole::Contributor,
        MaintainerRole::Helper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaintainerRole::Lead => "lead",
            MaintainerRole::Developer => "developer",
            MaintainerRole::Contributor => "contributor",
            MaintainerRole::Helper => "helper",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == s)
    }

    /// Comma separated list used in error messages.
    pub fn valid_list() -> String {
        Self::ALL
            .iter()
            .map(MaintainerRole::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for MaintainerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintainer {
    pub role: MaintainerRole,
    pub handle: String,
    pub name: String,
    pub email: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Maintainer {
    pub fn new(
        role: MaintainerRole,
        handle: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            role,
            handle: handle.into(),
            name: name.into(),
            email: email.into(),
            active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}
