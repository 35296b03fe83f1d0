//! Tree generator registry
//!
//! Generators are looked up by a case-normalized name (`file` -> `File`).
//! Unknown names fail closed.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::TreeGenerator;
use crate::error::{FrontendError, FrontendResult};

/// Generator used when none is named.
pub const DEFAULT_GENERATOR: &str = "File";

#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    generators: BTreeMap<String, Arc<dyn TreeGenerator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generator(mut self, generator: Arc<dyn TreeGenerator>) -> Self {
        self.register(generator);
        self
    }

    pub fn register(&mut self, generator: Arc<dyn TreeGenerator>) {
        let name = normalize_generator_name(generator.name());
        self.generators.insert(name, generator);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(String::as_str)
    }

    pub fn resolve(&self, name: &str) -> FrontendResult<Arc<dyn TreeGenerator>> {
        let normalized = normalize_generator_name(name);
        debug!(generator = %normalized, "resolving file list generator");
        self.generators
            .get(&normalized)
            .cloned()
            .ok_or(FrontendError::NoSuchGenerator { name: normalized })
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("generators", &self.generators.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// First letter upper case, the rest lower case. Blank means the default.
pub fn normalize_generator_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return DEFAULT_GENERATOR.to_string();
    }
    let lower = trimmed.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => DEFAULT_GENERATOR.to_string(),
    }
}
