//! Domain Services
//!
//! Pure business logic over the session entities. Apart from the tree
//! generator called by `materialize`, nothing here touches I/O.

mod dependency_flattener;
mod file_inventory;
mod generator_registry;
mod path_info;
mod role_resolver;

pub use dependency_flattener::{flatten, narrowed_constraint, unflatten};
pub use file_inventory::materialize;
pub use generator_registry::{normalize_generator_name, GeneratorRegistry, DEFAULT_GENERATOR};
pub use path_info::{path_parts, relative_path, with_trailing_slash, PathParts, ROOT_DIR};
pub use role_resolver::{
    RoleResolver, DEFAULT_DIRECTORY_ROLE, DEFAULT_WILDCARD_ROLE, WILDCARD,
};
