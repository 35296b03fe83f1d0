//! File inventory materialization
//!
//! Enumerates the package directory with a named tree generator and replaces
//! the session's file inventory with one default record per path.

use std::path::Path;

use tracing::{debug, info};

use crate::domain::entities::{FileInventory, SessionState};
use crate::domain::ports::{BuilderWarning, DescriptorBuilder};
use crate::error::{FrontendError, FrontendResult};

use super::generator_registry::{normalize_generator_name, GeneratorRegistry, DEFAULT_GENERATOR};

/// Re-enumerate the package tree of the session's descriptor.
///
/// Records the chosen generator in the builder options, replaces the file
/// inventory (keys restart at 0) and drops the role cache. Returns the number
/// of enumerated files.
pub fn materialize<B>(
    state: &mut SessionState<B>,
    generators: &GeneratorRegistry,
    generator_name: Option<&str>,
) -> FrontendResult<usize>
where
    B: DescriptorBuilder,
{
    let name = normalize_generator_name(generator_name.unwrap_or(DEFAULT_GENERATOR));
    let generator = generators.resolve(&name)?;

    let builder = state.descriptor_mut().ok_or_else(|| {
        FrontendError::Builder(BuilderWarning::error("no package descriptor in session"))
    })?;
    let mut options = builder.options().clone();
    options.filelist_generator = name.clone();
    builder.set_options(options, true)?;

    let package_dir = builder.options().package_directory.clone();
    let root = package_dir.trim_end_matches('/');
    let root = if root.is_empty() { "/" } else { root };

    let paths = generator.enumerate(Path::new(root))?;
    info!(
        generator = %name,
        files = paths.len(),
        tree = %package_dir,
        "enumerated package tree"
    );

    let inventory = FileInventory::from_paths(
        paths
            .iter()
            .map(|rel| format!("{}{}", package_dir, rel.trim_start_matches('/'))),
    );
    let count = inventory.len();
    state.set_files(inventory);
    debug!(files = count, "file inventory replaced, role cache dropped");
    Ok(count)
}
