//! Dependency flattening
//!
//! Converts the descriptor's nested dependency tree into the flat record list
//! the session edits, and replays a flat list back into builder calls.

use tracing::{debug, warn};

use crate::domain::entities::{
    DependencyKind, DependencyRecord, DependencySet, DependencyTarget, NestedDependencies,
    NestedDependency, PackageKind, Placement, Requirement,
};
use crate::domain::ports::{BuilderWarning, DescriptorBuilder};
use crate::domain::value_objects::VersionConstraint;

/// Flatten `deps` into records: required then optional, each ordered
/// package / subpackage / extension, then every group in the same kind order.
///
/// Installer and runtime requirements are not part of the list.
pub fn flatten(deps: &NestedDependencies) -> Vec<DependencyRecord> {
    let mut records = Vec::new();

    for requirement in [Requirement::Required, Requirement::Optional] {
        expand_set(deps.set(requirement), &Placement::from(requirement), &mut records);
    }
    for group in deps.groups() {
        expand_set(&group.members, &Placement::Group(group.attribs.clone()), &mut records);
    }

    debug!(records = records.len(), groups = deps.groups().len(), "flattened dependencies");
    records
}

fn expand_set(set: &DependencySet, placement: &Placement, out: &mut Vec<DependencyRecord>) {
    for kind in DependencyKind::ALL {
        for entry in set.entries(kind) {
            out.push(DependencyRecord::new(
                target_for(kind, entry),
                placement.clone(),
                narrowed_constraint(entry),
            ));
        }
    }
}

fn target_for(kind: DependencyKind, entry: &NestedDependency) -> DependencyTarget {
    let channel = entry.channel.clone().unwrap_or_default();
    match kind {
        DependencyKind::Package => DependencyTarget::Package {
            name: entry.name.clone(),
            channel,
        },
        DependencyKind::Subpackage => DependencyTarget::Subpackage {
            name: entry.name.clone(),
            channel,
        },
        DependencyKind::Extension => DependencyTarget::Extension {
            extension: entry.name.clone(),
        },
    }
}

/// Constraint of a nested entry. An exclude list keeps only its first entry.
pub fn narrowed_constraint(entry: &NestedDependency) -> VersionConstraint {
    let exclude = entry.exclude.as_ref().and_then(|list| {
        if list.len() > 1 {
            warn!(
                dependency = %entry.name,
                dropped = list.len() - 1,
                "exclude list narrowed to its first version"
            );
        }
        list.first().cloned()
    });
    VersionConstraint {
        min: entry.min.clone(),
        max: entry.max.clone(),
        recommended: entry.recommended.clone(),
        exclude,
    }
    .normalized()
}

/// Replay `records` into `builder`, in order.
///
/// A group is registered the first time one of its members follows a record
/// of another group. Builder warnings are collected, never fatal.
pub fn unflatten<B>(records: &[DependencyRecord], builder: &mut B) -> Vec<BuilderWarning>
where
    B: DescriptorBuilder + ?Sized,
{
    let mut warnings = Vec::new();
    let mut current_group: Option<&str> = None;

    for record in records {
        let constraint = record.constraint.normalized();
        let result = match (&record.placement, &record.target) {
            (Placement::Group(group), target) => {
                if current_group != Some(group.name.as_str()) {
                    if let Err(w) = builder.add_dependency_group(&group.name, &group.hint) {
                        warnings.push(w);
                    }
                    current_group = Some(group.name.as_str());
                }
                match target {
                    DependencyTarget::Package { name, channel } => builder.add_group_package_dep(
                        PackageKind::Package,
                        &group.name,
                        name,
                        channel,
                        &constraint,
                    ),
                    DependencyTarget::Subpackage { name, channel } => builder
                        .add_group_package_dep(
                            PackageKind::Subpackage,
                            &group.name,
                            name,
                            channel,
                            &constraint,
                        ),
                    DependencyTarget::Extension { extension } => {
                        builder.add_group_extension_dep(&group.name, extension, &constraint)
                    }
                }
            }
            (placement, target) => {
                let requirement = match placement {
                    Placement::Optional => Requirement::Optional,
                    _ => Requirement::Required,
                };
                match target {
                    DependencyTarget::Package { name, channel } => builder.add_package_dep(
                        requirement,
                        PackageKind::Package,
                        name,
                        channel,
                        &constraint,
                    ),
                    DependencyTarget::Subpackage { name, channel } => builder.add_package_dep(
                        requirement,
                        PackageKind::Subpackage,
                        name,
                        channel,
                        &constraint,
                    ),
                    DependencyTarget::Extension { extension } => {
                        builder.add_extension_dep(requirement, extension, &constraint)
                    }
                }
            }
        };
        if let Err(w) = result {
            warnings.push(w);
        }
    }

    debug!(records = records.len(), warnings = warnings.len(), "replayed dependencies");
    warnings
}
