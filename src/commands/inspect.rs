use anyhow::Result;

use pkgfile_frontend::application::assemble::{PackagePage, ReleasePage};
use pkgfile_frontend::application::PageDefaults;
use pkgfile_frontend::domain::entities::{DependencyRecord, FileFilter};

use super::{emit, finish, CliFrontend};

pub fn cmd_info(frontend: &mut CliFrontend, json: bool) -> Result<()> {
    let package = match frontend.defaults("package")? {
        Some(PageDefaults::Package(page)) => page,
        _ => PackagePage::default(),
    };
    let release = match frontend.defaults("release")? {
        Some(PageDefaults::Release(page)) => page,
        _ => ReleasePage::default(),
    };
    let new_package = frontend.is_new_package()?;

    if json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "info",
            "new_package": new_package,
            "package": package,
            "release": release,
        }))?;
    } else {
        let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        if new_package {
            println!("New package (no manifest found)");
        }
        println!("Package:     {}", show(&package.package_name));
        println!("Channel:     {}", show(&package.channel));
        println!("Type:        {}", show(&package.package_type));
        println!("Summary:     {}", show(&package.package_summary));
        println!("Directory:   {}", show(&package.package_dir));
        println!("Manifest:    {}", show(&package.package_file_name));
        println!(
            "Version:     {} ({})",
            show(&release.release_version),
            show(&release.release_state)
        );
        println!(
            "API:         {} ({})",
            show(&release.api_version),
            show(&release.api_state)
        );
        println!("License:     {}", release.release_license.content);
        println!("Date:        {}", show(&release.release_date));
    }
    finish(frontend, json)
}

pub fn cmd_maintainers(frontend: &mut CliFrontend, role: Option<&str>, json: bool) -> Result<()> {
    let maintainers = frontend.maintainers(role)?;
    if json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "maintainers",
            "maintainers": maintainers,
        }))?;
    } else if maintainers.is_empty() {
        println!("No maintainers.");
    } else {
        for m in &maintainers {
            let status = if m.active { "" } else { " (inactive)" };
            println!(
                "  {:<12} {:<16} {} <{}>{}",
                m.role.as_str(),
                m.handle,
                m.name,
                m.email,
                status
            );
        }
    }
    finish(frontend, json)
}

pub fn cmd_files(
    frontend: &mut CliFrontend,
    filter: FileFilter,
    generator: Option<&str>,
    json: bool,
) -> Result<()> {
    if generator.is_some() {
        frontend.set_file_list(generator)?;
    }
    let listing = frontend.file_list(false, filter, None)?;
    if json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "files",
            "files": listing.files,
            "total": listing.total,
        }))?;
    } else {
        for entry in &listing.files {
            let role = if entry.record.role.is_empty() {
                "-"
            } else {
                entry.record.role.as_str()
            };
            println!("  {:>4}  {:<10} {}", entry.key, role, entry.path);
        }
        println!("{} of {} files", listing.len(), listing.total);
    }
    finish(frontend, json)
}

pub fn cmd_roles(frontend: &mut CliFrontend, json: bool) -> Result<()> {
    let roles = frontend.role_list(false)?;
    if json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "roles",
            "roles": roles,
        }))?;
    } else {
        for rule in &roles {
            if rule.extension.is_empty() {
                println!("  dir  {:<24} {}", rule.directory, rule.role);
            } else {
                println!("  ext  {:<24} {}", format!("*.{}", rule.extension), rule.role);
            }
        }
    }
    finish(frontend, json)
}

pub fn cmd_deps(frontend: &mut CliFrontend, json: bool) -> Result<()> {
    let deps = frontend.dep_list(false)?;
    if json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "deps",
            "dependencies": deps,
        }))?;
    } else if deps.is_empty() {
        println!("No dependencies.");
    } else {
        for dep in &deps {
            println!("  {}", describe_dependency(dep));
        }
    }
    finish(frontend, json)
}

fn describe_dependency(dep: &DependencyRecord) -> String {
    let mut line = format!("{:<20} {}", dep.type_tag(), dep.target.name());
    if let Some(channel) = dep.target.channel() {
        line.push_str(&format!(" ({})", channel));
    }
    if let Some(group) = dep.group() {
        line.push_str(&format!(" [group {}]", group.name));
    }
    let c = dep.constraint.normalized();
    for (label, bound) in [
        ("min", &c.min),
        ("max", &c.max),
        ("recommended", &c.recommended),
        ("exclude", &c.exclude),
    ] {
        if let Some(version) = bound {
            line.push_str(&format!(" {}={}", label, version));
        }
    }
    line
}
