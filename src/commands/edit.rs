use anyhow::{bail, Result};
use serde_json::Value;

use pkgfile_frontend::domain::entities::PageFields;
use pkgfile_frontend::{FilePreferenceStore, Page};

use super::{emit, finish, preference_target, CliFrontend};
use crate::cli::Cli;

/// JSON when it parses, otherwise the raw text.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub fn cmd_set(
    frontend: &mut CliFrontend,
    page: &str,
    field: &str,
    value: &str,
    json: bool,
) -> Result<()> {
    let Some(page) = Page::parse(page) else {
        bail!("unknown page \"{}\"", page);
    };
    let mut fields = PageFields::new();
    fields.insert(field.to_string(), parse_value(value));
    frontend.submit_page(page, fields);

    if json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "set",
            "page": frontend.page_name(page),
            "field": field,
        }))?;
    } else {
        println!("{}.{} updated", frontend.page_name(page), field);
    }
    finish(frontend, json)
}

pub fn cmd_add_maintainer(
    frontend: &mut CliFrontend,
    role: &str,
    handle: &str,
    name: &str,
    email: &str,
    active: bool,
    json: bool,
) -> Result<()> {
    let result = frontend.add_maintainer(role, handle, name, email, active);
    finish(frontend, json)?;
    result?;
    if !json {
        println!("Maintainer {} saved", handle);
    }
    Ok(())
}

pub fn cmd_remove_maintainer(frontend: &mut CliFrontend, handle: &str, json: bool) -> Result<()> {
    let result = frontend.delete_maintainer(handle);
    finish(frontend, json)?;
    result?;
    if !json {
        println!("Maintainer {} removed", handle);
    }
    Ok(())
}

pub fn cmd_preference(
    frontend: &mut CliFrontend,
    cli: &Cli,
    name: &str,
    value: Option<&str>,
    save: bool,
) -> Result<()> {
    let target = preference_target(cli);
    if save && target.is_none() {
        bail!("no preferences location; pass --preferences");
    }

    let updated = match value {
        Some(raw) => frontend.set_option(name, parse_value(raw)).and_then(|()| {
            match target.as_deref().filter(|_| save) {
                Some(target) => frontend.save_preferences(&FilePreferenceStore, target),
                None => Ok(()),
            }
        }),
        None => Ok(()),
    };
    let current = updated.and_then(|()| frontend.get_option(name));
    finish(frontend, cli.json)?;
    let current = current?;

    if cli.json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "preference",
            "name": name,
            "value": current,
        }))?;
    } else {
        println!("{} = {}", name, current);
    }
    Ok(())
}

pub fn cmd_reset(frontend: &mut CliFrontend, json: bool) -> Result<()> {
    frontend.reset()?;
    if json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "reset",
            "session": frontend.session_key().session_id,
        }))?;
    } else {
        println!("Session {} reset", frontend.session_key().session_id);
    }
    Ok(())
}
