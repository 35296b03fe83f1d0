use anyhow::Result;

use pkgfile_frontend::domain::ports::WriteOutcome;

use super::{emit, finish, CliFrontend};

pub fn cmd_build(frontend: &mut CliFrontend, preview: bool, export_v1: bool, json: bool) -> Result<()> {
    frontend.accept_defaults()?;
    let mut options = frontend.build_options(preview);
    options.export_legacy |= export_v1;

    let result = frontend.build_package_file(&options);
    finish(frontend, json)?;
    let outcome = result?;

    match outcome {
        WriteOutcome::Preview(rendered) => {
            if json {
                emit(serde_json::json!({
                    "event": "complete",
                    "command": "build",
                    "preview": true,
                    "document": rendered,
                }))?;
            } else {
                println!("{}", rendered);
            }
        }
        WriteOutcome::Written(path) => {
            if json {
                emit(serde_json::json!({
                    "event": "complete",
                    "command": "build",
                    "preview": false,
                    "path": path,
                }))?;
            } else {
                println!("Package file written to {}", path.display());
            }
        }
    }
    Ok(())
}
