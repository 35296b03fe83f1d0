//! Scenario: Previewed Manifest Layout
//!
//! Journey: A tool embeds the frontend as a library and previews the
//! manifest of a small package.
//!
//! Success Criteria:
//! - Contents, dependencies and releases render in a stable layout

use serde_json::{json, Value};

use pkgfile_frontend::domain::entities::PageFields;
use pkgfile_frontend::domain::ports::WriteOutcome;
use pkgfile_frontend::{
    builtin_registry, BuildOptions, Frontend, FrontendOptions, JsonDescriptorFactory,
    MemorySessionStore, Page, Preferences,
};

use crate::common::*;

fn fields(value: Value) -> PageFields {
    match value {
        Value::Object(map) => map,
        _ => PageFields::new(),
    }
}

/// SCENARIO: The preview of a fresh package has a stable layout
#[test]
fn scenario_preview_layout() {
    let env = TestEnv::with_files(&[
        ("Foo/Bar.php", "<?php\n"),
        ("README", "Foo\n"),
        ("docs/index.html", "<html></html>\n"),
    ]);
    let mut frontend = Frontend::open(
        FrontendOptions::for_package(env.package_root.path()),
        Preferences::default(),
        JsonDescriptorFactory,
        MemorySessionStore::new(),
        builtin_registry(),
    )
    .unwrap();

    frontend.submit_page(
        Page::Package,
        fields(json!({
            "packageName": "Foo_Bar",
            "packageSummary": "Foo bar tools",
            "packageDescription": "Tools for foo and bar"
        })),
    );
    frontend.submit_page(
        Page::Release,
        fields(json!({
            "releaseLicense": {"content": "MIT"},
            "releaseVersion": "1.0.0",
            "releaseState": "stable",
            "APIVersion": "1.0.0",
            "APIState": "stable"
        })),
    );
    frontend.accept_defaults().unwrap();
    frontend
        .add_maintainer("lead", "jdoe", "J Doe", "j@example.com", true)
        .unwrap();

    let WriteOutcome::Preview(rendered) = frontend
        .build_package_file(&BuildOptions::preview())
        .unwrap()
    else {
        panic!("expected a preview");
    };
    let manifest: Value = serde_json::from_str(&rendered).unwrap();
    let layout = json!({
        "contents": manifest["contents"],
        "dependencies": manifest["dependencies"],
        "releases": manifest["releases"],
    });

    insta::assert_snapshot!(serde_json::to_string_pretty(&layout).unwrap(), @r###"
    {
      "contents": {
        "baseInstallDir": "/",
        "files": [
          {
            "name": "Foo/Bar.php",
            "role": "php"
          },
          {
            "name": "README",
            "role": "data"
          },
          {
            "name": "docs/index.html",
            "role": "doc"
          }
        ]
      },
      "dependencies": {
        "installer": {
          "min": "1.4.3",
          "name": "installer"
        },
        "optional": {},
        "required": {},
        "runtime": {
          "min": "4.2.0",
          "name": "php"
        }
      },
      "releases": [
        {}
      ]
    }
    "###);
}
