//! Test fixtures - reusable package trees.

/// The package used throughout the role examples.
pub const EXAMPLE_PACKAGE: &[(&str, &str)] = &[
    ("src/a.php", "<?php\n"),
    ("src/b.txt", "notes\n"),
    ("README", "Example package\n"),
];

/// A package with docs, tests and platform scripts.
pub const PLATFORM_PACKAGE: &[(&str, &str)] = &[
    ("Foo/Bar.php", "<?php\nclass Foo_Bar {}\n"),
    ("docs/index.html", "<html></html>\n"),
    ("tests/BarTest.php", "<?php\n"),
    ("scripts/foo.bat", "@echo off\n"),
    ("scripts/foo.sh", "#!/bin/sh\n"),
];

/// A previously written manifest with dependencies and a group.
pub const EXISTING_MANIFEST: &str = r#"{
  "manifestVersion": "2.0",
  "name": "Foo_Bar",
  "channel": "pear.php.net",
  "type": "php",
  "summary": "Foo bar tools",
  "description": "Tools for foo and bar",
  "maintainers": [
    {"role": "lead", "handle": "jdoe", "name": "J Doe", "email": "j@example.com", "active": true}
  ],
  "date": "2024-01-15",
  "version": {"release": "1.2.0", "api": "1.0.0"},
  "stability": {"release": "stable", "api": "stable"},
  "license": {"content": "MIT"},
  "notes": "Bug fixes",
  "contents": {
    "baseInstallDir": "/",
    "files": [
      {"name": "Foo/Bar.php", "role": "php",
       "replacements": [{"from": "@package_version@", "type": "package-info", "to": "version"}]}
    ]
  },
  "dependencies": {
    "installer": {"name": "installer", "min": "1.4.3"},
    "runtime": {"name": "php", "min": "5.2.0"},
    "required": {"package": {"name": "Console_Getopt", "channel": "pear.php.net", "min": "1.2"}},
    "optional": {"extension": {"name": "curl"}},
    "group": {"attribs": {"name": "remote", "hint": "remote install"},
              "package": {"name": "XML_RPC", "channel": "pear.php.net"}}
  },
  "releases": [{}],
  "changelog": [
    {"version": {"release": "1.2.0", "api": "1.0.0"},
     "stability": {"release": "stable", "api": "stable"},
     "date": "2024-01-15", "notes": "Bug fixes"}
  ]
}
"#;
