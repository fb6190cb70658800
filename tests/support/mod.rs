#![allow(dead_code)]

use anyhow::{Context, Result};
use codecap::{
    DefaultJsonDecodable, DefaultJsonEncodable, DefaultPlistDecodable, DefaultPlistEncodable,
    ErrorReporter, JsonDecodable, JsonDecoders, JsonEncodable, JsonEncoders, MultiJsonDecodable,
    MultiJsonEncodable, MultiPlistDecodable, MultiPlistEncodable, PlistDecodable, PlistDecoders,
    PlistEncodable, PlistEncoders,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const VALID_JSON: &str = r#"{"name":"ny :3","points":84}"#;

pub const INVALID_JSON: &str = r#"{"name":"ny :3"// missing points}"#;

pub const MISSING_POINTS_JSON: &str = r#"{"name":"ny :3"}"#;

pub const VALID_JSON_ARRAY: &str =
    r#"[{"name":"ny :3","points":84},{"name":"Gracie","points":16}]"#;

pub const VALID_JSON5: &str = r#"{
    // woag comment !!
    name: "ny :3", "points": 84,
}"#;

pub const VALID_JSON5_ARRAY: &str = r#"[
    {name: "ny :3", "points": 84},
    // woag comment !!
    {"name": "Gracie", "points": 16},
]"#;

pub const VALID_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>points</key>
    <integer>84</integer>
    <key>name</key>
    <string>ny :3</string>
</dict>
</plist>
"#;

pub const VALID_PLIST_ARRAY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<array>
    <dict>
        <key>points</key>
        <integer>84</integer>
        <key>name</key>
        <string>ny :3</string>
    </dict>
    <dict>
        <key>points</key>
        <integer>16</integer>
        <key>name</key>
        <string>Gracie</string>
    </dict>
</array>
</plist>
"#;

pub const INVALID_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.1">
<dict>
    <key>name</key>
    <string>ny :3
</dict>
</plist>
"#;

pub const MISSING_POINTS_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>name</key>
    <string>ny :3</string>
</dict>
</plist>
"#;

pub const TRUNCATED_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>points</key>
    <integer>84</integer>
"#;

/// Every capability, with strict JSON and XML plist as the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestModel {
    pub name: String,
    pub points: i64,
}

impl TestModel {
    pub fn single() -> Self {
        Self {
            name: "ny :3".to_string(),
            points: 84,
        }
    }

    pub fn multiple() -> Vec<Self> {
        vec![
            Self::single(),
            Self {
                name: "Gracie".to_string(),
                points: 16,
            },
        ]
    }
}

impl MultiJsonDecodable for TestModel {
    type JsonDecoders = JsonDecoders;
}

impl MultiJsonEncodable for TestModel {
    type JsonEncoders = JsonEncoders;
}

impl DefaultJsonDecodable for TestModel {
    const DEFAULT_JSON_DECODER: JsonDecoders = JsonDecoders::Base;
}

impl DefaultJsonEncodable for TestModel {
    const DEFAULT_JSON_ENCODER: JsonEncoders = JsonEncoders::Base;
}

impl MultiPlistDecodable for TestModel {
    type PlistDecoders = PlistDecoders;
}

impl MultiPlistEncodable for TestModel {
    type PlistEncoders = PlistEncoders;
}

impl DefaultPlistDecodable for TestModel {
    const DEFAULT_PLIST_DECODER: PlistDecoders = PlistDecoders::Base;
}

impl DefaultPlistEncodable for TestModel {
    const DEFAULT_PLIST_ENCODER: PlistEncoders = PlistEncoders::Xml;
}

impl ErrorReporter for TestModel {}

/// Single-codec capabilities only: no selectors, no variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tally {
    pub label: String,
    pub count: u32,
}

impl JsonDecodable for Tally {}
impl JsonEncodable for Tally {}
impl PlistDecodable for Tally {}
impl PlistEncodable for Tally {}

pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents)
        .with_context(|| format!("failed to write fixture at {}", path.display()))?;
    Ok(path)
}
