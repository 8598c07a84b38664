//! `biome.json` synthesis.

use std::path::{Path, PathBuf};

use serde_json::{Value as JsonValue, json};

use crate::detect::ProjectArchetype;

/// Biome release the generated config and install command are pinned to.
pub const DEFAULT_BIOME_VERSION: &str = "2.2.0";

pub const BIOME_PACKAGE: &str = "@biomejs/biome";

pub const CONFIG_FILE: &str = "biome.json";

/// Names Biome reads its config from; an existing one is never overwritten.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["biome.json", "biome.jsonc"];

pub fn schema_url(version: &str) -> String {
    format!("https://biomejs.dev/schemas/{}/schema.json", version)
}

/// Build the configuration for a project. Every call returns a fresh value.
pub fn synthesize(archetype: ProjectArchetype, biome_version: &str) -> JsonValue {
    let mut config = json!({
        "$schema": schema_url(biome_version),
        "vcs": {
            "enabled": false,
            "clientKind": "git",
            "useIgnoreFile": false
        },
        "files": {
            "ignoreUnknown": false,
            "includes": [
                "**",
                "!**/node_modules",
                "!**/dist",
                "!**/build",
                "!**/coverage"
            ]
        },
        "formatter": {
            "enabled": true,
            "indentStyle": "space",
            "indentWidth": 2,
            "lineWidth": 80,
            "lineEnding": "lf"
        },
        "linter": {
            "enabled": true,
            "rules": {
                "recommended": true
            }
        },
        "javascript": {
            "formatter": {
                "quoteStyle": "double",
                "semicolons": "asNeeded"
            }
        },
        "assist": {
            "enabled": true,
            "actions": {
                "source": {
                    "organizeImports": {
                        "level": "on",
                        "options": {
                            "groups": [
                                ":URL:",
                                ":BLANK_LINE:",
                                [":NODE:", ":BUN:", ":PACKAGE_WITH_PROTOCOL:", ":PACKAGE:"],
                                ":BLANK_LINE:",
                                ":ALIAS:",
                                ":PATH:"
                            ]
                        }
                    }
                }
            }
        }
    });

    if archetype != ProjectArchetype::WebFramework {
        return config;
    }
    if let Some(root) = config.as_object_mut() {
        root.insert(
            "css".to_string(),
            json!({
                "parser": {
                    "cssModules": true
                },
                "formatter": {
                    "enabled": true
                },
                "linter": {
                    "enabled": true
                }
            }),
        );
    }

    config
}

/// The first Biome config already present in `project_root`, if any.
pub fn existing_config(project_root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.is_file())
}

/// Serialized form written to disk: 2-space indentation, trailing newline.
pub fn render(config: &JsonValue) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(config)?;
    out.push('\n');
    Ok(out)
}
