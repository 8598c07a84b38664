//! `package.json` access.
//!
//! The manifest is held as an ordered JSON object so that writing it back
//! keeps every key the migration does not touch, in its original position.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::error::{MigrateError, Result};
use crate::fs_utils::{FoundFile, find_config_file};

pub const MANIFEST_FILE: &str = "package.json";

/// Dependency groups scanned for packages, in scan order.
pub const DEPENDENCY_GROUPS: [&str; 4] = [
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
];

/// Top-level keys holding inline legacy tool configuration.
pub const LEGACY_CONFIG_KEYS: [&str; 2] = ["eslintConfig", "prettier"];

#[derive(Clone, Debug, PartialEq)]
pub struct Manifest {
    path: PathBuf,
    fields: Map<String, JsonValue>,
}

impl Manifest {
    /// Locate the nearest `package.json` at or above `start` and load it.
    ///
    /// `start` is made absolute first: `Path::new(".").parent()` is empty, so
    /// a relative start would never ascend past the working directory.
    pub fn discover(start: &Path) -> Result<Self> {
        let start = std::path::absolute(start).map_err(|e| MigrateError::io(start, e))?;
        let found = find_config_file(&start, &[MANIFEST_FILE])
            .ok_or_else(|| MigrateError::ManifestNotFound { start: start.clone() })?;
        Self::load(&found.path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| MigrateError::io(path, e))?;
        Self::parse(path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let json: JsonValue =
            serde_json::from_str(content).map_err(|e| MigrateError::ManifestParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        match json {
            JsonValue::Object(fields) => {
                debug!("loaded manifest {}", path.display());
                Ok(Self {
                    path: path.to_path_buf(),
                    fields,
                })
            }
            _ => Err(MigrateError::ManifestParse {
                path: path.to_path_buf(),
                message: "top-level value is not an object".to_string(),
            }),
        }
    }

    /// Find and load the closest manifest strictly above `dir`.
    ///
    /// Used for monorepo lookups, where an ancestor that cannot be read is
    /// simply not an authority.
    pub fn nearest_ancestor(dir: &Path) -> Option<Self> {
        let parent = dir.parent()?;
        let FoundFile { path, .. } = find_config_file(parent, &[MANIFEST_FILE])?;
        match Self::load(&path) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                debug!("ignoring ancestor manifest: {}", e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the manifest; the project root for the migration.
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn package_manager_field(&self) -> Option<&str> {
        self.fields.get("packageManager").and_then(|v| v.as_str())
    }

    /// Package names of one dependency group, in declaration order.
    pub fn dependency_names(&self, group: &str) -> Vec<&str> {
        self.fields
            .get(group)
            .and_then(|v| v.as_object())
            .map(|deps| deps.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Every dependency name across the recognized groups, group by group.
    pub fn all_dependency_names(&self) -> impl Iterator<Item = &str> {
        DEPENDENCY_GROUPS
            .iter()
            .flat_map(move |group| self.dependency_names(group))
    }

    pub fn has_dependency(&self, name: &str) -> bool {
        self.all_dependency_names().any(|dep| dep == name)
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.fields
            .get("scripts")
            .and_then(|v| v.as_object())
            .and_then(|scripts| scripts.get(name))
            .and_then(|v| v.as_str())
    }

    /// Set a script, creating the `scripts` object when missing.
    pub fn set_script(&mut self, name: &str, command: &str) {
        let scripts = self
            .fields
            .entry("scripts")
            .or_insert_with(|| JsonValue::Object(Map::new()));
        if !scripts.is_object() {
            *scripts = JsonValue::Object(Map::new());
        }
        if let JsonValue::Object(scripts) = scripts {
            scripts.insert(name.to_string(), JsonValue::String(command.to_string()));
        }
    }

    /// Drop `eslintConfig` / `prettier`; returns the keys actually removed.
    pub fn remove_legacy_config_keys(&mut self) -> Vec<&'static str> {
        LEGACY_CONFIG_KEYS
            .iter()
            .copied()
            .filter(|key| self.fields.shift_remove(*key).is_some())
            .collect()
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Serialize with 2-space indentation and a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.fields).map_err(|e| {
            MigrateError::ManifestParse {
                path: self.path.clone(),
                message: e.to_string(),
            }
        })?;
        out.push('\n');
        Ok(out)
    }

    pub fn save(&self) -> Result<()> {
        let content = self.to_pretty_string()?;
        std::fs::write(&self.path, content).map_err(|e| MigrateError::io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manifest(json: &str) -> Manifest {
        Manifest::parse(Path::new("package.json"), json).expect("valid manifest")
    }

    #[test]
    fn discover_walks_up_to_manifest() {
        let tmp = TempDir::new().expect("temp dir");
        std::fs::write(tmp.path().join("package.json"), r#"{"name":"app"}"#)
            .expect("write manifest");
        let nested = tmp.path().join("src/components");
        std::fs::create_dir_all(&nested).expect("mkdir");

        let m = Manifest::discover(&nested).expect("discover");
        assert_eq!(m.directory(), tmp.path());
    }

    #[test]
    fn malformed_json_embeds_parser_message() {
        let err = Manifest::parse(Path::new("package.json"), "{ \"name\": ").unwrap_err();
        match err {
            MigrateError::ManifestParse { message, .. } => {
                assert!(message.contains("EOF"), "unexpected message: {message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn non_object_manifest_is_rejected() {
        let err = Manifest::parse(Path::new("package.json"), "[1, 2]").unwrap_err();
        assert!(matches!(err, MigrateError::ManifestParse { .. }));
    }

    #[test]
    fn dependency_names_across_groups() {
        let m = manifest(
            r#"{
                "dependencies": {"react": "^18.0.0"},
                "devDependencies": {"typescript": "^5.0.0", "eslint": "^8.0.0"},
                "peerDependencies": {"react-dom": "^18.0.0"}
            }"#,
        );
        let names: Vec<&str> = m.all_dependency_names().collect();
        assert_eq!(names, vec!["react", "typescript", "eslint", "react-dom"]);
        assert!(m.has_dependency("typescript"));
        assert!(!m.has_dependency("vue"));
    }

    #[test]
    fn set_script_creates_scripts_object() {
        let mut m = manifest(r#"{"name": "app"}"#);
        m.set_script("lint", "biome check .");
        assert_eq!(m.script("lint"), Some("biome check ."));
    }

    #[test]
    fn round_trip_preserves_untouched_fields_and_order() {
        let mut m = manifest(
            r#"{"name":"app","version":"1.0.0","eslintConfig":{"extends":"x"},"scripts":{"build":"vite build"},"prettier":{},"private":true}"#,
        );
        let removed = m.remove_legacy_config_keys();
        assert_eq!(removed, vec!["eslintConfig", "prettier"]);
        m.set_script("lint", "biome check .");

        let out = m.to_pretty_string().expect("serialize");
        assert!(out.ends_with("}\n"));
        assert_eq!(
            out,
            "{\n  \"name\": \"app\",\n  \"version\": \"1.0.0\",\n  \"scripts\": {\n    \"build\": \"vite build\",\n    \"lint\": \"biome check .\"\n  },\n  \"private\": true\n}\n"
        );
    }

    #[test]
    fn save_writes_back_to_origin() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("package.json");
        std::fs::write(&path, r#"{"name":"app"}"#).expect("write manifest");

        let mut m = Manifest::load(&path).expect("load");
        m.set_script("lint:fix", "biome check --write .");
        m.save().expect("save");

        let reloaded = Manifest::load(&path).expect("reload");
        assert_eq!(reloaded.script("lint:fix"), Some("biome check --write ."));
    }
}
