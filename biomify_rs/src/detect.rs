//! Project probing: archetype, TypeScript usage and legacy tooling.
//!
//! Everything here is derived once from `package.json` and a few marker
//! files in the project root:
//! - a web framework / UI library dependency → [`ProjectArchetype::WebFramework`]
//! - `tsconfig.json` or a `typescript` dependency → TypeScript scripts
//! - `eslint*` / `prettier*` packages and config files → legacy cleanup

use std::fmt;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::manifest::Manifest;
use crate::package_manager::{Detection, detect_package_manager};

/// Packages whose presence marks a web-framework project.
pub const WEB_FRAMEWORK_PACKAGES: [&str; 12] = [
    "react",
    "react-dom",
    "next",
    "vue",
    "nuxt",
    "svelte",
    "@sveltejs/kit",
    "@angular/core",
    "solid-js",
    "preact",
    "astro",
    "@remix-run/react",
];

/// Legacy configuration files removed during cleanup, checked in the project root.
pub const LEGACY_CONFIG_FILES: [&str; 23] = [
    ".eslintrc",
    ".eslintrc.js",
    ".eslintrc.cjs",
    ".eslintrc.json",
    ".eslintrc.yml",
    ".eslintrc.yaml",
    "eslint.config.js",
    "eslint.config.mjs",
    "eslint.config.cjs",
    "eslint.config.ts",
    ".eslintignore",
    ".prettierrc",
    ".prettierrc.js",
    ".prettierrc.cjs",
    ".prettierrc.mjs",
    ".prettierrc.json",
    ".prettierrc.yml",
    ".prettierrc.yaml",
    ".prettierrc.toml",
    "prettier.config.js",
    "prettier.config.cjs",
    "prettier.config.mjs",
    ".prettierignore",
];

static LEGACY_PACKAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)eslint|prettier").expect("valid legacy package regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectArchetype {
    WebFramework,
    Generic,
}

impl fmt::Display for ProjectArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectArchetype::WebFramework => write!(f, "web framework"),
            ProjectArchetype::Generic => write!(f, "generic"),
        }
    }
}

impl ProjectArchetype {
    pub fn infer(manifest: &Manifest) -> Self {
        let framework = manifest
            .all_dependency_names()
            .find(|name| WEB_FRAMEWORK_PACKAGES.contains(name));
        match framework {
            Some(name) => {
                debug!("web framework archetype (found {})", name);
                ProjectArchetype::WebFramework
            }
            None => ProjectArchetype::Generic,
        }
    }
}

/// TypeScript is in use when the project root has a `tsconfig.json` or any
/// dependency group lists `typescript`.
pub fn uses_typescript(manifest: &Manifest) -> bool {
    manifest.directory().join("tsconfig.json").is_file() || manifest.has_dependency("typescript")
}

/// ESLint/Prettier packages (plugins and configs included), first-seen order.
pub fn find_legacy_packages(manifest: &Manifest) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for name in manifest.all_dependency_names() {
        if LEGACY_PACKAGE_RE.is_match(name) && !found.iter().any(|seen| seen == name) {
            found.push(name.to_string());
        }
    }
    found
}

pub fn find_legacy_config_files(project_root: &Path) -> Vec<PathBuf> {
    LEGACY_CONFIG_FILES
        .iter()
        .map(|name| project_root.join(name))
        .filter(|path| path.is_file())
        .collect()
}

/// Everything the migration needs to know about a project.
#[derive(Debug, Clone)]
pub struct ProjectEnvironment {
    pub manifest: Manifest,
    pub package_manager: Detection,
    pub archetype: ProjectArchetype,
    pub typescript: bool,
    pub legacy_packages: Vec<String>,
    pub legacy_config_files: Vec<PathBuf>,
}

impl ProjectEnvironment {
    /// Probe the project owning the nearest `package.json` at or above `start`.
    pub fn probe(start: &Path) -> Result<Self> {
        let manifest = Manifest::discover(start)?;
        let package_manager = detect_package_manager(&manifest);
        let archetype = ProjectArchetype::infer(&manifest);
        let typescript = uses_typescript(&manifest);
        let legacy_packages = find_legacy_packages(&manifest);
        let legacy_config_files = find_legacy_config_files(manifest.directory());

        Ok(Self {
            manifest,
            package_manager,
            archetype,
            typescript,
            legacy_packages,
            legacy_config_files,
        })
    }

    pub fn project_root(&self) -> &Path {
        self.manifest.directory()
    }

    pub fn has_legacy_tooling(&self) -> bool {
        !self.legacy_packages.is_empty()
            || !self.legacy_config_files.is_empty()
            || self.manifest.has_key("eslintConfig")
            || self.manifest.has_key("prettier")
    }
}
