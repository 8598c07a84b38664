//! Package manager profiles and detection.
//!
//! Detection follows a fixed order of authority:
//! 1. `packageManager` declared in the project's own `package.json`
//! 2. `packageManager` declared in the nearest ancestor `package.json`
//! 3. the nearest lockfile (pnpm, then yarn, then bun at the same level)
//! 4. npm

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::fs_utils::find_config_file;
use crate::manifest::Manifest;

/// Lockfiles searched upward from the project root, in priority order.
pub const LOCKFILE_PRIORITY: [(&str, PackageManager); 4] = [
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "npm" => Ok(PackageManager::Npm),
            "pnpm" => Ok(PackageManager::Pnpm),
            "yarn" => Ok(PackageManager::Yarn),
            "bun" => Ok(PackageManager::Bun),
            _ => Err(format!("Unknown package manager: {}", s)),
        }
    }
}

impl PackageManager {
    pub fn id(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// `<pm> add -D -E <package>@<version>`
    pub fn install_command(&self, package: &str, version: &str) -> String {
        let verb = match self {
            PackageManager::Npm => "install",
            _ => "add",
        };
        format!("{} {} -D -E {}@{}", self.id(), verb, package, version)
    }

    pub fn uninstall_command(&self, packages: &[String]) -> String {
        let verb = match self {
            PackageManager::Npm => "uninstall",
            _ => "remove",
        };
        format!("{} {} {}", self.id(), verb, packages.join(" "))
    }

    /// How a locally installed binary is executed.
    fn exec_prefix(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npx",
            PackageManager::Pnpm => "pnpm exec",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bunx",
        }
    }

    pub fn lint_command(&self) -> String {
        format!("{} biome check .", self.exec_prefix())
    }

    pub fn lint_fix_command(&self) -> String {
        format!("{} biome check --write .", self.exec_prefix())
    }
}

/// Parse a `packageManager` declaration such as `pnpm@9.0.0+sha512.abc`.
pub fn parse_declaration(raw: &str) -> Option<PackageManager> {
    let name = raw.split('@').next()?.trim();
    name.parse().ok()
}

/// Which rule selected the package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    Declared,
    AncestorDeclared,
    Lockfile,
    Default,
}

impl fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionSource::Declared => write!(f, "packageManager field"),
            DetectionSource::AncestorDeclared => write!(f, "ancestor packageManager field"),
            DetectionSource::Lockfile => write!(f, "lockfile"),
            DetectionSource::Default => write!(f, "default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub manager: PackageManager,
    pub source: DetectionSource,
    /// The lockfile that decided, when `source` is `Lockfile`
    pub lockfile: Option<PathBuf>,
}

/// Detect the package manager for the project owning `manifest`.
pub fn detect_package_manager(manifest: &Manifest) -> Detection {
    let project_root = manifest.directory();

    if let Some(manager) = manifest.package_manager_field().and_then(parse_declaration) {
        debug!("package manager {} declared in {}", manager, manifest.path().display());
        return Detection {
            manager,
            source: DetectionSource::Declared,
            lockfile: None,
        };
    }

    if let Some(ancestor) = Manifest::nearest_ancestor(project_root) {
        if let Some(manager) = ancestor.package_manager_field().and_then(parse_declaration) {
            debug!("package manager {} declared in {}", manager, ancestor.path().display());
            return Detection {
                manager,
                source: DetectionSource::AncestorDeclared,
                lockfile: None,
            };
        }
    }

    let names: Vec<&str> = LOCKFILE_PRIORITY.iter().map(|(name, _)| *name).collect();
    if let Some(found) = find_config_file(project_root, &names) {
        let manager = LOCKFILE_PRIORITY
            .iter()
            .find(|(name, _)| *name == found.matched_name)
            .map(|(_, manager)| *manager)
            .unwrap_or(PackageManager::Npm);
        debug!("package manager {} inferred from {}", manager, found.path.display());
        return Detection {
            manager,
            source: DetectionSource::Lockfile,
            lockfile: Some(found.path),
        };
    }

    Detection {
        manager: PackageManager::Npm,
        source: DetectionSource::Default,
        lockfile: None,
    }
}
