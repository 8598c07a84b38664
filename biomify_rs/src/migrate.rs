//! The migration itself: probe, ask, clean up, install, configure, scrub, fix.
//!
//! Package-manager commands rewrite `package.json` on their own, so the
//! manifest is re-read after each of them before being edited here.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::biome_config::{self, BIOME_PACKAGE, CONFIG_FILE};
use crate::config::BiomifyConfig;
use crate::detect::{ProjectArchetype, ProjectEnvironment};
use crate::error::{MigrateError, Result};
use crate::manifest::Manifest;
use crate::package_manager::{Detection, PackageManager};
use crate::process::ProcessRunner;
use crate::progress::{Progress, format_count};
use crate::prompt::Prompter;
use crate::scrub::{ScrubReport, scrub};

pub const REMOVE_LEGACY_QUESTION: &str =
    "Remove ESLint/Prettier packages and their configuration?";
pub const STRIP_COMMENTS_QUESTION: &str = "Remove eslint directive comments from source files?";

/// Caller choices. `None` answers are taken from `.biomify.toml` or asked.
#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    pub remove_legacy: Option<bool>,
    pub strip_comments: Option<bool>,
    /// Do not run any package-manager command
    pub skip_install: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "snake_case")]
pub enum ConfigOutcome {
    Created(PathBuf),
    AlreadyPresent(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptUpdate {
    pub name: String,
    pub command: String,
}

/// What a migration did, for the final report.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationSummary {
    pub project_root: PathBuf,
    pub package_manager: Detection,
    pub archetype: ProjectArchetype,
    pub typescript: bool,
    pub biome_version: String,
    pub removed_packages: Vec<String>,
    pub removed_manifest_keys: Vec<String>,
    pub removed_config_files: Vec<PathBuf>,
    pub config: ConfigOutcome,
    pub scripts: Vec<ScriptUpdate>,
    pub scrub: Option<ScrubReport>,
    pub commands_run: Vec<String>,
    pub commands_skipped: Vec<String>,
}

/// `package.json` scripts for the project. Only TypeScript usage matters here.
pub fn lint_scripts(typescript: bool) -> Vec<ScriptUpdate> {
    let script = |name: &str, command: &str| ScriptUpdate {
        name: name.to_string(),
        command: command.to_string(),
    };
    if typescript {
        vec![
            script("lint", "tsc --noEmit && biome check ."),
            script("lint:fix", "biome check --write ."),
            script("type-check", "tsc --noEmit"),
        ]
    } else {
        vec![
            script("lint", "biome check ."),
            script("lint:fix", "biome check --write ."),
        ]
    }
}

pub struct Migration<'a> {
    runner: &'a dyn ProcessRunner,
    prompter: &'a dyn Prompter,
    progress: Progress,
    commands_run: Vec<String>,
    commands_skipped: Vec<String>,
    skip_install: bool,
}

impl<'a> Migration<'a> {
    pub fn new(
        runner: &'a dyn ProcessRunner,
        prompter: &'a dyn Prompter,
        progress: Progress,
    ) -> Self {
        Self {
            runner,
            prompter,
            progress,
            commands_run: Vec::new(),
            commands_skipped: Vec::new(),
            skip_install: false,
        }
    }

    /// Migrate the project owning the nearest `package.json` at or above `start`.
    pub fn run(mut self, start: &Path, options: &MigrateOptions) -> Result<MigrationSummary> {
        self.skip_install = options.skip_install;

        let env = ProjectEnvironment::probe(start)?;
        let root = env.project_root().to_path_buf();
        let config = BiomifyConfig::load(&root);
        let manager = env.package_manager.manager;

        self.progress.info(&format!(
            "{} project, {}{} (package manager: {}, from {})",
            env.archetype,
            if env.typescript { "TypeScript" } else { "JavaScript" },
            if env.legacy_packages.is_empty() {
                String::new()
            } else {
                format!(
                    ", {}",
                    format_count(env.legacy_packages.len(), "legacy package", "legacy packages")
                )
            },
            manager,
            env.package_manager.source,
        ));

        let remove_legacy = if env.has_legacy_tooling() {
            self.decide(
                options.remove_legacy.or(config.defaults.remove_legacy),
                REMOVE_LEGACY_QUESTION,
            )?
        } else {
            false
        };
        let strip_comments = self.decide(
            options.strip_comments.or(config.defaults.strip_comments),
            STRIP_COMMENTS_QUESTION,
        )?;

        let mut removed_packages = Vec::new();
        let mut removed_manifest_keys = Vec::new();
        let mut removed_config_files = Vec::new();
        if remove_legacy {
            if !env.legacy_packages.is_empty() {
                self.progress.step("Removing ESLint/Prettier packages");
                self.external(&manager.uninstall_command(&env.legacy_packages), &root)?;
                removed_packages = env.legacy_packages.clone();
            }

            let mut manifest = Manifest::load(env.manifest.path())?;
            removed_manifest_keys = manifest
                .remove_legacy_config_keys()
                .into_iter()
                .map(str::to_string)
                .collect();
            if !removed_manifest_keys.is_empty() {
                manifest.save()?;
            }

            for path in &env.legacy_config_files {
                std::fs::remove_file(path).map_err(|e| MigrateError::io(path, e))?;
                debug!("deleted {}", path.display());
                removed_config_files.push(path.strip_prefix(&root).unwrap_or(path).to_path_buf());
            }
        }

        self.progress.step(&format!("Installing {}@{}", BIOME_PACKAGE, config.biome_version));
        self.external(&manager.install_command(BIOME_PACKAGE, &config.biome_version), &root)?;

        let config_outcome = write_biome_config(&root, env.archetype, &config.biome_version)?;
        match &config_outcome {
            ConfigOutcome::Created(path) => {
                self.progress.success(&format!("Created {}", path.display()))
            }
            ConfigOutcome::AlreadyPresent(path) => self
                .progress
                .warning(&format!("{} already exists, left unchanged", path.display())),
        }

        let scripts = lint_scripts(env.typescript);
        let mut manifest = Manifest::load(env.manifest.path())?;
        for script in &scripts {
            manifest.set_script(&script.name, &script.command);
        }
        manifest.save()?;
        self.progress.success("Updated package.json scripts");

        let scrub_report = if strip_comments {
            let spinner = self.progress.spinner("Removing eslint directive comments");
            let result = scrub(&root);
            spinner.finish_clear();
            let report = result?;
            self.progress.success(&format!(
                "Removed {} from {}",
                format_count(report.directives_removed, "directive", "directives"),
                format_count(report.files_modified, "file", "files"),
            ));
            Some(report)
        } else {
            None
        };

        self.progress.step("Applying Biome fixes");
        self.external(&manager.lint_fix_command(), &root)?;

        info!("migration of {} finished", root.display());
        Ok(MigrationSummary {
            project_root: root,
            package_manager: env.package_manager,
            archetype: env.archetype,
            typescript: env.typescript,
            biome_version: config.biome_version,
            removed_packages,
            removed_manifest_keys,
            removed_config_files,
            config: config_outcome,
            scripts,
            scrub: scrub_report,
            commands_run: self.commands_run,
            commands_skipped: self.commands_skipped,
        })
    }

    fn decide(&self, preset: Option<bool>, question: &str) -> Result<bool> {
        match preset {
            Some(answer) => Ok(answer),
            None => self.prompter.confirm(question, true),
        }
    }

    fn external(&mut self, command: &str, cwd: &Path) -> Result<()> {
        if self.skip_install {
            debug!("skipping `{}`", command);
            self.commands_skipped.push(command.to_string());
            return Ok(());
        }
        self.runner.run(command, cwd)?;
        self.commands_run.push(command.to_string());
        Ok(())
    }
}

/// Write `biome.json` unless a Biome config already exists.
pub fn write_biome_config(
    project_root: &Path,
    archetype: ProjectArchetype,
    biome_version: &str,
) -> Result<ConfigOutcome> {
    if let Some(existing) = biome_config::existing_config(project_root) {
        return Ok(ConfigOutcome::AlreadyPresent(existing));
    }
    let path = project_root.join(CONFIG_FILE);
    let config = biome_config::synthesize(archetype, biome_version);
    let content = biome_config::render(&config).map_err(|e| {
        MigrateError::io(&path, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;
    std::fs::write(&path, content).map_err(|e| MigrateError::io(&path, e))?;
    Ok(ConfigOutcome::Created(path))
}

/// Commands a migration would run for `manager`, in order, for previews.
pub fn planned_commands(
    manager: PackageManager,
    legacy_packages: &[String],
    biome_version: &str,
) -> Vec<String> {
    let mut commands = Vec::new();
    if !legacy_packages.is_empty() {
        commands.push(manager.uninstall_command(legacy_packages));
    }
    commands.push(manager.install_command(BIOME_PACKAGE, biome_version));
    commands.push(manager.lint_fix_command());
    commands
}
