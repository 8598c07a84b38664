//! Command-line surface: argument definitions and subcommand dispatch.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::biome_config::DEFAULT_BIOME_VERSION;
use crate::config::BiomifyConfig;
use crate::detect::{ProjectArchetype, ProjectEnvironment};
use crate::migrate::{
    ConfigOutcome, MigrateOptions, Migration, MigrationSummary, planned_commands,
};
use crate::package_manager::Detection;
use crate::process::ShellRunner;
use crate::progress::{Progress, format_count};
use crate::prompt::{FixedPrompter, Prompter, interactive_or_default};
use crate::scrub::{ScrubReport, scrub};

#[derive(Parser, Debug)]
#[command(name = "biomify")]
#[command(about = "Migrate a JavaScript/TypeScript project from ESLint and Prettier to Biome")]
#[command(version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full migration
    Init(InitArgs),
    /// Show what biomify detects about a project
    Detect {
        /// Project directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },
    /// Only remove eslint directive comments from source files
    Scrub {
        /// Directory to scrub (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
    /// Answer yes to every question
    #[arg(short, long)]
    pub yes: bool,
    /// Keep ESLint/Prettier packages and configuration
    #[arg(long)]
    pub keep_legacy: bool,
    /// Keep eslint directive comments in source files
    #[arg(long)]
    pub keep_comments: bool,
    /// Do not run package-manager commands
    #[arg(long)]
    pub skip_install: bool,
    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl InitArgs {
    pub fn options(&self) -> MigrateOptions {
        MigrateOptions {
            remove_legacy: self.keep_legacy.then_some(false),
            strip_comments: self.keep_comments.then_some(false),
            skip_install: self.skip_install,
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init(args) => run_init(&args),
        Commands::Detect { path, json } => run_detect(&path, json),
        Commands::Scrub { path, json } => run_scrub(&path, json),
    }
}

fn run_init(args: &InitArgs) -> Result<()> {
    let prompter: Box<dyn Prompter> = if args.yes {
        Box::new(FixedPrompter(true))
    } else {
        interactive_or_default()
    };
    let progress = Progress::new(!args.json);

    let summary = Migration::new(&ShellRunner, prompter.as_ref(), progress)
        .run(&args.path, &args.options())?;

    if args.json {
        print_json(&summary)
    } else {
        print_summary(&summary);
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct DetectReport {
    pub project_root: PathBuf,
    pub package_manager: Detection,
    pub archetype: ProjectArchetype,
    pub typescript: bool,
    pub legacy_packages: Vec<String>,
    pub legacy_config_files: Vec<PathBuf>,
    pub legacy_manifest_keys: Vec<&'static str>,
    pub biome_version: String,
    pub commands: PlannedCommands,
}

#[derive(Debug, Serialize)]
pub struct PlannedCommands {
    /// What `init` would run, in order
    pub migration: Vec<String>,
    pub lint: String,
}

impl DetectReport {
    pub fn from_environment(env: &ProjectEnvironment, config: &BiomifyConfig) -> Self {
        let manager = env.package_manager.manager;
        let root = env.project_root();
        Self {
            project_root: root.to_path_buf(),
            package_manager: env.package_manager.clone(),
            archetype: env.archetype,
            typescript: env.typescript,
            legacy_packages: env.legacy_packages.clone(),
            legacy_config_files: env
                .legacy_config_files
                .iter()
                .map(|path| path.strip_prefix(root).unwrap_or(path).to_path_buf())
                .collect(),
            legacy_manifest_keys: crate::manifest::LEGACY_CONFIG_KEYS
                .into_iter()
                .filter(|key| env.manifest.has_key(key))
                .collect(),
            biome_version: config.biome_version.clone(),
            commands: PlannedCommands {
                migration: planned_commands(
                    manager,
                    &env.legacy_packages,
                    &config.biome_version,
                ),
                lint: manager.lint_command(),
            },
        }
    }
}

fn run_detect(path: &Path, json: bool) -> Result<()> {
    let env = ProjectEnvironment::probe(path)?;
    let config = BiomifyConfig::load(env.project_root());
    let report = DetectReport::from_environment(&env, &config);

    if json {
        return print_json(&report);
    }

    println!("Project:          {}", report.project_root.display());
    println!(
        "Package manager:  {} ({})",
        report.package_manager.manager, report.package_manager.source
    );
    if let Some(lockfile) = &report.package_manager.lockfile {
        println!("Lockfile:         {}", lockfile.display());
    }
    println!("Archetype:        {}", report.archetype);
    println!(
        "Language:         {}",
        if report.typescript { "TypeScript" } else { "JavaScript" }
    );
    if report.legacy_packages.is_empty() {
        println!("Legacy packages:  none");
    } else {
        println!("Legacy packages:  {}", report.legacy_packages.join(", "));
    }
    for file in &report.legacy_config_files {
        println!("Legacy config:    {}", file.display());
    }
    for key in &report.legacy_manifest_keys {
        println!("Legacy key:       package.json#{}", key);
    }
    if report.biome_version != DEFAULT_BIOME_VERSION {
        println!("Biome version:    {} (from .biomify.toml)", report.biome_version);
    }
    for command in &report.commands.migration {
        println!("Would run:        {}", command);
    }
    println!("Lint:             {}", report.commands.lint);
    Ok(())
}

fn run_scrub(path: &Path, json: bool) -> Result<()> {
    let progress = Progress::new(!json);
    let spinner = progress.spinner("Removing eslint directive comments");
    let result = scrub(path);
    spinner.finish_clear();
    let report = result?;

    if json {
        return print_json(&report);
    }
    print_scrub_report(&report, path);
    Ok(())
}

fn print_scrub_report(report: &ScrubReport, root: &Path) {
    for file in &report.modified_files {
        println!("  {}", file.strip_prefix(root).unwrap_or(file).display());
    }
    println!(
        "Removed {} from {} ({} scanned)",
        format_count(report.directives_removed, "directive", "directives"),
        format_count(report.files_modified, "file", "files"),
        report.files_scanned
    );
}

fn print_summary(summary: &MigrationSummary) {
    println!();
    println!("Migrated {} to Biome {}", summary.project_root.display(), summary.biome_version);
    if !summary.removed_packages.is_empty() {
        println!("  removed packages:  {}", summary.removed_packages.join(", "));
    }
    if !summary.removed_manifest_keys.is_empty() {
        println!("  removed keys:      {}", summary.removed_manifest_keys.join(", "));
    }
    for file in &summary.removed_config_files {
        println!("  deleted:           {}", file.display());
    }
    match &summary.config {
        ConfigOutcome::Created(path) => println!("  created:           {}", path.display()),
        ConfigOutcome::AlreadyPresent(path) => {
            println!("  kept:              {}", path.display())
        }
    }
    for script in &summary.scripts {
        println!("  script {:<11} {}", format!("{}:", script.name), script.command);
    }
    if let Some(report) = &summary.scrub {
        println!(
            "  directives:        {} removed in {}",
            report.directives_removed,
            format_count(report.files_modified, "file", "files")
        );
    }
    for command in &summary.commands_skipped {
        println!("  skipped:           {}", command);
    }
    println!();
    println!(
        "Next: run `{}` to check the project.",
        summary.package_manager.manager.lint_command()
    );
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{}", rendered);
    Ok(())
}
