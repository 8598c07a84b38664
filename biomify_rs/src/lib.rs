//! # biomify
//!
//! **ESLint + Prettier → Biome migration** for JavaScript/TypeScript projects.
//!
//! biomify looks at a project once and then does the mechanical part of the
//! switch: it removes the legacy packages and their configuration, installs
//! Biome with the project's own package manager, writes a `biome.json`
//! matched to the project, rewires the `lint` scripts and strips
//! `eslint-disable` style directive comments that Biome would not honour.
//!
//! ## Features
//!
//! - **Package manager detection** - `packageManager` field (own or ancestor),
//!   then lockfiles, then npm
//! - **Archetype inference** - web-framework projects get CSS-module aware config
//! - **Directive scrubbing** - ordered regex rules, own-line directives take
//!   their whole line with them
//! - **Dry environments** - `--skip-install` runs no external command
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,no_run
//! use biomify::detect::ProjectEnvironment;
//! use std::path::Path;
//!
//! let env = ProjectEnvironment::probe(Path::new(".")).unwrap();
//! println!("{} via {}", env.archetype, env.package_manager.manager);
//! ```
//!
//! ## Stripping directives from text
//!
//! ```rust
//! let (clean, removed) = biomify::scrub::strip_directives(
//!     "// eslint-disable-next-line no-console\nconsole.log(1);\n",
//! );
//! assert_eq!(clean, "console.log(1);\n");
//! assert_eq!(removed, 1);
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! biomify detect             # What would be migrated
//! biomify init               # Interactive migration
//! biomify init -y --json     # Unattended, machine-readable summary
//! biomify scrub src/         # Only remove eslint directive comments
//! ```

// ============================================================================
// Project Inspection
// ============================================================================

/// `package.json` loading, editing and ancestor discovery.
pub mod manifest;

/// Package manager profiles (npm, pnpm, yarn, bun) and detection.
pub mod package_manager;

/// Project environment probing: archetype, TypeScript, legacy tooling.
pub mod detect;

/// Directory walking and marker-file lookup.
pub mod fs_utils;

// ============================================================================
// Migration
// ============================================================================

/// `biome.json` synthesis.
pub mod biome_config;

/// ESLint directive comment removal.
pub mod scrub;

/// The end-to-end migration.
pub mod migrate;

/// External command execution.
pub mod process;

/// Interactive yes/no questions.
pub mod prompt;

// ============================================================================
// Infrastructure
// ============================================================================

/// `.biomify.toml` support.
pub mod config;

/// User-reported errors.
pub mod error;

/// Terminal status lines and spinners.
pub mod progress;

/// Argument parsing and subcommand dispatch for the `biomify` binary.
pub mod cli;

pub use detect::ProjectEnvironment;
pub use error::{MigrateError, Result};
pub use migrate::{MigrateOptions, Migration, MigrationSummary};
pub use package_manager::PackageManager;
