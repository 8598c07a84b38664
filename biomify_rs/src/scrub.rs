//! Removal of ESLint directive comments.
//!
//! Each [`DirectiveRule`] targets one comment shape and strips every match,
//! reporting how many it removed. Rules run in the fixed order of
//! [`DIRECTIVE_RULES`], each on the output of the previous one: block
//! comments first, then line comments.
//!
//! A directive that sits on its own line is removed together with its
//! indentation and line break. One that shares a line with code is removed
//! by itself, so `/* eslint-disable */foo()` becomes `foo()` with no
//! separating whitespace. Source is never parsed; a directive-looking
//! comment inside a string literal is stripped as well.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{MigrateError, Result};
use crate::fs_utils::gather_source_files;

/// Remainder of a block comment, up to and including the first `*/`.
const BLOCK_BODY: &str = r"(?:[^*]|\*+[^*/])*\*+/";

/// One match-and-strip transformation.
pub struct DirectiveRule {
    pub name: &'static str,
    regex: Regex,
}

impl DirectiveRule {
    fn block(name: &'static str, keyword: &str) -> Self {
        let comment = format!(r"/\*\s*{keyword}{BLOCK_BODY}");
        Self::compile(
            name,
            &format!(r"(?m)^[ \t]*{comment}[ \t]*(?:\r?\n|\z)|{comment}"),
        )
    }

    fn line(name: &'static str, keyword: &str) -> Self {
        let comment = format!(r"//[ \t]*{keyword}[^\r\n]*");
        Self::compile(
            name,
            &format!(r"(?m)^[ \t]*{comment}(?:\r?\n|\z)|[ \t]*{comment}"),
        )
    }

    fn compile(name: &'static str, pattern: &str) -> Self {
        let regex = Regex::new(pattern).expect("valid directive pattern");
        Self { name, regex }
    }

    /// Strip every match, returning the new text and the match count.
    pub fn apply(&self, text: &str) -> (String, usize) {
        let count = self.regex.find_iter(text).count();
        if count == 0 {
            return (text.to_string(), 0);
        }
        (self.regex.replace_all(text, "").into_owned(), count)
    }
}

const DISABLE: &str = r"eslint-disable(?:-next-line|-line)?\b";
const ENABLE: &str = r"eslint-enable\b";
const ENV: &str = r"eslint-env\b";
const RULE_CONFIG: &str = r"eslint[ \t]+[\w@/-]+[ \t]*:";

/// The rules, in application order.
pub static DIRECTIVE_RULES: Lazy<Vec<DirectiveRule>> = Lazy::new(|| {
    vec![
        DirectiveRule::block("block-disable", DISABLE),
        DirectiveRule::block("block-enable", ENABLE),
        DirectiveRule::block("block-env", ENV),
        DirectiveRule::block("block-rule-config", RULE_CONFIG),
        DirectiveRule::line("line-disable", DISABLE),
        DirectiveRule::line("line-enable", ENABLE),
        DirectiveRule::line("line-env", ENV),
        DirectiveRule::line("line-rule-config", RULE_CONFIG),
    ]
});

/// Run every rule over `text`; returns the result and the total removed.
pub fn strip_directives(text: &str) -> (String, usize) {
    DIRECTIVE_RULES
        .iter()
        .fold((text.to_string(), 0), |(current, total), rule| {
            let (next, count) = rule.apply(&current);
            (next, total + count)
        })
}

/// Counters for one scrub run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScrubReport {
    pub files_scanned: usize,
    pub files_modified: usize,
    pub directives_removed: usize,
    /// Rewritten files, relative to the scrub root
    pub modified_files: Vec<PathBuf>,
}

/// Strip directive comments from every source file under `root`.
///
/// Files without matches are not rewritten. The first read or write failure
/// aborts the run; files already rewritten stay rewritten.
pub fn scrub(root: &Path) -> Result<ScrubReport> {
    let files = gather_source_files(root).map_err(|e| MigrateError::io(root, e))?;
    let mut report = ScrubReport::default();

    for path in files {
        report.files_scanned += 1;

        let bytes = std::fs::read(&path).map_err(|e| MigrateError::io(&path, e))?;
        let Ok(content) = String::from_utf8(bytes) else {
            debug!("skipping non UTF-8 file {}", path.display());
            continue;
        };

        let (stripped, removed) = strip_directives(&content);
        if removed == 0 {
            continue;
        }

        std::fs::write(&path, stripped).map_err(|e| MigrateError::io(&path, e))?;
        debug!("removed {} directive(s) from {}", removed, path.display());

        report.files_modified += 1;
        report.directives_removed += removed;
        report
            .modified_files
            .push(path.strip_prefix(root).unwrap_or(&path).to_path_buf());
    }

    info!(
        "scrubbed {} files: {} modified, {} directives removed",
        report.files_scanned, report.files_modified, report.directives_removed
    );
    Ok(report)
}
