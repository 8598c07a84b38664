use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into when walking a project tree.
pub const IGNORED_DIRS: [&str; 10] = [
    "node_modules",
    ".git",
    "dist",
    "build",
    "out",
    ".next",
    ".nuxt",
    "coverage",
    ".vscode",
    ".idea",
];

/// Source extensions the comment scrubber processes.
pub const SOURCE_EXTENSIONS: [&str; 9] = [
    "js", "jsx", "ts", "tsx", "mjs", "cjs", "vue", "svelte", "astro",
];

/// A file located by [`find_config_file`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoundFile {
    /// Directory the file was found in
    pub directory: PathBuf,
    /// Full path to the file
    pub path: PathBuf,
    /// Which of the candidate names matched
    pub matched_name: String,
}

/// Search `start` and then each ancestor for the first of `candidates`.
///
/// All candidates are checked in one directory before moving up, so a
/// lower-priority name in a closer directory beats a higher-priority name
/// further away. The search ends at the filesystem root.
pub fn find_config_file(start: &Path, candidates: &[&str]) -> Option<FoundFile> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        for name in candidates {
            let path = current.join(name);
            if path.is_file() {
                return Some(FoundFile {
                    directory: current.to_path_buf(),
                    path,
                    matched_name: (*name).to_string(),
                });
            }
        }
        dir = current.parent();
    }
    None
}

pub fn is_ignored_dir(name: &str) -> bool {
    IGNORED_DIRS.contains(&name)
}

pub fn matches_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SOURCE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

fn is_walkable(entry: &DirEntry) -> bool {
    // The root itself is always walked, whatever it is called.
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    !is_ignored_dir(&entry.file_name().to_string_lossy())
}

/// Collect source files under `root`, depth-first, in file-name order.
///
/// Ignored directories are pruned, not filtered afterwards, so nothing below
/// them is ever visited.
pub fn gather_source_files(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(is_walkable);

    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && matches_source_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, "").expect("write file");
    }

    #[test]
    fn finds_file_in_start_dir() {
        let tmp = TempDir::new().expect("temp dir");
        touch(&tmp.path().join("package.json"));

        let found = find_config_file(tmp.path(), &["package.json"]).expect("found");
        assert_eq!(found.directory, tmp.path());
        assert_eq!(found.matched_name, "package.json");
    }

    #[test]
    fn ascends_to_parent() {
        let tmp = TempDir::new().expect("temp dir");
        touch(&tmp.path().join("yarn.lock"));
        let nested = tmp.path().join("packages/app/src");
        std::fs::create_dir_all(&nested).expect("mkdir");

        let found = find_config_file(&nested, &["yarn.lock"]).expect("found");
        assert_eq!(found.directory, tmp.path());
    }

    #[test]
    fn closer_directory_beats_candidate_order() {
        let tmp = TempDir::new().expect("temp dir");
        touch(&tmp.path().join("pnpm-lock.yaml"));
        let app = tmp.path().join("app");
        touch(&app.join("yarn.lock"));

        let found = find_config_file(&app, &["pnpm-lock.yaml", "yarn.lock"]).expect("found");
        assert_eq!(found.matched_name, "yarn.lock");
        assert_eq!(found.directory, app);
    }

    #[test]
    fn candidate_order_wins_within_one_level() {
        let tmp = TempDir::new().expect("temp dir");
        touch(&tmp.path().join("pnpm-lock.yaml"));
        touch(&tmp.path().join("yarn.lock"));

        let found =
            find_config_file(tmp.path(), &["pnpm-lock.yaml", "yarn.lock"]).expect("found");
        assert_eq!(found.matched_name, "pnpm-lock.yaml");
    }

    #[test]
    fn directories_are_not_matches() {
        let tmp = TempDir::new().expect("temp dir");
        std::fs::create_dir_all(tmp.path().join("project/package.json")).expect("mkdir");

        let found = find_config_file(&tmp.path().join("project"), &["package.json"]);
        assert!(found.map(|f| f.directory != tmp.path().join("project")).unwrap_or(true));
    }

    #[test]
    fn extension_matching_is_case_insensitive() {
        assert!(matches_source_extension(Path::new("App.TSX")));
        assert!(matches_source_extension(Path::new("Page.svelte")));
        assert!(!matches_source_extension(Path::new("styles.css")));
        assert!(!matches_source_extension(Path::new("Makefile")));
    }

    #[test]
    fn gather_prunes_ignored_dirs_at_any_depth() {
        let tmp = TempDir::new().expect("temp dir");
        touch(&tmp.path().join("src/index.ts"));
        touch(&tmp.path().join("src/deep/nested/util.js"));
        touch(&tmp.path().join("node_modules/pkg/index.js"));
        touch(&tmp.path().join("packages/a/node_modules/x/index.js"));
        touch(&tmp.path().join("packages/a/dist/bundle.js"));
        touch(&tmp.path().join("README.md"));

        let files = gather_source_files(tmp.path()).expect("walk");
        let rel: Vec<String> = files
            .iter()
            .map(|p| {
                p.strip_prefix(tmp.path())
                    .expect("under root")
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();

        assert_eq!(rel, vec!["src/deep/nested/util.js", "src/index.ts"]);
    }

    #[test]
    fn root_named_like_ignored_dir_is_still_walked() {
        let tmp = TempDir::new().expect("temp dir");
        let root = tmp.path().join("build");
        touch(&root.join("main.js"));

        let files = gather_source_files(&root).expect("walk");
        assert_eq!(files.len(), 1);
    }
}
