//! Expansion of command-line paths into the list of files to search.

use camino::{Utf8Path, Utf8PathBuf};
use shapeseek_core::SupportedLanguage;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into.
const SKIPPED_DIRECTORIES: &[&str] = &[
    "node_modules",
    "target",
    "dist",
    "build",
    "__pycache__",
    "venv",
];

/// Expands `paths` into files handled by `language`.
///
/// Files named explicitly are always kept, whatever their extension, so a
/// missing or unreadable path surfaces as a per-file error during the
/// search. Directories are walked recursively in file-name order, skipping
/// hidden entries and common build or dependency folders, and only files
/// whose extension belongs to `language` are kept.
pub(crate) fn collect_files(
    paths: &[Utf8PathBuf],
    language: SupportedLanguage,
) -> Vec<Utf8PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk_directory(path, language, &mut files);
        } else {
            files.push(path.clone());
        }
    }
    debug!(count = files.len(), %language, "collected files");
    files
}

fn walk_directory(root: &Utf8Path, language: SupportedLanguage, files: &mut Vec<Utf8PathBuf>) {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry));
    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "walk error");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        match Utf8PathBuf::from_path_buf(entry.into_path()) {
            Ok(path) if language.handles(&path) => files.push(path),
            Ok(_) => {}
            Err(path) => warn!(path = %path.display(), "skipping non UTF-8 path"),
        }
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.')
        || (entry.file_type().is_dir() && SKIPPED_DIRECTORIES.contains(&name.as_ref()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn tree() -> TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        for (name, contents) in [
            ("src/b.ts", "b();"),
            ("src/a.tsx", "<A />;"),
            ("src/notes.md", "# notes"),
            ("src/tool.py", "print(1)"),
            ("node_modules/lib/index.js", "lib();"),
            (".cache/stale.ts", "stale();"),
        ] {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
            fs::write(path, contents).expect("write");
        }
        dir
    }

    fn root(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir")
    }

    fn relative(files: &[Utf8PathBuf], base: &Utf8Path) -> Vec<String> {
        files
            .iter()
            .map(|file| file.strip_prefix(base).expect("under base").to_string())
            .collect()
    }

    #[rstest]
    fn walks_directories_for_the_selected_language(tree: TempDir) {
        let base = root(&tree);
        let files = collect_files(&[base.clone()], SupportedLanguage::TypeScript);
        assert_eq!(relative(&files, &base), ["src/a.tsx", "src/b.ts"]);
    }

    #[rstest]
    fn other_languages_pick_their_own_extensions(tree: TempDir) {
        let base = root(&tree);
        let files = collect_files(&[base.clone()], SupportedLanguage::Python);
        assert_eq!(relative(&files, &base), ["src/tool.py"]);
    }

    #[rstest]
    fn explicit_files_are_kept_regardless_of_extension(tree: TempDir) {
        let base = root(&tree);
        let notes = base.join("src/notes.md");
        let missing = base.join("missing.ts");
        let files = collect_files(
            &[notes.clone(), missing.clone()],
            SupportedLanguage::TypeScript,
        );
        assert_eq!(files, [notes, missing]);
    }
}
