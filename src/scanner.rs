use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;
use crate::types::Document;

/// Filter an explicit changed-file list down to existing markdown files.
/// Paths are taken as given (PR tooling hands them over relative to the
/// working directory).
pub fn find_changed(files: &[String]) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|f| f.ends_with(".md"))
        .map(PathBuf::from)
        .filter(|p| p.exists())
        .collect()
}

/// Enumerate every markdown file under `root`, sorted for deterministic
/// scan order. Applies the config's include/exclude filters against the
/// root-relative path.
pub fn find_documents(root: &Path, config: &Config) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
        .map(|e| e.path().to_path_buf())
        .filter(|p| {
            let relative = p.strip_prefix(root).unwrap_or(p);
            config.should_scan(&relative.to_string_lossy())
        })
        .collect();
    paths.sort();
    paths
}

/// Read documents into memory. Unreadable files are skipped with a note on
/// stderr; a single bad file never aborts the scan, and a skipped document
/// is simply absent from all reports.
pub fn load_documents(paths: &[PathBuf]) -> Vec<Document> {
    let mut docs = Vec::with_capacity(paths.len());
    for path in paths {
        match std::fs::read_to_string(path) {
            Ok(content) => docs.push(Document::new(path.clone(), &content)),
            Err(e) => eprintln!("warning: skipping {}: {e}", path.display()),
        }
    }
    docs
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn find_documents_is_sorted_and_markdown_only() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("sub")).unwrap();
        std::fs::write(root.join("b.md"), "b").unwrap();
        std::fs::write(root.join("a.md"), "a").unwrap();
        std::fs::write(root.join("notes.txt"), "skip").unwrap();
        std::fs::write(root.join("sub/c.md"), "c").unwrap();

        let config = Config::load(root).unwrap();
        let paths = find_documents(root, &config);
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md", "sub/c.md"]);
    }

    #[test]
    fn find_changed_keeps_only_existing_markdown() {
        let tmp = tempfile::tempdir().unwrap();
        let real = tmp.path().join("real.md");
        std::fs::write(&real, "x").unwrap();

        let input = vec![
            real.to_string_lossy().into_owned(),
            tmp.path().join("missing.md").to_string_lossy().into_owned(),
            tmp.path().join("not_markdown.rs").to_string_lossy().into_owned(),
        ];
        let found = find_changed(&input);
        assert_eq!(found, vec![real]);
    }

    #[test]
    fn load_documents_skips_unreadable_files() {
        let tmp = tempfile::tempdir().unwrap();
        let good = tmp.path().join("good.md");
        std::fs::write(&good, "line one\nline two").unwrap();
        let missing = tmp.path().join("gone.md");

        let docs = load_documents(&[good, missing]);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs.first().map(|d| d.lines.len()), Some(2));
    }
}
