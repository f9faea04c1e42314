use anyhow::Context;
use camino::Utf8Path;
use repoguard_domain::model::DocumentKind;
use repoguard_types::DocPath;
use walkdir::WalkDir;

/// Discover candidate documents in `dir` for the given family.
///
/// The listing is non-recursive and sorted by file name; subdirectories are
/// ignored. A missing or unreadable directory is an error (the caller aborts
/// the run), while a present-but-empty directory yields an empty list.
pub fn scan_documents(dir: &Utf8Path, kind: DocumentKind) -> anyhow::Result<Vec<DocPath>> {
    if !dir.is_dir() {
        anyhow::bail!("{} directory not found: {}", kind.as_str(), dir);
    }

    let extensions: &[&str] = match kind {
        DocumentKind::Ruleset => &["json"],
        DocumentKind::Workflow => &["yml", "yaml"],
    };

    let mut out: Vec<DocPath> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("list {}", dir))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        let matches = name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| extensions.contains(&ext));
        if matches {
            out.push(DocPath::new(name));
        }
    }

    out.sort();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn write_file(path: &Utf8Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    #[test]
    fn scan_lists_matching_files_sorted() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        write_file(&root.join("release.yml"), "name: release\n");
        write_file(&root.join("ci.yaml"), "name: ci\n");
        write_file(&root.join("notes.md"), "not a workflow\n");
        write_file(&root.join("nested/deep.yml"), "name: deep\n");

        let found = scan_documents(&root, DocumentKind::Workflow).expect("scan");
        let names: Vec<&str> = found.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["ci.yaml", "release.yml"]);
    }

    #[test]
    fn scan_filters_by_family_extension() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        write_file(&root.join("main.json"), "{}");
        write_file(&root.join("ci.yml"), "name: ci\n");

        let rulesets = scan_documents(&root, DocumentKind::Ruleset).expect("scan");
        assert_eq!(rulesets.len(), 1);
        assert_eq!(rulesets[0].as_str(), "main.json");
    }

    #[test]
    fn scan_empty_directory_is_ok() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        let found = scan_documents(&root, DocumentKind::Ruleset).expect("scan");
        assert!(found.is_empty());
    }

    #[test]
    fn scan_missing_directory_is_an_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        let err = scan_documents(&root.join("rulesets"), DocumentKind::Ruleset).unwrap_err();
        assert!(err.to_string().contains("directory not found"));
    }
}
