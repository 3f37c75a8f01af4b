//! Page discovery: walks the pages root for page-definition files

use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::RoutingConfig;
use crate::error::{Result, RouterError};

/// A discovered page-definition file
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageFile {
    path: PathBuf,
}

impl PageFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the file, as produced by the walk (root-joined)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directories between `root_dir` and the file, outermost first
    ///
    /// Empty for a page directly inside the root, and for a page that is not
    /// below `root_dir` at all.
    pub fn parent_dirs(&self, root_dir: &Path) -> Vec<&Path> {
        let Ok(relative) = self.path.strip_prefix(root_dir) else {
            return Vec::new();
        };
        let mut dirs: Vec<&Path> = relative
            .ancestors()
            .skip(1)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        dirs.reverse();
        dirs
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for PageFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Finds every page-definition file below `root_dir`
///
/// Walks depth-first, visiting the entries of each directory in lexical
/// file-name order, so repeated scans of an unchanged tree return the same
/// sequence. Only regular files named `routing.page_file` match, including
/// one placed directly in `root_dir`. Entries whose root-relative path matches
/// an `exclude` glob are skipped, and an excluded directory is not descended
/// into.
///
/// # Errors
///
/// - [`RouterError::NotFound`] if `root_dir` is missing or not a directory
/// - [`RouterError::Pattern`] if an exclude glob is invalid
/// - [`RouterError::Walk`] if a directory below the root cannot be read
pub fn discover_pages(root_dir: &Path, routing: &RoutingConfig) -> Result<Vec<PageFile>> {
    if !root_dir.is_dir() {
        return Err(RouterError::NotFound {
            path: root_dir.to_path_buf(),
        });
    }

    let excludes = compile_excludes(&routing.exclude)?;
    let mut pages = Vec::new();

    let walker = WalkDir::new(root_dir)
        .follow_links(routing.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, root_dir, &excludes));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || entry.file_name() != routing.page_file.as_str() {
            continue;
        }

        debug!("Discovered page: {}", entry.path().display());
        pages.push(PageFile::new(entry.into_path()));
    }

    Ok(pages)
}

fn compile_excludes(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|source| RouterError::Pattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

fn is_excluded(entry: &DirEntry, root_dir: &Path, excludes: &[Pattern]) -> bool {
    // The root itself is never excluded
    if entry.depth() == 0 || excludes.is_empty() {
        return false;
    }

    entry
        .path()
        .strip_prefix(root_dir)
        .map(|relative| excludes.iter().any(|p| p.matches_path(relative)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_parent_dirs() {
        let root = Path::new("app");
        let page = PageFile::new("app/dashboard/settings/page.py");
        assert_eq!(
            page.parent_dirs(root),
            vec![Path::new("dashboard"), Path::new("dashboard/settings")]
        );
        assert!(PageFile::new("app/page.py").parent_dirs(root).is_empty());
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_pages(&dir.path().join("app"), &RoutingConfig::default()).unwrap_err();
        assert!(matches!(err, RouterError::NotFound { .. }));
    }

    #[test]
    fn test_file_root_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app");
        fs::write(&file, "").unwrap();
        let err = discover_pages(&file, &RoutingConfig::default()).unwrap_err();
        assert!(matches!(err, RouterError::NotFound { .. }));
    }

    #[test]
    fn test_only_page_files_match() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("page.py"));
        touch(&root.join("admin/page.py"));
        touch(&root.join("admin/helpers.py"));
        touch(&root.join("notes/page.py.bak"));
        // A directory named like the page file is not a page
        fs::create_dir_all(root.join("odd/page.py")).unwrap();

        let pages = discover_pages(root, &RoutingConfig::default()).unwrap();
        let found: Vec<_> = pages.iter().map(|p| p.path().to_path_buf()).collect();
        assert_eq!(found, vec![root.join("admin/page.py"), root.join("page.py")]);
    }

    #[test]
    fn test_empty_tree_has_no_pages() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_pages(dir.path(), &RoutingConfig::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let routing = RoutingConfig {
            exclude: vec!["[".to_string()],
            ..RoutingConfig::default()
        };
        let err = discover_pages(dir.path(), &routing).unwrap_err();
        assert!(matches!(err, RouterError::Pattern { .. }));
    }
}
