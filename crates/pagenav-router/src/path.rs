//! Path utilities turning page file locations into URL paths
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.

use std::path::Path;

use crate::error::{Result, RouterError};

/// Derives the URL path of a page from its location under the pages root
///
/// **Pure function**: the filesystem is never touched.
///
/// The page's containing directory, relative to `root_dir`, is split into
/// segments and joined with `/`. A page directly inside the root yields the
/// empty string (the site root). Segments are taken as they are: case, dots
/// in names and similar details are left to the caller. Directory names that
/// are not valid UTF-8 are converted lossily (invalid bytes become U+FFFD),
/// so two such directories can yield the same URL path.
///
/// # Examples
///
/// ```
/// use pagenav_router::derive_url_path;
/// use std::path::Path;
///
/// let root = Path::new("app");
/// assert_eq!(derive_url_path(Path::new("app/page.py"), root).unwrap(), "");
/// assert_eq!(derive_url_path(Path::new("app/admin/page.py"), root).unwrap(), "admin");
/// assert_eq!(
///     derive_url_path(Path::new("app/dashboard/settings/page.py"), root).unwrap(),
///     "dashboard/settings"
/// );
/// ```
///
/// # Errors
///
/// [`RouterError::OutsideRoot`] when `page_file` is not below `root_dir`.
pub fn derive_url_path(page_file: &Path, root_dir: &Path) -> Result<String> {
    let relative = page_file
        .strip_prefix(root_dir)
        .map_err(|_| RouterError::OutsideRoot {
            path: page_file.to_path_buf(),
            root: root_dir.to_path_buf(),
        })?;

    let segments: Vec<String> = relative
        .parent()
        .map(|dir| {
            dir.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();

    Ok(segments.join("/"))
}

/// Splits a URL path into its non-empty segments
///
/// The root path `""` has no segments.
///
/// ```
/// use pagenav_router::path::segments;
///
/// assert_eq!(segments("").count(), 0);
/// assert_eq!(segments("dashboard/settings").collect::<Vec<_>>(), vec!["dashboard", "settings"]);
/// ```
pub fn segments(url_path: &str) -> impl Iterator<Item = &str> {
    url_path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_root_page_is_empty() {
        let root = PathBuf::from("/srv/site/app");
        assert_eq!(derive_url_path(&root.join("page.py"), &root).unwrap(), "");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_segments_are_lossy() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = PathBuf::from("app");
        let first = root.join(OsStr::from_bytes(b"a\xff")).join("page.py");
        let second = root.join(OsStr::from_bytes(b"a\xfe")).join("page.py");
        assert_eq!(derive_url_path(&first, &root).unwrap(), "a\u{fffd}");
        assert_eq!(
            derive_url_path(&first, &root).unwrap(),
            derive_url_path(&second, &root).unwrap()
        );
    }

    #[test]
    fn test_nested_segments_are_joined() {
        let root = PathBuf::from("app");
        let page = root.join("a").join("b").join("page.py");
        assert_eq!(derive_url_path(&page, &root).unwrap(), "a/b");
    }

    #[test]
    fn test_segments_are_not_normalized() {
        let root = PathBuf::from("app");
        let page = root.join("Admin.Tools").join("page.py");
        assert_eq!(derive_url_path(&page, &root).unwrap(), "Admin.Tools");
    }

    #[test]
    fn test_outside_root_is_an_error() {
        let err = derive_url_path(Path::new("other/page.py"), Path::new("app")).unwrap_err();
        assert!(matches!(err, RouterError::OutsideRoot { .. }));
    }
}
