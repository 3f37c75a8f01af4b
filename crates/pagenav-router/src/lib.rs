//! # pagenav router
//!
//! Folder-based page discovery for Python UI apps, in the style of Next.js'
//! app router:
//! - Every directory holding a `page.py` is a route
//! - Directory nesting encodes the URL (`app/dashboard/settings/page.py` → `dashboard/settings`)
//! - The page directly in the root is the default route (`""`)
//! - Each page's navigation title is the first argument of its first `st.title(...)` call
//!
//! ## Static title extraction
//!
//! Titles are read from the page's Python syntax tree; page files are never
//! executed. Pages without a literal title, and pages that fail to parse, get
//! the fallback title `"Page"`.
//!
//! ## Ordering
//!
//! Discovery walks depth-first in lexical file-name order. A built
//! [`Navigation`] is sorted by URL segments, so the default route comes first
//! and children follow their parent. Both orders are stable across builds of
//! an unchanged tree.
//!
//! ## Example
//!
//! ```no_run
//! use pagenav_router::build_navigation;
//! use std::path::Path;
//!
//! let navigation = build_navigation(Path::new("app")).unwrap();
//! for entry in &navigation {
//!     println!("@/{} -> {}", entry.url_path, entry.title);
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
mod discover;
pub mod error;
pub mod path;
mod title;

pub use config::{Config, RoutingConfig, TitleConfig};
pub use discover::PageFile;
pub use error::{Result, RouterError};
pub use path::derive_url_path;
pub use title::title_from_source;

// ============================================================================
// Core Types
// ============================================================================

/// One navigable page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Slash-joined directory segments below the root, `""` for the root page
    pub url_path: String,
    /// Label shown in the navigation menu
    pub title: String,
    /// Whether this is the root page
    pub is_default: bool,
    /// Page file the route was derived from
    pub source: PathBuf,
}

impl RouteEntry {
    /// URL path segments, empty for the default route
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        path::segments(&self.url_path)
    }
}

/// Ordered routes produced by one navigation build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Navigation {
    entries: Vec<RouteEntry>,
}

impl Navigation {
    /// Builds a navigation from entries, sorting them by URL segments
    ///
    /// The sort is stable: entries sharing a URL path keep their input order.
    pub fn new(mut entries: Vec<RouteEntry>) -> Self {
        entries.sort_by(|a, b| a.segments().cmp(b.segments()));
        Self { entries }
    }

    /// The root page, if the tree has one
    pub fn default_entry(&self) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.is_default)
    }

    /// Looks up a route by its URL path
    pub fn get(&self, url_path: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.url_path == url_path)
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Navigation {
    type Item = RouteEntry;
    type IntoIter = std::vec::IntoIter<RouteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Navigation {
    type Item = &'a RouteEntry;
    type IntoIter = std::slice::Iter<'a, RouteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// Router
// ============================================================================

/// Stateless page router carrying discovery and title settings
///
/// Every call rescans the filesystem; nothing is cached between builds.
#[derive(Debug, Clone, Default)]
pub struct PageRouter {
    config: Config,
}

impl PageRouter {
    /// Creates a router with default settings (`page.py`, `st.title`, `"Page"`)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Pages root from the configuration
    pub fn app_dir(&self) -> &Path {
        Path::new(&self.config.routing.app_dir)
    }

    /// Finds every page file below `root_dir`
    pub fn discover_pages(&self, root_dir: &Path) -> Result<Vec<PageFile>> {
        discover::discover_pages(root_dir, &self.config.routing)
    }

    /// Reads a page's navigation title without executing it
    pub fn extract_title(&self, page_file: &Path) -> Result<String> {
        title::extract_title(page_file, &self.config.title)
    }

    /// Discovers pages and derives one [`RouteEntry`] per page
    ///
    /// # Errors
    ///
    /// Fails on a missing root or an unreadable page file; a page whose
    /// source does not parse only falls back to the default title.
    pub fn build_navigation(&self, root_dir: &Path) -> Result<Navigation> {
        let pages = self.discover_pages(root_dir)?;

        let entries = pages
            .into_iter()
            .map(|page| -> Result<RouteEntry> {
                let url_path = derive_url_path(page.path(), root_dir)?;
                let title = self.extract_title(page.path())?;
                debug!("Route @/{} -> {:?} ({})", url_path, title, page.path().display());

                Ok(RouteEntry {
                    is_default: url_path.is_empty(),
                    url_path,
                    title,
                    source: page.into_path(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!("Built navigation with {} routes from {}", entries.len(), root_dir.display());
        Ok(Navigation::new(entries))
    }
}

// ============================================================================
// Default-configured operations
// ============================================================================

/// Finds every `page.py` below `root_dir`
pub fn discover_pages(root_dir: &Path) -> Result<Vec<PageFile>> {
    PageRouter::new().discover_pages(root_dir)
}

/// Reads the first literal `st.title(...)` argument of a page, or `"Page"`
pub fn extract_title(page_file: &Path) -> Result<String> {
    PageRouter::new().extract_title(page_file)
}

/// Builds the navigation for the page tree at `root_dir` with default settings
pub fn build_navigation(root_dir: &Path) -> Result<Navigation> {
    PageRouter::new().build_navigation(root_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url_path: &str) -> RouteEntry {
        RouteEntry {
            url_path: url_path.to_string(),
            title: "Page".to_string(),
            is_default: url_path.is_empty(),
            source: PathBuf::from(url_path).join("page.py"),
        }
    }

    #[test]
    fn test_navigation_orders_by_segments() {
        let nav = Navigation::new(vec![
            entry("dashboard/settings"),
            entry("dashboard-old"),
            entry("admin"),
            entry(""),
            entry("dashboard"),
        ]);
        let order: Vec<_> = nav.iter().map(|e| e.url_path.as_str()).collect();
        assert_eq!(
            order,
            vec!["", "admin", "dashboard", "dashboard/settings", "dashboard-old"]
        );
    }

    #[test]
    fn test_navigation_lookups() {
        let nav = Navigation::new(vec![entry("admin"), entry("")]);
        assert_eq!(nav.default_entry().map(|e| e.url_path.as_str()), Some(""));
        assert!(nav.get("admin").is_some());
        assert!(nav.get("missing").is_none());
        assert_eq!(nav.len(), 2);
    }

    #[test]
    fn test_app_dir_follows_config() {
        assert_eq!(PageRouter::new().app_dir(), Path::new("app"));

        let mut config = Config::default();
        config.routing.app_dir = "src/pages".to_string();
        assert_eq!(PageRouter::with_config(config).app_dir(), Path::new("src/pages"));
    }

    #[test]
    fn test_empty_navigation() {
        let nav = Navigation::default();
        assert!(nav.is_empty());
        assert!(nav.default_entry().is_none());
    }
}
