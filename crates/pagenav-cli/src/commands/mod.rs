pub mod export;
pub mod list;
pub mod watch;

use anyhow::{Context, Result};
use pagenav_router::{Config, Navigation, PageRouter};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::SourceArgs;

/// Loads settings and resolves the pages root, CLI flags winning over the file
pub fn load_router(source: &SourceArgs) -> Result<(PageRouter, PathBuf)> {
    let router = PageRouter::with_config(Config::load(&source.config)?);
    let app_dir = source
        .app_dir
        .clone()
        .unwrap_or_else(|| router.app_dir().to_path_buf());

    debug!("Pages root: {}", app_dir.display());
    Ok((router, app_dir))
}

pub fn build(router: &PageRouter, app_dir: &Path) -> Result<Navigation> {
    router
        .build_navigation(app_dir)
        .with_context(|| format!("Failed to build navigation from {}", app_dir.display()))
}
