use anyhow::Result;
use colored::Colorize;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use pagenav_router::PageRouter;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::commands::list::print_navigation;

/// Rebuilds the navigation whenever the page tree changes
pub struct NavigationWatcher {
    router: PageRouter,
    app_dir: PathBuf,
    debounce: Duration,
}

impl NavigationWatcher {
    pub fn new(router: PageRouter, app_dir: PathBuf) -> Self {
        Self {
            router,
            app_dir,
            debounce: Duration::from_millis(300),
        }
    }

    /// Watch until the event channel closes
    pub async fn watch(&self) -> Result<()> {
        let (tx, mut rx) = tokio::sync::mpsc::channel(100);

        let app_dir = self.app_dir.clone();
        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                // Creations, edits and deletions all change the navigation
                if matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    for path in event.paths {
                        if is_ignored(&path, &app_dir) {
                            continue;
                        }

                        let _ = tx.blocking_send(path);
                    }
                }
            }
        })?;

        watcher.watch(&self.app_dir, RecursiveMode::Recursive)?;
        println!("  {} Watching: {}", "👀".cyan(), self.app_dir.display());
        println!();

        while let Some(path) = rx.recv().await {
            // Let a burst of saves settle, then rebuild once
            tokio::time::sleep(self.debounce).await;
            while let Ok(extra) = rx.try_recv() {
                debug!("Coalesced change: {}", extra.display());
            }

            println!("{} Page tree changed: {}", "🔄".yellow(), path.display());

            match self.router.build_navigation(&self.app_dir) {
                Ok(navigation) => print_navigation(&navigation),
                Err(e) => eprintln!("{} Failed to rebuild navigation: {}", "❌".red(), e),
            }
            println!();
        }

        Ok(())
    }
}

/// Hidden entries and bytecode caches never affect routes
fn is_ignored(path: &Path, app_dir: &Path) -> bool {
    let relative = path.strip_prefix(app_dir).unwrap_or(path);

    relative.components().any(|component| match component {
        Component::Normal(name) => {
            let name = name.to_string_lossy();
            name.starts_with('.') || name == "__pycache__"
        }
        _ => false,
    })
}
