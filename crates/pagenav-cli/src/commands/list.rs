use anyhow::Result;
use colored::Colorize;
use pagenav_router::{Navigation, RouteEntry};

use crate::SourceArgs;

pub fn execute(source: &SourceArgs) -> Result<()> {
    let (router, app_dir) = super::load_router(source)?;

    println!("{}", "Discovering pages...".green().bold());
    println!("  {} Pages: {}", "📂".cyan(), app_dir.display());
    println!();

    let navigation = super::build(&router, &app_dir)?;
    print_navigation(&navigation);

    Ok(())
}

/// Prints one aligned line per route, default route marked
pub fn print_navigation(navigation: &Navigation) {
    if navigation.is_empty() {
        println!("  {} No pages found", "ℹ".cyan());
        return;
    }

    let width = navigation
        .iter()
        .map(|entry| route_label(entry).chars().count())
        .max()
        .unwrap_or(0);

    for entry in navigation {
        let label = format!("{:<width$}", route_label(entry));
        if entry.is_default {
            println!("  {}  {} {}", label.cyan(), entry.title.bold(), "(default)".dimmed());
        } else {
            println!("  {}  {}", label.cyan(), entry.title);
        }
    }

    println!();
    println!("{} {} routes", "✓".green(), navigation.len());
}

/// Route as shown in listings: `@/` followed by the URL path
pub fn route_label(entry: &RouteEntry) -> String {
    format!("@/{}", entry.url_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_route_label() {
        let mut entry = RouteEntry {
            url_path: String::new(),
            title: "Home".to_string(),
            is_default: true,
            source: PathBuf::from("app/page.py"),
        };
        assert_eq!(route_label(&entry), "@/");

        entry.url_path = "dashboard/settings".to_string();
        assert_eq!(route_label(&entry), "@/dashboard/settings");
    }
}
