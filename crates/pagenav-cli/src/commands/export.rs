use anyhow::{Context, Result};
use colored::Colorize;
use pagenav_router::Navigation;
use std::fs;
use std::path::Path;

use crate::SourceArgs;

pub fn execute(source: &SourceArgs, pretty: bool, output: Option<&Path>) -> Result<()> {
    let (router, app_dir) = super::load_router(source)?;
    let navigation = super::build(&router, &app_dir)?;
    let json = render_json(&navigation, pretty)?;

    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "  {} Wrote {} routes to {}",
                "✓".green(),
                navigation.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Serializes the navigation as a JSON array of route objects
pub fn render_json(navigation: &Navigation, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(navigation)?
    } else {
        serde_json::to_string(navigation)?
    };
    Ok(json)
}
