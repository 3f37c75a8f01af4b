use anyhow::Result;
use colored::Colorize;

use crate::SourceArgs;

#[cfg(feature = "watch")]
pub fn execute(source: &SourceArgs) -> Result<()> {
    use crate::watch::NavigationWatcher;

    let (router, app_dir) = super::load_router(source)?;

    println!("{}", "Watching pages...".green().bold());
    println!();
    super::list::print_navigation(&super::build(&router, &app_dir)?);
    println!();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async { NavigationWatcher::new(router, app_dir).watch().await })
}

#[cfg(not(feature = "watch"))]
pub fn execute(_source: &SourceArgs) -> Result<()> {
    println!("{}", "⚠ Watch mode not available".yellow());
    println!();
    println!("Watching requires the 'watch' feature.");
    println!("Rebuild with: cargo build --features watch");
    Ok(())
}
