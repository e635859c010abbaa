//! Dist staging command.

use std::path::Path;

use anyhow::Result;
use lath_build::SiteConfig;

/// Run the dist command.
pub async fn run(config_path: &Path) -> Result<()> {
    let site = SiteConfig::load(config_path)?;

    let report = lath_build::stage(&site, Path::new("."))?;

    tracing::info!(
        "staged {} HTML file(s) and {} static folder(s) into {}",
        report.html_files,
        report.folders_copied,
        site.build.dist
    );

    Ok(())
}
