//! Static site build command.

use std::path::Path;

use anyhow::Result;
use lath_build::{BuildConfig, BuildReport, BuildStamp, GlobalData, SiteBuilder, SiteConfig};
use lath_templates::TemplateEngine;

/// Run the build command.
///
/// Per-page failures show up in the summary but never reach the exit
/// code: a bad page must not break the batch, and callers are expected to
/// read the log rather than the process status.
pub async fn run(config_path: &Path) -> Result<()> {
    let site = SiteConfig::load(config_path)?;
    run_build(&site)?;
    Ok(())
}

/// One full build pass: fresh engine, fresh partial registry, fresh data.
pub(crate) fn run_build(site: &SiteConfig) -> Result<BuildReport> {
    let stamp = BuildStamp::now();
    let data = GlobalData::assemble(site, &stamp);
    let engine = TemplateEngine::new(stamp.year());
    let config = BuildConfig::from_site(site, Path::new("."));

    let mut builder = SiteBuilder::new(config, data, engine);
    let report = builder.build()?;

    if report.failed() > 0 {
        tracing::warn!(
            "built {} of {} page(s) in {}ms, {} failed",
            report.succeeded(),
            report.outcomes.len(),
            report.duration_ms,
            report.failed()
        );
    } else {
        tracing::info!(
            "built {} page(s) in {}ms",
            report.outcomes.len(),
            report.duration_ms
        );
    }

    Ok(report)
}
