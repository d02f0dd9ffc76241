use anyhow::Result;
use tracing::{error, info};

use crate::config::{Config, SiteConfig};
use crate::driver::MenuDriver;
use crate::models::ProductRecord;
use crate::pipeline::{bootstrap, walk};
use crate::storage::Storage;

/// Outcome of one multi-site run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sites_attempted: usize,
    pub sites_failed: usize,
    pub records_inserted: usize,
}

/// Scrape every configured site strictly sequentially, loading the results
/// through the truncate-then-reload policy. Each site is its own unit of
/// failure: a fatal bootstrap, walk, or insert error is logged and counted
/// but never stops the remaining sites, and batches already committed stay
/// committed.
pub async fn run_sites<D: MenuDriver>(
    driver: &mut D,
    config: &Config,
    storage: &dyn Storage,
) -> Result<RunSummary> {
    storage.migrate().await?;
    storage.truncate().await?;

    let mut summary = RunSummary::default();

    for site in &config.sites {
        summary.sites_attempted += 1;
        info!("Scraping data for: {}", site.location);

        let records = match scrape_site(driver, config, site).await {
            Ok(records) => records,
            Err(e) => {
                error!("Scrape of {} failed: {:#}", site.location, e);
                summary.sites_failed += 1;
                continue;
            }
        };

        match storage.insert_batch(&records).await {
            Ok(inserted) => {
                info!("Stored {} records for {}", inserted, site.location);
                summary.records_inserted += inserted;
            }
            Err(e) => {
                error!("Failed to store batch for {}: {:#}", site.location, e);
                summary.sites_failed += 1;
            }
        }
    }

    Ok(summary)
}

async fn scrape_site<D: MenuDriver>(
    driver: &mut D,
    config: &Config,
    site: &SiteConfig,
) -> Result<Vec<ProductRecord>> {
    bootstrap(driver, site, &config.pacing).await?;
    walk(
        driver,
        site.layout.descriptor(),
        &config.pacing,
        &site.location,
    )
    .await
}
