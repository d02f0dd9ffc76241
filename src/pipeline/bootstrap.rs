use anyhow::{Context, Result};
use tokio::time::sleep;
use tracing::info;

use crate::config::{Pacing, SiteConfig};
use crate::driver::MenuDriver;

/// Open a site's menu page and hand back control with the driver positioned
/// on the catalog surface: navigate, wait for baseline readiness, dismiss the
/// age gate when one appears, then descend into the embedded frame.
///
/// A missing age gate is success. A missing catalog frame is fatal for the
/// site, since no extraction is possible without it.
pub async fn bootstrap<D: MenuDriver>(
    driver: &mut D,
    site: &SiteConfig,
    pacing: &Pacing,
) -> Result<()> {
    info!("Opening menu for {}", site.location);
    driver
        .navigate(&site.url)
        .await
        .with_context(|| format!("Failed to open {}", site.url))?;
    sleep(pacing.page_ready()).await;

    let layout = site.layout.descriptor();

    if let Some(gate) = layout.age_gate {
        match driver.wait_until_clickable(gate, pacing.age_gate_wait()).await {
            Ok(()) => {
                driver.scroll_into_view(gate).await.ok();
                driver
                    .click(gate)
                    .await
                    .context("Failed to confirm the age verification screen")?;
                info!("Confirmed age verification for {}", site.location);
                sleep(pacing.post_gate_settle()).await;
            }
            Err(e) => {
                info!("No age verification found for {} ({})", site.location, e);
            }
        }
    }

    if let Some(frame) = layout.frame {
        driver
            .enter_frame(frame)
            .await
            .with_context(|| format!("Catalog frame `{}` not reachable on {}", frame, site.url))?;
    }

    Ok(())
}
