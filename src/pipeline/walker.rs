use anyhow::{Context, Result};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::Pacing;
use crate::driver::{ControlState, Locator, MenuDriver};
use crate::extract::extract_products;
use crate::models::{LayoutDescriptor, ProductRecord};
use crate::pipeline::loader::reveal;

/// Why the walk stopped advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextOutcome {
    Missing,
    Disabled,
    Ready,
}

/// Walk every page of one site's catalog: reveal lazy content, extract the
/// rendered records, then locate and follow the "next page" control until it
/// is absent, disabled, or the driver faults while handling it. Always
/// returns the records accumulated so far, in page order.
pub async fn walk<D: MenuDriver>(
    driver: &mut D,
    layout: &LayoutDescriptor,
    pacing: &Pacing,
    location: &str,
) -> Result<Vec<ProductRecord>> {
    let mut all_records = Vec::new();
    let mut page = 1u32;

    loop {
        let cards = reveal(driver, layout, pacing)
            .await
            .with_context(|| format!("Failed to reveal page {} of {}", page, location))?;
        info!("Page {} of {}: {} cards revealed", page, location, cards);

        let html = driver
            .page_source()
            .await
            .with_context(|| format!("Failed to read page {} of {}", page, location))?;
        let records = extract_products(&html, layout, location)?;
        info!(
            "Page {} of {}: extracted {} records",
            page,
            location,
            records.len()
        );
        all_records.extend(records);

        let Some(next_selector) = layout.next_control else {
            // single-page catalog
            break;
        };
        let next = Locator::Css(next_selector);

        match check_next(driver, next, pacing).await {
            NextOutcome::Missing => {
                info!("No next-page control on {}; walk complete", location);
                break;
            }
            NextOutcome::Disabled => {
                info!("Next-page control disabled on {}; walk complete", location);
                break;
            }
            NextOutcome::Ready => {
                if let Err(e) = advance(driver, next, pacing).await {
                    warn!("Failed to advance {} past page {}: {}", location, page, e);
                    break;
                }
                page += 1;
            }
        }
    }

    Ok(all_records)
}

/// Tri-state next-page check. A driver fault while locating or inspecting
/// the control is indistinguishable from the control being gone, so it maps
/// to `Missing` rather than aborting the walk.
async fn check_next<D: MenuDriver>(
    driver: &mut D,
    next: Locator,
    pacing: &Pacing,
) -> NextOutcome {
    match driver.wait_until_clickable(next, pacing.next_wait()).await {
        Ok(()) => NextOutcome::Ready,
        Err(e) => match driver.probe(next).await {
            Ok(ControlState::Disabled) => NextOutcome::Disabled,
            Ok(ControlState::Clickable) => NextOutcome::Ready,
            Ok(ControlState::Missing) => NextOutcome::Missing,
            Err(probe_err) => {
                warn!(
                    "Next-page control unavailable ({}; probe: {})",
                    e, probe_err
                );
                NextOutcome::Missing
            }
        },
    }
}

async fn advance<D: MenuDriver>(
    driver: &mut D,
    next: Locator,
    pacing: &Pacing,
) -> Result<()> {
    driver.scroll_into_view(next).await?;
    sleep(pacing.pre_click_pause()).await;
    driver.click(next).await?;
    sleep(pacing.page_transition()).await;
    Ok(())
}
