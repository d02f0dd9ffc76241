use tokio::time::sleep;
use tracing::debug;

use crate::config::Pacing;
use crate::driver::{DriverError, MenuDriver};
use crate::extract::count_cards;
use crate::models::LayoutDescriptor;

/// Drive lazy loading until the listing stops growing: send scroll stimuli
/// with a settle pause after each, re-counting product cards in the rendered
/// markup. Stops once the count has held still for `stable_rounds` checks
/// (consulted only after the `min_scroll_rounds` floor) or the
/// `max_scroll_rounds` budget runs out. Returns the final card count.
pub async fn reveal<D: MenuDriver>(
    driver: &mut D,
    layout: &LayoutDescriptor,
    pacing: &Pacing,
) -> Result<usize, DriverError> {
    let mut last_count = count_cards(&driver.page_source().await?, layout);
    let mut stable = 0u32;

    for round in 1..=pacing.max_scroll_rounds {
        driver.send_scroll_key().await?;
        sleep(pacing.scroll_settle()).await;

        let count = count_cards(&driver.page_source().await?, layout);
        debug!("Scroll round {}: {} cards visible", round, count);

        if round >= pacing.min_scroll_rounds {
            if count == last_count {
                stable += 1;
                if stable >= pacing.stable_rounds {
                    break;
                }
            } else {
                stable = 0;
            }
        }
        last_count = count;
    }

    Ok(last_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{ControlState, Locator};
    use crate::models::MenuLayout;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    /// Surface that gains cards for the first `grow_until` scrolls, then
    /// stops growing.
    struct GrowingSurface {
        cards: usize,
        grow_until: usize,
        scrolls: usize,
    }

    #[async_trait]
    impl MenuDriver for GrowingSurface {
        async fn navigate(&mut self, _url: &str) -> Result<(), DriverError> {
            Ok(())
        }

        async fn enter_frame(&mut self, _css: &'static str) -> Result<(), DriverError> {
            Ok(())
        }

        async fn page_source(&mut self) -> Result<String, DriverError> {
            Ok(r#"<div class="shopitem"></div>"#.repeat(self.cards))
        }

        async fn send_scroll_key(&mut self) -> Result<(), DriverError> {
            self.scrolls += 1;
            if self.scrolls <= self.grow_until {
                self.cards += 5;
            }
            Ok(())
        }

        async fn scroll_into_view(&mut self, _target: Locator) -> Result<(), DriverError> {
            Ok(())
        }

        async fn click(&mut self, _target: Locator) -> Result<(), DriverError> {
            Ok(())
        }

        async fn probe(&mut self, _target: Locator) -> Result<ControlState, DriverError> {
            Ok(ControlState::Missing)
        }

        async fn wait_until_clickable(
            &mut self,
            _target: Locator,
            _timeout: Duration,
        ) -> Result<(), DriverError> {
            Ok(())
        }
    }

    fn pacing(min: u32, max: u32, stable: u32) -> Pacing {
        Pacing {
            scroll_settle_ms: 0,
            min_scroll_rounds: min,
            max_scroll_rounds: max,
            stable_rounds: stable,
            ..Pacing::instant()
        }
    }

    #[tokio::test]
    async fn stops_once_card_count_holds_still() {
        let mut surface = GrowingSurface {
            cards: 0,
            grow_until: 3,
            scrolls: 0,
        };
        let count = reveal(
            &mut surface,
            MenuLayout::HighProfile.descriptor(),
            &pacing(1, 10, 2),
        )
        .await
        .unwrap();

        assert_eq!(count, 15);
        assert_eq!(surface.scrolls, 5);
    }

    #[tokio::test]
    async fn never_exceeds_the_scroll_budget() {
        let mut surface = GrowingSurface {
            cards: 0,
            grow_until: usize::MAX,
            scrolls: 0,
        };
        reveal(
            &mut surface,
            MenuLayout::HighProfile.descriptor(),
            &pacing(1, 4, 2),
        )
        .await
        .unwrap();

        assert_eq!(surface.scrolls, 4);
    }

    #[tokio::test]
    async fn stable_check_waits_for_the_minimum_rounds() {
        // count never changes, but the floor forces at least 6 stimuli
        let mut surface = GrowingSurface {
            cards: 8,
            grow_until: 0,
            scrolls: 0,
        };
        reveal(
            &mut surface,
            MenuLayout::HighProfile.descriptor(),
            &pacing(6, 20, 1),
        )
        .await
        .unwrap();

        assert_eq!(surface.scrolls, 6);
    }
}
