use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::MenuLayout;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub sites: Vec<SiteConfig>,
    pub db_path: String,
    pub pacing: Pacing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub url: String,
    /// Location label stamped onto every record from this menu.
    pub location: String,
    pub layout: MenuLayout,
}

/// Fixed-duration pauses and scroll budgets for driving a rendered surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pacing {
    pub page_ready_ms: u64,
    pub age_gate_wait_ms: u64,
    pub post_gate_settle_ms: u64,
    pub scroll_settle_ms: u64,
    /// Minimum scroll stimuli before the stable-card-count check applies.
    pub min_scroll_rounds: u32,
    pub max_scroll_rounds: u32,
    /// Consecutive no-growth checks that count as "fully revealed".
    pub stable_rounds: u32,
    pub next_wait_ms: u64,
    pub pre_click_pause_ms: u64,
    pub page_transition_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            page_ready_ms: 15_000,
            age_gate_wait_ms: 15_000,
            post_gate_settle_ms: 4_000,
            scroll_settle_ms: 1_000,
            min_scroll_rounds: 10,
            max_scroll_rounds: 20,
            stable_rounds: 3,
            next_wait_ms: 10_000,
            pre_click_pause_ms: 2_000,
            page_transition_ms: 9_000,
        }
    }
}

impl Pacing {
    /// Zero delays and a single-round scroll budget, for tests.
    pub fn instant() -> Self {
        Self {
            page_ready_ms: 0,
            age_gate_wait_ms: 0,
            post_gate_settle_ms: 0,
            scroll_settle_ms: 0,
            min_scroll_rounds: 1,
            max_scroll_rounds: 3,
            stable_rounds: 1,
            next_wait_ms: 0,
            pre_click_pause_ms: 0,
            page_transition_ms: 0,
        }
    }

    pub fn page_ready(&self) -> Duration {
        Duration::from_millis(self.page_ready_ms)
    }

    pub fn age_gate_wait(&self) -> Duration {
        Duration::from_millis(self.age_gate_wait_ms)
    }

    pub fn post_gate_settle(&self) -> Duration {
        Duration::from_millis(self.post_gate_settle_ms)
    }

    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.scroll_settle_ms)
    }

    pub fn next_wait(&self) -> Duration {
        Duration::from_millis(self.next_wait_ms)
    }

    pub fn pre_click_pause(&self) -> Duration {
        Duration::from_millis(self.pre_click_pause_ms)
    }

    pub fn page_transition(&self) -> Duration {
        Duration::from_millis(self.page_transition_ms)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // For now, hardcode the menus matching the original run list
        let sites = vec![
            SiteConfig {
                url: "https://greenlightdispensary.com/cape-girardeau-menu/?dtche%5Bcategory%5D=flower"
                    .to_string(),
                location: "Greenlight".to_string(),
                layout: MenuLayout::Dutchie,
            },
            SiteConfig {
                url: "https://codesdispensary.com/location/cape-girardeau-mo/?dtche%5Bcategory%5D=flower"
                    .to_string(),
                location: "CODES".to_string(),
                layout: MenuLayout::Dutchie,
            },
            SiteConfig {
                url: "https://gooddayfarmdispensary.com/cape-girardeau-menu/?dtche%5Bcategory%5D=flower"
                    .to_string(),
                location: "Good Day Farm".to_string(),
                layout: MenuLayout::Dutchie,
            },
            SiteConfig {
                url: "https://keycannabis.com/shop/cape-girardeau-mo/?dtche%5Bcategory%5D=flower"
                    .to_string(),
                location: "Elevate".to_string(),
                layout: MenuLayout::Dutchie,
            },
            SiteConfig {
                url: "https://highprofilecannabis.com/shop/cape-girardeau/flower".to_string(),
                location: "High Profile".to_string(),
                layout: MenuLayout::HighProfile,
            },
        ];

        Ok(Config {
            sites,
            db_path: "dispensary.db".to_string(),
            pacing: Pacing::default(),
        })
    }
}
