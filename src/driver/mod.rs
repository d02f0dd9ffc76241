use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// How an element is addressed on the rendered surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    /// CSS selector.
    Css(&'static str),
    /// A `<button>` whose visible text contains the given fragment.
    ButtonText(&'static str),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(sel) => write!(f, "css `{}`", sel),
            Locator::ButtonText(text) => write!(f, "button containing \"{}\"", text),
        }
    }
}

/// Outcome of probing a control, distinguishing "absent" from "present but
/// disabled" from "ready to click".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Missing,
    Disabled,
    Clickable,
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("element not found: {0}")]
    NotFound(String),
    #[error("timed out waiting for {0}")]
    Timeout(String),
    #[error("driver fault: {0}")]
    Fault(String),
}

/// The browser-automation collaborator. The pipeline only ever talks to the
/// rendered surface through this trait; a concrete WebDriver binding lives
/// outside the crate.
#[async_trait]
pub trait MenuDriver: Send {
    /// Navigate the surface to the given URL.
    async fn navigate(&mut self, url: &str) -> Result<(), DriverError>;

    /// Descend into an embedded frame; subsequent calls address its content.
    async fn enter_frame(&mut self, css: &'static str) -> Result<(), DriverError>;

    /// Current rendered markup of the active surface.
    async fn page_source(&mut self) -> Result<String, DriverError>;

    /// Send one PAGE_DOWN-equivalent stimulus to the surface body.
    async fn send_scroll_key(&mut self) -> Result<(), DriverError>;

    /// Bring the element into the viewport.
    async fn scroll_into_view(&mut self, target: Locator) -> Result<(), DriverError>;

    /// Click the element.
    async fn click(&mut self, target: Locator) -> Result<(), DriverError>;

    /// Inspect a control without clicking it.
    async fn probe(&mut self, target: Locator) -> Result<ControlState, DriverError>;

    /// Poll until the element is clickable or the timeout elapses.
    async fn wait_until_clickable(
        &mut self,
        target: Locator,
        timeout: Duration,
    ) -> Result<(), DriverError>;
}
