//! Browser session abstraction
//!
//! A session is one browser with one page, owned by exactly one pipeline run.
//! The pipeline only talks to it through [`PageDriver`], so tests can swap the
//! chromiumoxide-backed [`BrowserSession`] for a scripted fake.

mod browser;
mod page_timeout;

pub use browser::{BrowserSession, ChromeLauncher};
pub use page_timeout::with_page_timeout;

use std::future::Future;

use crate::errors::{NavigationError, ScrapeError};

/// Low-level page operations the navigator builds on
pub trait PageDriver: Send {
    /// Navigate the page to `url` and wait for the load to finish
    fn goto(&mut self, url: &str) -> impl Future<Output = Result<(), NavigationError>> + Send;

    /// Serialized HTML of the page as currently rendered
    fn page_source(&mut self) -> impl Future<Output = Result<String, NavigationError>> + Send;

    /// Scroll the viewport down by `px` pixels
    fn scroll_by(&mut self, px: u32) -> impl Future<Output = Result<(), NavigationError>> + Send;

    /// Current `document.body.scrollHeight`
    fn document_height(&mut self) -> impl Future<Output = Result<u64, NavigationError>> + Send;

    /// Release the session (close the browser, remove its profile)
    fn shutdown(self) -> impl Future<Output = ()> + Send
    where
        Self: Sized;
}

/// Factory for fresh sessions, one per pipeline run
pub trait SessionLauncher: Sync {
    type Driver: PageDriver;

    fn launch(&self) -> impl Future<Output = Result<Self::Driver, ScrapeError>> + Send;
}
