//! Browser session management and configuration

pub mod config;
pub mod page;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use page::{ImageFormat, PageDimensions, PageInfo, ScrollDirection};
pub use session::{BrowserSession, HIGHLIGHT_PALETTE};
