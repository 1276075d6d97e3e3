use crate::browser::{BrowserSession, ConnectionOptions, LaunchOptions};
use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};
use std::sync::{Arc, Mutex, MutexGuard};

/// MCP server exposing container discovery tools over a shared browser session
#[derive(Clone)]
pub struct BrowserServer {
    session: Arc<Mutex<BrowserSession>>,
    tool_router: ToolRouter<Self>,
}

impl BrowserServer {
    /// Launch a headless browser with default options
    pub fn new() -> Result<Self, String> {
        Self::with_options(LaunchOptions::default())
    }

    /// Launch a browser with the given options
    pub fn with_options(options: LaunchOptions) -> Result<Self, String> {
        let session = BrowserSession::launch(options).map_err(|e| e.to_string())?;
        Ok(Self::from_session(session))
    }

    /// Attach to an already running browser
    pub fn with_connection(options: ConnectionOptions) -> Result<Self, String> {
        let session = BrowserSession::connect(options).map_err(|e| e.to_string())?;
        Ok(Self::from_session(session))
    }

    pub fn from_session(session: BrowserSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            tool_router: Self::tool_router(),
        }
    }

    /// Lock the shared session; a poisoned lock is recovered since the browser state lives in Chrome
    pub fn session(&self) -> MutexGuard<'_, BrowserSession> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[tool_handler]
impl ServerHandler for BrowserServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Finds the main content container of a web page. Navigate first, then call \
                 browser_find_container with the CSS path or XPath of an element inside the region \
                 of interest. The search descends through single-child wrappers and stops at the \
                 first element with several direct children."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
