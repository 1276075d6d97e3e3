//! Container finder MCP Server
//!
//! Exposes the container discovery tools over the Model Context Protocol so
//! AI assistants can locate repeated content regions on live pages.

use clap::{Parser, ValueEnum};
use container_finder::browser::{ConnectionOptions, LaunchOptions};
use container_finder::mcp::BrowserServer;
use rmcp::{ServiceExt, transport::stdio};
use std::time::Duration;

use rmcp::transport::{
    sse_server::{SseServer, SseServerConfig},
    streamable_http_server::{StreamableHttpService, session::local::LocalSessionManager},
};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    /// Standard input/output transport (default)
    Stdio,
    /// Server-Sent Events transport
    Sse,
    /// HTTP streamable transport
    Http,
}

#[derive(Parser)]
#[command(name = "container-finder-mcp")]
#[command(version)]
#[command(about = "Container discovery MCP server", long_about = None)]
struct Cli {
    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<String>,

    /// WebSocket endpoint URL of an already running browser
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<String>,

    /// Close the launched browser after this many idle seconds
    #[arg(long, value_name = "SECS", default_value = "3600")]
    idle_timeout: u64,

    /// Transport type to use
    #[arg(long, short = 't', value_enum, default_value = "stdio")]
    transport: Transport,

    /// Port for SSE or HTTP transport (default: 3000)
    #[arg(long, short = 'p', default_value = "3000")]
    port: u16,

    /// SSE endpoint path (default: /sse)
    #[arg(long, default_value = "/sse")]
    sse_path: String,

    /// SSE POST path for messages (default: /message)
    #[arg(long, default_value = "/message")]
    sse_post_path: String,

    /// HTTP streamable endpoint path (default: /mcp)
    #[arg(long, default_value = "/mcp")]
    http_path: String,
}

impl Cli {
    fn launch_options(&self) -> LaunchOptions {
        let mut options = LaunchOptions::new()
            .headless(!self.headed)
            .idle_timeout(Duration::from_secs(self.idle_timeout));
        if let Some(path) = &self.chrome_path {
            options = options.chrome_path(path);
        }
        if let Some(dir) = &self.user_data_dir {
            options = options.user_data_dir(dir);
        }
        options
    }

    fn build_server(&self) -> Result<BrowserServer, String> {
        match &self.ws_endpoint {
            Some(endpoint) => {
                log::info!("Connecting to browser at {}", endpoint);
                BrowserServer::with_connection(ConnectionOptions::new(endpoint))
            }
            None => {
                let options = self.launch_options();
                log::info!("Launching {} browser", if options.headless { "headless" } else { "headed" });
                BrowserServer::with_options(options)
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the protocol; env_logger writes to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("Container finder MCP Server v{}", env!("CARGO_PKG_VERSION"));

    // One browser shared by every connection
    let server = cli
        .build_server()
        .map_err(|e| format!("Failed to create browser server: {}", e))?;

    match cli.transport {
        Transport::Stdio => {
            log::info!("Ready to accept MCP connections via stdio");
            let running = server.serve(stdio()).await?;
            let quit_reason = running.waiting().await?;
            log::info!("Server quit with reason: {:?}", quit_reason);
            // Give a small delay for destructors to complete
            tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
        }
        Transport::Sse => {
            let bind_addr = format!("127.0.0.1:{}", cli.port);

            let config = SseServerConfig {
                bind: bind_addr.parse()?,
                sse_path: cli.sse_path.clone(),
                post_path: cli.sse_post_path.clone(),
                ct: CancellationToken::new(),
                sse_keep_alive: None,
            };

            let (sse_server, router) = SseServer::new(config);
            log::info!("Ready to accept MCP connections at http://{}{}", bind_addr, cli.sse_path);

            let _cancellation_token = sse_server.with_service(move || server.clone());

            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
            axum::serve(listener, router.into_make_service()).await?;
        }
        Transport::Http => {
            let bind_addr = format!("127.0.0.1:{}", cli.port);

            let service_factory = move || Ok::<_, std::io::Error>(server.clone());
            let http_service =
                StreamableHttpService::new(service_factory, LocalSessionManager::default().into(), Default::default());

            let router = axum::Router::new().nest_service(&cli.http_path, http_service);
            log::info!("Ready to accept MCP connections at http://{}{}", bind_addr, cli.http_path);

            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
