//! Command-line driver: find the container of a page region, or dump the page's boxes.

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use container_finder::browser::{ConnectionOptions, ImageFormat, LaunchOptions};
use container_finder::dom::report::write_search_path_csv;
use container_finder::tools::utils::{normalize_url, selector_file_stem};
use container_finder::{BrowserSession, ContainerAnalysis, ContainerFinder, SelectorType};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "container-finder")]
#[command(version)]
#[command(about = "Locate the container element of a repeated collection on a web page", long_about = None)]
struct Cli {
    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H', global = true)]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH", global = true)]
    chrome_path: Option<PathBuf>,

    /// WebSocket endpoint URL of an already running browser
    #[arg(long, value_name = "URL", global = true)]
    ws_endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the container below a start element
    Find(FindArgs),
    /// List every visible element of the page, largest first
    Boxes(BoxesArgs),
}

#[derive(Args)]
struct FindArgs {
    /// Page to analyse
    url: String,

    /// CSS path or XPath of an element inside the region of interest
    #[arg(long, short = 's')]
    start: String,

    /// How --start is matched
    #[arg(long, default_value_t = SelectorType::Css)]
    selector_type: SelectorType,

    /// Selector whose subtrees are captured
    #[arg(long, default_value = "body")]
    root: String,

    /// Maximum number of elements visited
    #[arg(long, default_value_t = container_finder::dom::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Save a screenshot of each direct child of the container into DIR
    #[arg(long, value_name = "DIR")]
    screenshots: Option<PathBuf>,

    /// Screenshot format (png or jpeg)
    #[arg(long, default_value_t = ImageFormat::Png)]
    format: ImageFormat,

    /// Write the analysis to FILE (CSV of the search path when FILE ends in .csv)
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

#[derive(Args)]
struct BoxesArgs {
    /// Page to analyse
    url: String,

    /// Selector whose subtrees are captured
    #[arg(long, default_value = "body")]
    root: String,

    /// Write CSV to FILE instead of printing JSON
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,
}

impl Cli {
    fn open_session(&self) -> anyhow::Result<BrowserSession> {
        let session = match &self.ws_endpoint {
            Some(endpoint) => BrowserSession::connect(ConnectionOptions::new(endpoint))?,
            None => {
                let mut options = LaunchOptions::new().headless(!self.headed);
                if let Some(path) = &self.chrome_path {
                    options = options.chrome_path(path);
                }
                BrowserSession::launch(options)?
            }
        };
        Ok(session)
    }
}

fn open_page(session: &BrowserSession, url: &str) -> anyhow::Result<()> {
    let url = normalize_url(url);
    log::info!("Loading {}", url);
    session.navigate(&url)?;
    session.wait_for_navigation()?;
    Ok(())
}

fn run_find(session: &BrowserSession, args: &FindArgs) -> anyhow::Result<bool> {
    open_page(session, &args.url)?;

    let snapshot = session.bounding_boxes(&args.root)?;
    log::info!("Captured {} bounding boxes under '{}'", snapshot.len(), args.root);

    let finder = ContainerFinder::new(args.max_depth);
    let result = snapshot.find_container(&finder, &args.start, args.selector_type);
    let analysis = ContainerAnalysis::from(&result);

    println!("{}", analysis.to_json()?);

    if let Some(report) = &args.report {
        write_report(report, &analysis)?;
    }

    let Some(container) = result.container.as_ref() else {
        return Ok(false);
    };

    if let Some(dir) = &args.screenshots {
        let children = snapshot.direct_children(container);
        let mut saved = 0;
        for child in &children {
            let selector = child.css_selector.trim();
            let stem = dir.join(selector_file_stem(selector));
            if session.screenshot_element(selector, &stem, args.format)?.is_some() {
                saved += 1;
            }
        }
        log::info!("Saved {}/{} child screenshots to {}", saved, children.len(), dir.display());
    }

    Ok(true)
}

fn write_report(path: &Path, analysis: &ContainerAnalysis) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv")) {
        write_search_path_csv(file, analysis)?;
    } else {
        serde_json::to_writer_pretty(file, analysis)?;
    }

    log::info!("Report written to {}", path.display());
    Ok(())
}

fn run_boxes(session: &BrowserSession, args: &BoxesArgs) -> anyhow::Result<()> {
    open_page(session, &args.url)?;
    let snapshot = session.bounding_boxes(&args.root)?;

    match &args.csv {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
            snapshot.write_csv(file)?;
            log::info!("{} boxes written to {}", snapshot.len(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&snapshot.sorted_by_area())?),
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let session = cli.open_session().context("Failed to start browser")?;

    let outcome = match &cli.command {
        Command::Find(args) => run_find(&session, args),
        Command::Boxes(args) => run_boxes(&session, args).map(|()| true),
    };

    if let Err(e) = session.close() {
        log::warn!("Failed to close browser cleanly: {}", e);
    }

    if !outcome? {
        bail!("No container found");
    }
    Ok(())
}
