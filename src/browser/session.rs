use crate::{browser::config::{ConnectionOptions, LaunchOptions},
            browser::page::{ImageFormat, PageDimensions, ScrollDirection},
            dom::Snapshot,
            error::{BrowserError, Result},
            tools::{ToolContext, ToolRegistry}};
use headless_chrome::protocol::cdp::Page::{CaptureScreenshotFormatOption, Viewport};
use headless_chrome::{Browser, Tab};
use rand::seq::SliceRandom;
use std::{ffi::OsStr,
          path::{Path, PathBuf},
          sync::Arc,
          time::Duration};

/// Colours used by [`BrowserSession::highlight`] when none is requested
pub const HIGHLIGHT_PALETTE: [&str; 8] =
    ["#FF5733", "#33FF57", "#3357FF", "#F39C12", "#8E44AD", "#16A085", "#E74C3C", "#2C3E50"];

const JPEG_QUALITY: u32 = 70;

const REMOVE_FIXED_OVERLAYS_JS: &str = r#"
    (function() {
        let removed = 0;
        for (const el of Array.from(document.querySelectorAll('*'))) {
            const style = window.getComputedStyle(el);
            if (style.position === 'fixed' && parseFloat(style.opacity) > 0.1 &&
                style.display !== 'none' && style.visibility !== 'hidden') {
                el.remove();
                removed++;
            }
        }
        return removed;
    })()
"#;

const PAGE_DIMENSIONS_JS: &str = r#"
    (function() {
        return JSON.stringify({
            width: Math.max(document.body.scrollWidth, document.documentElement.scrollWidth),
            height: Math.max(document.body.scrollHeight, document.documentElement.scrollHeight)
        });
    })()
"#;

/// Browser session that manages a Chrome/Chromium instance.
///
/// Sessions are explicit values: callers own one and pass it by reference to
/// whatever needs the browser.
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// Tool registry for executing browser automation tools
    tool_registry: ToolRegistry,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        launch_opts.idle_browser_timeout = options.idle_timeout;
        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.sandbox = options.sandbox;

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        let browser = Browser::new(launch_opts).map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        browser.new_tab().map_err(|e| BrowserError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        log::info!("Browser launched ({})", if options.headless { "headless" } else { "headed" });

        Ok(Self { browser, tool_registry: ToolRegistry::with_defaults() })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect_with_timeout(options.ws_url, Duration::from_millis(options.timeout))
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        Ok(Self { browser, tool_registry: ToolRegistry::with_defaults() })
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    /// Get the active tab
    pub fn tab(&self) -> Result<Arc<Tab>> {
        self.get_active_tab()
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the currently active tab, falling back to the first open tab
    pub fn get_active_tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;

        for tab in &tabs {
            match tab.evaluate("document.visibilityState === 'visible'", false) {
                Ok(remote_object) => {
                    if remote_object.value.and_then(|v| v.as_bool()).unwrap_or(false) {
                        return Ok(tab.clone());
                    }
                }
                Err(e) => {
                    log::debug!("Failed to check tab status: {}", e);
                    continue;
                }
            }
        }

        tabs.into_iter()
            .next()
            .ok_or_else(|| BrowserError::TabOperationFailed("No active tab found".to_string()))
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Navigate to a URL using the active tab
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab()?
            .navigate_to(url)
            .map_err(|e| BrowserError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| BrowserError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Current URL of the active tab
    pub fn current_url(&self) -> Result<String> {
        Ok(self.tab()?.get_url())
    }

    /// Full HTML of the current page
    pub fn page_content(&self) -> Result<String> {
        self.tab()?
            .get_content()
            .map_err(|e| BrowserError::EvaluationFailed(format!("Failed to read page content: {}", e)))
    }

    /// Capture every visible element under `root_selector`
    pub fn bounding_boxes(&self, root_selector: &str) -> Result<Snapshot> {
        Snapshot::from_tab(&self.tab()?, root_selector)
    }

    /// Find an element by CSS selector using the provided tab
    pub fn find_element<'a>(&self, tab: &'a Arc<Tab>, css_selector: &str) -> Result<headless_chrome::Element<'a>> {
        tab.find_element(css_selector)
            .map_err(|e| BrowserError::ElementNotFound(format!("Element '{}' not found: {}", css_selector, e)))
    }

    /// Overlay every element matching `selector` with a translucent colour.
    ///
    /// Returns the colour used, picked from [`HIGHLIGHT_PALETTE`] when `color` is `None`.
    pub fn highlight(&self, selector: &str, color: Option<&str>) -> Result<String> {
        let color = match color {
            Some(c) => c.to_string(),
            None => HIGHLIGHT_PALETTE
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or(HIGHLIGHT_PALETTE[0])
                .to_string(),
        };

        let js = format!(
            r#"
            (function(selector, color) {{
                let count = 0;
                document.querySelectorAll(selector).forEach(function(el) {{
                    const rect = el.getBoundingClientRect();
                    const overlay = document.createElement('div');
                    overlay.style.position = 'absolute';
                    overlay.style.left = (rect.left + window.scrollX) + 'px';
                    overlay.style.top = (rect.top + window.scrollY) + 'px';
                    overlay.style.width = rect.width + 'px';
                    overlay.style.height = rect.height + 'px';
                    overlay.style.backgroundColor = color;
                    overlay.style.opacity = '0.3';
                    overlay.style.pointerEvents = 'none';
                    overlay.style.zIndex = 9999;
                    overlay.className = 'ai-bbox-overlay';
                    document.body.appendChild(overlay);
                    count++;
                }});
                return count;
            }})({}, {})
            "#,
            serde_json::to_string(selector)?,
            serde_json::to_string(&color)?
        );

        let result = self
            .tab()?
            .evaluate(&js, false)
            .map_err(|e| BrowserError::EvaluationFailed(format!("Failed to highlight '{}': {}", selector, e)))?;

        let matched = result.value.and_then(|v| v.as_u64()).unwrap_or(0);
        if matched == 0 {
            return Err(BrowserError::ElementNotFound(format!("No element matches '{}'", selector)));
        }

        Ok(color)
    }

    /// Remove visible `position: fixed` elements (cookie banners, sticky headers) that cover content
    pub fn remove_fixed_overlays(&self) -> Result<u64> {
        let result = self
            .tab()?
            .evaluate(REMOVE_FIXED_OVERLAYS_JS, false)
            .map_err(|e| BrowserError::EvaluationFailed(format!("Failed to remove fixed overlays: {}", e)))?;

        Ok(result.value.and_then(|v| v.as_u64()).unwrap_or(0))
    }

    /// Whether the first element matching `selector` is rendered and not hidden
    pub fn is_element_visible(&self, selector: &str) -> Result<bool> {
        let js = format!(
            r#"
            (function(selector) {{
                const el = document.querySelector(selector);
                if (!el) return false;
                const rect = el.getBoundingClientRect();
                const style = window.getComputedStyle(el);
                return rect.width > 0 && rect.height > 0 &&
                       style.display !== 'none' &&
                       style.visibility !== 'hidden' &&
                       parseFloat(style.opacity) > 0;
            }})({})
            "#,
            serde_json::to_string(selector)?
        );

        let result = self
            .tab()?
            .evaluate(&js, false)
            .map_err(|e| BrowserError::EvaluationFailed(format!("Failed to check visibility of '{}': {}", selector, e)))?;

        Ok(result.value.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    /// Screenshot the element matching `selector` to `path` plus the format's extension.
    ///
    /// Returns `Ok(None)` when the element is missing, invisible or cannot be
    /// captured; the caller is expected to move on to the next element. Only
    /// failures writing the file are errors.
    pub fn screenshot_element(&self, selector: &str, path: &Path, format: ImageFormat) -> Result<Option<PathBuf>> {
        self.remove_fixed_overlays()?;

        let tab = self.tab()?;
        let element = match self.find_element(&tab, selector) {
            Ok(element) => element,
            Err(e) => {
                log::warn!("Skipping screenshot: {}", e);
                return Ok(None);
            }
        };

        if !self.is_element_visible(selector)? {
            log::warn!("Element '{}' is not visible, skipping screenshot", selector);
            return Ok(None);
        }

        let Some(bytes) = skip_on_capture_error(selector, Self::capture_element(&tab, &element, selector, format))
        else {
            return Ok(None);
        };

        let full_path = append_extension(path, format);
        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full_path, bytes)?;

        log::info!("Screenshot saved to {} ({})", full_path.display(), format);
        Ok(Some(full_path))
    }

    fn capture_element(
        tab: &Arc<Tab>,
        element: &headless_chrome::Element<'_>,
        selector: &str,
        format: ImageFormat,
    ) -> Result<Vec<u8>> {
        element
            .scroll_into_view()
            .map_err(|e| BrowserError::ScreenshotFailed(format!("Failed to scroll '{}' into view: {}", selector, e)))?;

        let viewport = element
            .get_box_model()
            .map_err(|e| BrowserError::ScreenshotFailed(format!("Failed to measure '{}': {}", selector, e)))?
            .content_viewport();

        Self::capture(tab, format, Some(viewport))
    }

    /// Capture the whole document as PNG, returning the bytes and the page size
    pub fn capture_full_page(&self) -> Result<(Vec<u8>, PageDimensions)> {
        let dimensions = self.page_dimensions()?;
        let clip = Viewport {
            x: 0.0,
            y: 0.0,
            width: dimensions.width as f64,
            height: dimensions.height as f64,
            scale: 1.0,
        };
        let bytes = Self::capture(&self.tab()?, ImageFormat::Png, Some(clip))?;
        Ok((bytes, dimensions))
    }

    fn capture(tab: &Arc<Tab>, format: ImageFormat, clip: Option<Viewport>) -> Result<Vec<u8>> {
        let (cdp_format, quality) = match format {
            ImageFormat::Png => (CaptureScreenshotFormatOption::Png, None),
            ImageFormat::Jpeg => (CaptureScreenshotFormatOption::Jpeg, Some(JPEG_QUALITY)),
        };

        tab.capture_screenshot(cdp_format, quality, clip, true)
            .map_err(|e| BrowserError::ScreenshotFailed(e.to_string()))
    }

    /// Scroll the page all the way up or down
    pub fn scroll_page(&self, direction: ScrollDirection) -> Result<()> {
        self.tab()?
            .evaluate(direction.script(), false)
            .map_err(|e| BrowserError::EvaluationFailed(format!("Failed to scroll {:?}: {}", direction, e)))?;

        Ok(())
    }

    /// Width and height of the whole document
    pub fn page_dimensions(&self) -> Result<PageDimensions> {
        let result = self
            .tab()?
            .evaluate(PAGE_DIMENSIONS_JS, false)
            .map_err(|e| BrowserError::EvaluationFailed(format!("Failed to read page dimensions: {}", e)))?;

        let json_str = result
            .value
            .and_then(|v| v.as_str().map(str::to_string))
            .ok_or_else(|| BrowserError::EvaluationFailed("No page dimensions returned".to_string()))?;

        Ok(serde_json::from_str(&json_str)?)
    }

    /// Get the tool registry
    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Execute a tool by name
    pub fn execute_tool(&self, name: &str, params: serde_json::Value) -> Result<crate::tools::ToolResult> {
        let mut context = ToolContext::new(self);
        self.tool_registry.execute(name, params, &mut context)
    }

    /// Close the browser
    pub fn close(&self) -> Result<()> {
        // headless_chrome closes the process when Browser is dropped; closing
        // the tabs releases the page resources right away
        let tabs = self.get_tabs()?;
        for tab in tabs {
            let _ = tab.close(false);
        }
        Ok(())
    }
}

/// A failed capture of one element is logged and skipped
fn skip_on_capture_error(selector: &str, captured: Result<Vec<u8>>) -> Option<Vec<u8>> {
    match captured {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            log::warn!("Skipping screenshot of '{}': {}", selector, e);
            None
        }
    }
}

/// `shots/abc` + Png -> `shots/abc.png`, keeping any dots already in the name
fn append_extension(path: &Path, format: ImageFormat) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}
