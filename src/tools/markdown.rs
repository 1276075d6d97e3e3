use crate::error::{BrowserError, Result};
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for getting markdown content (no parameters needed)
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetMarkdownParams {}

/// Tool converting the current page's HTML to markdown
#[derive(Default)]
pub struct GetMarkdownTool;

impl Tool for GetMarkdownTool {
    type Params = GetMarkdownParams;

    fn name(&self) -> &str {
        "get_markdown"
    }

    fn execute_typed(&self, _params: GetMarkdownParams, context: &mut ToolContext) -> Result<ToolResult> {
        let html = context.session.page_content()?;
        let title = context
            .session
            .tab()?
            .get_title()
            .map_err(|e| BrowserError::EvaluationFailed(format!("Failed to read page title: {}", e)))?;
        let url = context.session.current_url()?;

        let markdown = render_markdown(&title, &html);

        Ok(ToolResult::success_with(serde_json::json!({
            "markdown": markdown,
            "title": title,
            "url": url,
            "length": markdown.len()
        })))
    }
}

/// Elements whose text content never belongs in the rendered page
const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style"];

/// Convert page HTML to markdown, prefixed by the title as a heading when there is one
fn render_markdown(title: &str, html: &str) -> String {
    let body = html2md::parse_html(&strip_elements(html, NON_CONTENT_ELEMENTS));
    let title = title.trim();
    if title.is_empty() {
        body
    } else {
        format!("# {}\n\n{}", title, body.trim())
    }
}

/// Remove every `tag` element, content included. Tag names match case-insensitively.
fn strip_elements(html: &str, tags: &[&str]) -> String {
    tags.iter()
        .fold(html.to_string(), |html, tag| strip_element(&html, tag))
}

fn strip_element(html: &str, tag: &str) -> String {
    // ASCII lowercasing keeps byte offsets valid for `html`
    let lower = html.to_ascii_lowercase();
    let open = format!("<{}", tag);
    let close = format!("</{}", tag);

    let mut out = String::with_capacity(html.len());
    let mut pos = 0;
    while let Some(found) = lower[pos..].find(&open) {
        let start = pos + found;
        let after = start + open.len();
        // `<scripts>` or `<style-guide>` are other elements
        if !lower[after..].starts_with(|c: char| c == '>' || c == '/' || c.is_ascii_whitespace()) {
            out.push_str(&html[pos..after]);
            pos = after;
            continue;
        }

        out.push_str(&html[pos..start]);
        // An unclosed element swallows the rest of the document, as in a browser
        pos = match lower[after..].find(&close) {
            Some(end) => {
                let close_start = after + end;
                lower[close_start..]
                    .find('>')
                    .map_or(html.len(), |gt| close_start + gt + 1)
            }
            None => html.len(),
        };
    }
    out.push_str(&html[pos..]);
    out
}
