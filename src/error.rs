use thiserror::Error;

/// Errors produced by the browser session, snapshot capture and tool layer.
///
/// Container searches never fail through this type: their outcomes are
/// reported as [`crate::dom::ContainerFinderResult`] values.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("JavaScript evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Failed to capture bounding boxes: {0}")]
    SnapshotFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Screenshot failed: {0}")]
    ScreenshotFailed(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, BrowserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BrowserError::ToolNotFound("click".to_string());
        assert_eq!(err.to_string(), "Tool not found: click");

        let err = BrowserError::SnapshotFailed("empty".to_string());
        assert!(err.to_string().contains("bounding boxes"));
    }

    #[test]
    fn test_from_json_error() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: BrowserError = parse.unwrap_err().into();
        assert!(matches!(err, BrowserError::Json(_)));
    }
}
