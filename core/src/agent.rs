//! Tool-call contract shared by all agent tools
//!
//! Tools are described by a [`Tool`] definition (name, description, JSON
//! input schema) and executed through a [`ToolExecutorFn`]: an `Arc`'d async
//! closure taking the tool's JSON input as a string and returning a
//! [`ToolResult`]. The agent framework owns the calling convention; this
//! module only fixes the shapes both sides agree on.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Tool definition surfaced to the agent framework
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    /// Tool name (used to identify which tool to call)
    pub name: String,
    /// Human-readable description of what the tool does
    pub description: String,
    /// JSON schema for the tool's input parameters
    pub input_schema: serde_json::Value,
}

/// Result from tool execution
pub type ToolResult = Result<String, ToolError>;

/// Tool execution errors
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolError {
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ToolError {}

/// Shared async executor invoked with a tool's JSON input string
///
/// Executors are cloned into the registry and may be called concurrently,
/// so they capture their environment behind `Arc`s.
pub type ToolExecutorFn =
    Arc<dyn Fn(String) -> Pin<Box<dyn Future<Output = ToolResult> + Send>> + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_display() {
        let error = ToolError {
            message: "Tool failed".to_string(),
        };

        assert_eq!(error.to_string(), "Tool failed");
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Test code
    fn test_tool_serialization() {
        let tool = Tool {
            name: "hashtag_info".to_string(),
            description: "Look up a hashtag".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "hashtag": {"type": "string"}
                },
                "required": ["hashtag"]
            }),
        };

        let json = serde_json::to_string(&tool).unwrap();
        assert!(json.contains(r#""name":"hashtag_info""#));

        let back: Tool = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tool);
    }

    #[tokio::test]
    async fn test_executor_fn_is_callable() {
        let executor: ToolExecutorFn = Arc::new(|input: String| {
            Box::pin(async move { Ok(format!("echo: {input}")) })
                as Pin<Box<dyn Future<Output = ToolResult> + Send>>
        });

        let result = executor("hello".to_string()).await;
        assert_eq!(result.expect("should succeed"), "echo: hello");
    }
}
