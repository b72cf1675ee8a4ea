//! Web search pass-through tool
//!
//! Wraps the [`TavilyClient`] as a single `web_search` tool. The search
//! engine does the ranking; the tool just relays query and results.

use serde_json::json;
use std::sync::Arc;
use video_researcher_clients::TavilyClient;
use video_researcher_core::agent::{Tool, ToolError, ToolExecutorFn, ToolResult};

/// Default number of hits relayed when the caller does not say
const DEFAULT_MAX_RESULTS: usize = 5;

/// Create the `web_search` tool
///
/// Returns JSON:
/// ```json
/// {
///   "success": true,
///   "query": "rust async runtimes",
///   "result_count": 2,
///   "results": [
///     {"title": "Tokio", "url": "https://tokio.rs", "content": "…", "score": 0.91}
///   ]
/// }
/// ```
#[must_use]
pub fn web_search_tool() -> (Tool, ToolExecutorFn) {
    let tool = Tool {
        name: "web_search".to_string(),
        description: "Search the web for current information. Useful for answering \
                      questions about recent events and general research."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                },
                "max_results": {
                    "type": "number",
                    "description": "Maximum number of results (default 5)"
                }
            },
            "required": ["query"]
        }),
    };

    let executor = Arc::new(|input: String| {
        Box::pin(async move {
            let parsed: serde_json::Value = serde_json::from_str(&input).map_err(|e| {
                ToolError {
                    message: format!("Invalid input JSON: {e}"),
                }
            })?;

            let query = parsed["query"]
                .as_str()
                .ok_or_else(|| ToolError {
                    message: "Missing 'query' field".to_string(),
                })?
                .to_string();

            #[allow(clippy::cast_possible_truncation)]
            let max_results = parsed["max_results"]
                .as_u64()
                .map_or(DEFAULT_MAX_RESULTS, |n| n as usize)
                .max(1);

            let client = match TavilyClient::from_env() {
                Ok(client) => client,
                Err(e) => {
                    return Ok(json!({
                        "success": false,
                        "error": e.to_string(),
                        "query": query,
                    })
                    .to_string());
                }
            };

            let result = client.search(&query, max_results).await;
            client.close();

            let output = match result {
                Ok(Some(results)) => json!({
                    "success": true,
                    "query": query,
                    "response_time": results.response_time,
                    "result_count": results.results.len(),
                    "results": results.results.iter().map(|hit| json!({
                        "title": hit.title,
                        "url": hit.url,
                        "content": hit.content,
                        "score": hit.score,
                    })).collect::<Vec<_>>(),
                }),
                Ok(None) => json!({
                    "success": false,
                    "error": format!("Search for '{query}' failed or returned nothing"),
                    "query": query,
                }),
                Err(e) => json!({
                    "success": false,
                    "error": format!("Failed to search the web: {e}"),
                    "query": query,
                }),
            };

            Ok(output.to_string())
        }) as std::pin::Pin<
            Box<dyn std::future::Future<Output = ToolResult> + Send>,
        >
    }) as ToolExecutorFn;

    (tool, executor)
}
