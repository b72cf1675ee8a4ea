//! Agent tools for the video researcher
//!
//! Each tool is a factory returning a `(Tool, ToolExecutorFn)` pair: the
//! definition the agent framework advertises to the model, and the async
//! executor invoked with the tool call's JSON input. Tools render their
//! outcomes as structured JSON strings; ordinary failures (missing
//! credential, nothing found upstream) come back as
//! `{"success": false, "error": …}` rather than executor errors, which are
//! reserved for malformed tool input.
//!
//! ## Modules
//!
//! - `hashtag`: TikTok hashtag research (`hashtag_info`, `hashtag_posts`)
//! - `search`: web search pass-through (`web_search`)
//! - `tasks`: task tracking over a shared [`tasks::TaskStore`]
//!   (`task_update`, `task_list`)
//! - `registry`: name-indexed tool storage and execution

pub mod hashtag;
pub mod registry;
pub mod search;
pub mod tasks;

pub use registry::ToolRegistry;
pub use video_researcher_core::agent::{Tool, ToolError, ToolExecutorFn, ToolResult};
