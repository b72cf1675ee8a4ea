//! Core contracts for the video researcher agent toolset
//!
//! This crate holds the pieces every other member depends on:
//!
//! - `agent`: the tool-call contract (`Tool`, `ToolError`, `ToolExecutorFn`)
//!   that the agent framework consumes
//! - `tasks`: the in-memory task list the agent uses to track its own work
//!
//! It deliberately contains no I/O — HTTP clients live in
//! `video-researcher-clients` and tool wiring in `video-researcher-tools`.

pub mod agent;
pub mod tasks;

pub use agent::{Tool, ToolError, ToolExecutorFn, ToolResult};
pub use tasks::{Task, TaskBook, TaskPriority, TaskStatus};
