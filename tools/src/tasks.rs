//! Task tracking tools for agent self-organization
//!
//! Two tools over one shared [`TaskStore`]: `task_update` replaces the
//! whole task list in a single reconciliation pass, `task_list` reports the
//! current list and its summary. The store is an explicit handle created at
//! wiring time and cloned into both executors; there is no process-wide
//! task state.

use serde_json::json;
use std::sync::{Arc, RwLock};
use video_researcher_core::agent::{Tool, ToolError, ToolExecutorFn, ToolResult};
use video_researcher_core::tasks::{Task, TaskBook, TaskEntry};

/// Shared handle to the agent's task book
#[derive(Clone, Debug, Default)]
pub struct TaskStore {
    book: Arc<RwLock<TaskBook>>,
}

impl TaskStore {
    /// Create a store with an empty book
    #[must_use]
    pub fn new() -> Self {
        Self {
            book: Arc::new(RwLock::new(TaskBook::new())),
        }
    }
}

/// Serialize one task into the shape handed back to the agent
fn task_json(task: &Task) -> serde_json::Value {
    json!({
        "id": task.id,
        "content": task.content,
        "status": task.status,
        "priority": task.priority,
        "created_at": task.formatted_created_at(),
        "updated_at": task.formatted_updated_at(),
    })
}

fn summary_json(book: &TaskBook) -> serde_json::Value {
    let summary = book.summary();
    json!({
        "pending": summary.pending,
        "in_progress": summary.in_progress,
        "completed": summary.completed,
        "completion_percentage": summary.completion_percentage,
    })
}

/// Render the whole book: total, tasks, summary and message
fn book_json(book: &TaskBook) -> serde_json::Value {
    json!({
        "success": true,
        "total_tasks": book.len(),
        "message": book.summary().message(),
        "tasks": book.tasks().iter().map(task_json).collect::<Vec<_>>(),
        "summary": summary_json(book),
    })
}

/// Create the `task_update` tool
///
/// Replaces the entire task list in one call, the way an agent rewrites
/// its plan: items with a known id update that task, items without one
/// create new tasks, tasks not mentioned are dropped. Calling with no
/// `tasks` (or an empty list) just reports the current list.
///
/// Returns JSON:
/// ```json
/// {
///   "success": true,
///   "total_tasks": 2,
///   "stats": {"added": 1, "updated": 1, "unchanged": 0},
///   "tasks": [{"id": 1, "content": "…", "status": "pending"}]
/// }
/// ```
#[must_use]
pub fn task_update_tool(store: TaskStore) -> (Tool, ToolExecutorFn) {
    let tool = Tool {
        name: "task_update".to_string(),
        description: "Manage the complete task list in one operation: create, update, \
                      complete and reorder tasks. Call without 'tasks' to read the current list."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "tasks": {
                    "type": "array",
                    "description": "Complete task list to set",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "number",
                                "description": "Existing task id to update (omit to create)"
                            },
                            "content": {
                                "type": "string",
                                "description": "Task description"
                            },
                            "status": {
                                "type": "string",
                                "enum": ["pending", "in_progress", "completed"],
                                "description": "Task status (default pending)"
                            },
                            "priority": {
                                "type": "string",
                                "enum": ["low", "medium", "high"],
                                "description": "Task priority (default medium)"
                            }
                        },
                        "required": ["content"]
                    }
                }
            }
        }),
    };

    let executor = Arc::new(move |input: String| {
        let store = store.clone();
        Box::pin(async move {
            let parsed: serde_json::Value = serde_json::from_str(&input).map_err(|e| {
                ToolError {
                    message: format!("Invalid input JSON: {e}"),
                }
            })?;

            let items = match &parsed["tasks"] {
                serde_json::Value::Null => Vec::new(),
                serde_json::Value::Array(items) => items.clone(),
                _ => {
                    return Err(ToolError {
                        message: "'tasks' must be an array of task items".to_string(),
                    });
                }
            };

            #[allow(clippy::expect_used)]
            let mut book = store
                .book
                .write()
                .expect("Task store lock poisoned - indicates a panic in another thread");

            // No items means read, not clear.
            if items.is_empty() {
                return Ok(book_json(&book).to_string());
            }

            let mut entries = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                if !item.is_object() {
                    return Ok(json!({
                        "success": false,
                        "error": format!("Task item {i} must be an object"),
                    })
                    .to_string());
                }
                if item["content"].as_str().is_none_or(str::is_empty) {
                    return Ok(json!({
                        "success": false,
                        "error": format!("Task item {i} missing required 'content' field"),
                    })
                    .to_string());
                }
                match serde_json::from_value::<TaskEntry>(item.clone()) {
                    Ok(entry) => entries.push(entry),
                    Err(e) => {
                        return Ok(json!({
                            "success": false,
                            "error": format!("Task item {i} is invalid: {e}"),
                        })
                        .to_string());
                    }
                }
            }

            let stats = book.reconcile(entries);

            let output = json!({
                "success": true,
                "total_tasks": book.len(),
                "stats": stats,
                "tasks": book.tasks().iter().map(task_json).collect::<Vec<_>>(),
                "summary": summary_json(&book),
            });

            Ok(output.to_string())
        }) as std::pin::Pin<
            Box<dyn std::future::Future<Output = ToolResult> + Send>,
        >
    }) as ToolExecutorFn;

    (tool, executor)
}

/// Create the `task_list` tool
///
/// Reports the current task list with per-status counts and completion
/// percentage.
///
/// Returns JSON:
/// ```json
/// {
///   "success": true,
///   "total_tasks": 3,
///   "message": "Found 3 tasks: 1 pending, 1 in progress, 1 completed (33.3% complete)",
///   "tasks": [{"id": 1, "content": "…", "status": "pending"}]
/// }
/// ```
#[must_use]
pub fn task_list_tool(store: TaskStore) -> (Tool, ToolExecutorFn) {
    let tool = Tool {
        name: "task_list".to_string(),
        description: "Get the current task list with status counts and completion percentage"
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {}
        }),
    };

    let executor = Arc::new(move |_input: String| {
        let store = store.clone();
        Box::pin(async move {
            #[allow(clippy::expect_used)]
            let book = store
                .book
                .read()
                .expect("Task store lock poisoned - indicates a panic in another thread");

            Ok(book_json(&book).to_string())
        }) as std::pin::Pin<
            Box<dyn std::future::Future<Output = ToolResult> + Send>,
        >
    }) as ToolExecutorFn;

    (tool, executor)
}
