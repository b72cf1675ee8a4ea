//! In-memory task tracking for agent self-organization
//!
//! The agent keeps a small task list to plan and track its own work. The
//! whole list is replaced in one reconciliation pass per tool call: entries
//! carrying a known id update the matching task in place, entries without
//! one (or with an unknown id) become new tasks.
//!
//! [`TaskBook`] is an explicit mutable context object. Every operation takes
//! it by exclusive reference; callers that share it across tool calls wrap
//! it in their own synchronization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet
    #[default]
    Pending,
    /// Currently being worked on
    InProgress,
    /// Done
    Completed,
}

/// Task priority
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Nice to have
    Low,
    /// Normal
    #[default]
    Medium,
    /// Do first
    High,
}

/// Individual work item tracked by the agent
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique ID within one [`TaskBook`]
    pub id: u64,
    /// Task description
    pub content: String,
    /// Current status
    pub status: TaskStatus,
    /// Current priority
    pub priority: TaskPriority,
    /// When the task was created
    pub created_at: DateTime<Utc>,
    /// When the task last changed
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Mark task as completed
    pub fn mark_completed(&mut self) {
        self.status = TaskStatus::Completed;
        self.updated_at = Utc::now();
    }

    /// Mark task as in progress
    pub fn mark_in_progress(&mut self) {
        self.status = TaskStatus::InProgress;
        self.updated_at = Utc::now();
    }

    /// Mark task as pending
    pub fn mark_pending(&mut self) {
        self.status = TaskStatus::Pending;
        self.updated_at = Utc::now();
    }

    /// Update task content
    pub fn update_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.updated_at = Utc::now();
    }

    /// Update task priority
    pub fn update_priority(&mut self, priority: TaskPriority) {
        self.priority = priority;
        self.updated_at = Utc::now();
    }

    /// Creation time as `YYYY-MM-DD HH:MM:SS`
    #[must_use]
    pub fn formatted_created_at(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Last-change time as `YYYY-MM-DD HH:MM:SS`
    #[must_use]
    pub fn formatted_updated_at(&self) -> String {
        self.updated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Check if task is completed
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Check if task is in progress
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.status == TaskStatus::InProgress
    }

    /// Check if task is pending
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }
}

/// Incoming task description consumed by [`TaskBook::reconcile`]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TaskEntry {
    /// Existing task id to update; absent to create a new task
    #[serde(default)]
    pub id: Option<u64>,
    /// Task description
    pub content: String,
    /// Desired status (defaults to pending)
    #[serde(default)]
    pub status: TaskStatus,
    /// Desired priority (defaults to medium)
    #[serde(default)]
    pub priority: TaskPriority,
}

/// Counts of what one reconciliation pass did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileStats {
    /// Tasks created
    pub added: usize,
    /// Existing tasks whose content, status or priority changed
    pub updated: usize,
    /// Existing tasks the pass left untouched
    pub unchanged: usize,
}

/// Aggregate view over a [`TaskBook`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    /// Total number of tasks
    pub total: usize,
    /// Tasks still pending
    pub pending: usize,
    /// Tasks in progress
    pub in_progress: usize,
    /// Tasks completed
    pub completed: usize,
    /// Completed share in percent (0.0 for an empty book)
    pub completion_percentage: f64,
}

impl TaskSummary {
    /// Human-readable one-line summary
    #[must_use]
    pub fn message(&self) -> String {
        if self.total == 0 {
            return "No tasks found. Use task management to create your first task list."
                .to_string();
        }
        format!(
            "Found {} tasks: {} pending, {} in progress, {} completed ({:.1}% complete)",
            self.total, self.pending, self.in_progress, self.completed, self.completion_percentage
        )
    }
}

/// The agent's task list with its id counter
///
/// Ids are sequential and never reused within one book.
#[derive(Clone, Debug, Default)]
pub struct TaskBook {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskBook {
    /// Create an empty book
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Current tasks in list order
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks in the book
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check whether the book holds no tasks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    /// Replace the task list with the reconciled form of `entries`
    ///
    /// Entries whose id matches an existing task update it in place,
    /// keeping its `created_at` and bumping `updated_at` only when content,
    /// status or priority actually changed. All other entries create new
    /// tasks (an explicit unknown id is kept and reserved). The resulting
    /// list follows entry order; tasks not mentioned are dropped.
    pub fn reconcile(&mut self, entries: Vec<TaskEntry>) -> ReconcileStats {
        let existing = std::mem::take(&mut self.tasks);
        let mut stats = ReconcileStats::default();
        let mut reconciled = Vec::with_capacity(entries.len());

        for entry in entries {
            let matched = entry
                .id
                .and_then(|id| existing.iter().find(|task| task.id == id));

            if let Some(task) = matched {
                let mut task = task.clone();
                let before = (task.content.clone(), task.status, task.priority);
                task.content = entry.content;
                task.status = entry.status;
                task.priority = entry.priority;
                let after = (task.content.clone(), task.status, task.priority);

                if before == after {
                    stats.unchanged += 1;
                } else {
                    task.updated_at = Utc::now();
                    stats.updated += 1;
                }
                reconciled.push(task);
            } else {
                let id = match entry.id {
                    Some(id) => {
                        self.next_id = self.next_id.max(id + 1);
                        id
                    }
                    None => self.allocate_id(),
                };
                let now = Utc::now();
                reconciled.push(Task {
                    id,
                    content: entry.content,
                    status: entry.status,
                    priority: entry.priority,
                    created_at: now,
                    updated_at: now,
                });
                stats.added += 1;
            }
        }

        self.tasks = reconciled;
        stats
    }

    /// Aggregate counts and completion percentage
    #[must_use]
    pub fn summary(&self) -> TaskSummary {
        let total = self.tasks.len();
        let pending = self.tasks.iter().filter(|t| t.is_pending()).count();
        let in_progress = self.tasks.iter().filter(|t| t.is_in_progress()).count();
        let completed = self.tasks.iter().filter(|t| t.is_completed()).count();

        #[allow(clippy::cast_precision_loss)]
        let completion_percentage = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };

        TaskSummary {
            total,
            pending,
            in_progress,
            completed,
            completion_percentage,
        }
    }
}
