//! Read-time metrics. Nothing here is stored.

use crate::task::Task;
use crate::tree::{find_todo_list_by_id, ComponentNode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 1440;

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{} {}", n, unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

/// Render a millisecond span in whole minutes, hours or days (floored).
pub fn format_duration(ms: i64) -> String {
    let minutes = ms.max(0) / 60_000;
    if minutes < MINUTES_PER_HOUR {
        plural(minutes, "min")
    } else if minutes < MINUTES_PER_DAY {
        plural(minutes / MINUTES_PER_HOUR, "hour")
    } else {
        plural(minutes / MINUTES_PER_DAY, "day")
    }
}

fn span_ms(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_milliseconds()
}

/// Age of the task, or its lead time once `completed_at` is set.
pub fn task_duration(task: &Task, now: DateTime<Utc>) -> String {
    let end = task.completed_at.unwrap_or(now);
    format_duration(span_ms(task.created_at, end))
}

/// Time since the task entered its current column.
pub fn column_duration(task: &Task, now: DateTime<Utc>) -> String {
    format_duration(span_ms(task.entered_column_at(), now))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkedProgress {
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
}

impl LinkedProgress {
    pub fn new(completed: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            ((200 * completed + total) / (2 * total)) as u32
        };
        Self {
            completed,
            total,
            percentage,
        }
    }
}

impl fmt::Display for LinkedProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({}%)", self.completed, self.total, self.percentage)
    }
}

/// Completion of the task's linked todo list, if the link resolves.
pub fn linked_todo_list_progress(task: &Task, forest: &[ComponentNode]) -> Option<LinkedProgress> {
    let list_id = task.linked_todo_list.as_deref()?;
    let list = find_todo_list_by_id(forest, list_id)?;
    Some(LinkedProgress::new(list.completed_count(), list.items.len()))
}

/// Everything a card displays about time and progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetrics {
    pub task_duration: String,
    pub column_duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_progress: Option<String>,
}

impl TaskMetrics {
    pub fn compute(task: &Task, forest: &[ComponentNode], now: DateTime<Utc>) -> Self {
        Self {
            task_duration: task_duration(task, now),
            column_duration: column_duration(task, now),
            linked_progress: linked_todo_list_progress(task, forest).map(|p| p.to_string()),
        }
    }
}
