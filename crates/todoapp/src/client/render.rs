//! Renderer: a pure function of `(tasks, filter)`.

use crate::model::Todo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const EMPTY_LIST_TEXT: &str = "No tasks yet! Add one above.";

/// View predicate over the task list. Never affects stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" => Ok(Filter::Completed),
            other => Err(format!(
                "unknown filter '{}', expected all, active or completed",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRow {
    Task {
        id: String,
        text: String,
        completed: bool,
        created_at: DateTime<Utc>,
    },
    /// Shown instead of task rows when the filtered list is empty.
    Placeholder(String),
}

pub fn render(tasks: &[Todo], filter: Filter) -> Vec<DisplayRow> {
    let rows: Vec<DisplayRow> = tasks
        .iter()
        .filter(|t| filter.matches(t))
        .map(|t| DisplayRow::Task {
            id: t.id.clone(),
            text: t.text.clone(),
            completed: t.completed,
            created_at: t.created_at,
        })
        .collect();

    if rows.is_empty() {
        vec![DisplayRow::Placeholder(placeholder_text(filter))]
    } else {
        rows
    }
}

pub fn placeholder_text(filter: Filter) -> String {
    match filter {
        Filter::All => EMPTY_LIST_TEXT.to_string(),
        other => format!("No {} tasks.", other),
    }
}

pub fn remaining_count(tasks: &[Todo]) -> usize {
    tasks.iter().filter(|t| t.is_active()).count()
}

/// "1 task remaining" / "N tasks remaining".
pub fn remaining_label(tasks: &[Todo]) -> String {
    let count = remaining_count(tasks);
    let plural = if count == 1 { "" } else { "s" };
    format!("{} task{} remaining", count, plural)
}
