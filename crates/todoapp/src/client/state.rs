//! # Client State
//!
//! [`TaskState`] is the client's copy of the list plus the view and UI flags.
//! It is only changed by the pure functions in this module:
//!
//! - [`begin`]: a user [`Intent`] against the prior state gives the next state and
//!   the [`Effect`] the session must perform (networked variant)
//! - [`settle`]: the [`Outcome`] of that effect gives the next state
//! - [`apply_local`]: intent applied directly, followed by a [`Effect::Persist`]
//!   (local-only variant)
//!
//! In the networked variant `tasks` changes only in [`settle`], and only on
//! success. A failed request leaves `tasks` as it was and raises a [`Notice`].
//!
//! `adding` is the add control's busy flag. An Add sets it and every completion
//! of that Add clears it. A second Add while it is set is ignored.

use super::render::{remaining_label, render, DisplayRow, Filter};
use crate::model::{normalize_text, Todo};
use chrono::{DateTime, Duration, Utc};

/// Seconds a notice stays visible.
pub const NOTICE_TTL_SECS: i64 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.raised_at >= Duration::seconds(NOTICE_TTL_SECS)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskState {
    pub tasks: Vec<Todo>,
    pub current_filter: Filter,
    pub adding: bool,
    pub notices: Vec<Notice>,
}

impl TaskState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Todo>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    pub fn find(&self, id: &str) -> Option<&Todo> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn rows(&self) -> Vec<DisplayRow> {
        render(&self.tasks, self.current_filter)
    }

    pub fn remaining(&self) -> String {
        remaining_label(&self.tasks)
    }

    pub fn raise(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        self.notices.push(Notice {
            message: message.into(),
            raised_at: now,
        });
    }

    /// Drop notices older than [`NOTICE_TTL_SECS`].
    pub fn prune_notices(&mut self, now: DateTime<Utc>) {
        self.notices.retain(|n| !n.is_expired(now));
    }

    pub fn visible_notices(&self, now: DateTime<Utc>) -> Vec<&Notice> {
        self.notices.iter().filter(|n| !n.is_expired(now)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add(String),
    Toggle(String),
    Delete(String),
    ClearCompleted,
    SetFilter(Filter),
}

/// Remote or storage operation, used to pick the failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Add,
    Toggle,
    Delete,
    Clear,
    Save,
}

impl Operation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Fetch => "Failed to fetch tasks",
            Operation::Add => "Failed to add task",
            Operation::Toggle => "Failed to update task",
            Operation::Delete => "Failed to delete task",
            Operation::Clear => "Failed to clear completed tasks",
            Operation::Save => "Failed to save tasks",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Create { text: String },
    SetCompleted { id: String, completed: bool },
    Delete { id: String },
    ClearCompleted,
    /// Write the whole list to local storage.
    Persist,
}

impl Effect {
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Effect::None => None,
            Effect::Create { .. } => Some(Operation::Add),
            Effect::SetCompleted { .. } => Some(Operation::Toggle),
            Effect::Delete { .. } => Some(Operation::Delete),
            Effect::ClearCompleted => Some(Operation::Clear),
            Effect::Persist => Some(Operation::Save),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Fetched(Vec<Todo>),
    Created(Todo),
    Updated(Todo),
    Deleted(String),
    Cleared,
    Failed(Operation),
}

/// What a session did with an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Applied,
    /// The intent was a no-op (blank text, unknown id, add already in flight).
    Ignored,
    Failed,
}

pub fn begin(mut state: TaskState, intent: Intent) -> (TaskState, Effect) {
    let effect = match intent {
        Intent::SetFilter(filter) => {
            state.current_filter = filter;
            Effect::None
        }
        Intent::Add(raw) => {
            if state.adding {
                return (state, Effect::None);
            }
            match normalize_text(&raw) {
                Some(text) => {
                    state.adding = true;
                    Effect::Create { text }
                }
                None => Effect::None,
            }
        }
        Intent::Toggle(id) => match state.find(&id) {
            Some(todo) => Effect::SetCompleted {
                completed: !todo.completed,
                id,
            },
            None => Effect::None,
        },
        Intent::Delete(id) => Effect::Delete { id },
        Intent::ClearCompleted => Effect::ClearCompleted,
    };
    (state, effect)
}

pub fn settle(mut state: TaskState, outcome: Outcome, now: DateTime<Utc>) -> TaskState {
    state.prune_notices(now);
    match outcome {
        Outcome::Fetched(tasks) => state.tasks = tasks,
        Outcome::Created(todo) => {
            state.adding = false;
            state.tasks.push(todo);
        }
        Outcome::Updated(todo) => {
            if let Some(slot) = state.tasks.iter_mut().find(|t| t.id == todo.id) {
                *slot = todo;
            }
        }
        Outcome::Deleted(id) => state.tasks.retain(|t| t.id != id),
        Outcome::Cleared => state.tasks.retain(|t| !t.completed),
        Outcome::Failed(operation) => {
            if operation == Operation::Add {
                state.adding = false;
            }
            state.raise(operation.failure_message(), now);
        }
    }
    state
}

/// Local-only transition: mutate the list directly.
///
/// `new_id` is called only when a task is actually created.
pub fn apply_local(
    mut state: TaskState,
    intent: Intent,
    new_id: impl FnOnce() -> String,
    now: DateTime<Utc>,
) -> (TaskState, Effect) {
    let changed = match intent {
        Intent::SetFilter(filter) => {
            state.current_filter = filter;
            false
        }
        Intent::Add(raw) => match normalize_text(&raw) {
            Some(text) => {
                state.tasks.push(Todo::new(new_id(), text).with_created_at(now));
                true
            }
            None => false,
        },
        Intent::Toggle(id) => match state.tasks.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.completed = !todo.completed;
                true
            }
            None => false,
        },
        Intent::Delete(id) => {
            let before = state.tasks.len();
            state.tasks.retain(|t| t.id != id);
            state.tasks.len() != before
        }
        Intent::ClearCompleted => {
            let before = state.tasks.len();
            state.tasks.retain(|t| !t.completed);
            state.tasks.len() != before
        }
    };

    let effect = if changed { Effect::Persist } else { Effect::None };
    (state, effect)
}
