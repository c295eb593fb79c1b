use chrono::{DateTime, Utc};
use colored::Colorize;
use timeago::Formatter;
use todoapp::client::{DisplayRow, Notice, TaskState};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;

pub(super) fn print_view(state: &TaskState) {
    for row in state.rows() {
        println!("{}", format_row(&row));
    }
    println!();
    println!("{}", state.remaining().dimmed());
}

/// Notices go to stderr so stdout stays the list.
pub(super) fn print_notices(notices: &[&Notice]) {
    for notice in notices {
        eprintln!("{}", notice.message.red());
    }
}

fn format_row(row: &DisplayRow) -> String {
    match row {
        DisplayRow::Placeholder(text) => text.dimmed().to_string(),
        DisplayRow::Task {
            id,
            text,
            completed,
            created_at,
        } => {
            let marker = if *completed { "[x]" } else { "[ ]" };
            let prefix_width = marker.width() + 1 + id.width() + 2;
            let available = LINE_WIDTH.saturating_sub(prefix_width + TIME_WIDTH);

            let text_display = truncate_to_width(text, available);
            let padding = available.saturating_sub(text_display.width());

            let marker = if *completed {
                marker.green()
            } else {
                marker.normal()
            };
            let text_display = if *completed {
                text_display.dimmed().strikethrough()
            } else {
                text_display.normal()
            };

            format!(
                "{} {}  {}{}{}",
                marker,
                id.yellow(),
                text_display,
                " ".repeat(padding),
                format_time_ago(*created_at).dimmed()
            )
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
