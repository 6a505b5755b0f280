//! Plain-text rendering of the console state

use std::fmt::Write;

use shared::models::Employee;

use crate::state::{ConsoleState, ListStatus};

const HEADERS: [&str; 6] = ["#", "Name", "Username", "Shift", "Status", "Avatar"];

/// Render the status line (if any) followed by the employee table
pub fn render(state: &ConsoleState) -> String {
    let mut out = String::new();
    match state.status() {
        ListStatus::Loading => out.push_str("Loading...\n"),
        ListStatus::Failed(message) => {
            let _ = writeln!(out, "Error: {message}");
        }
        ListStatus::Idle => {}
    }
    out.push_str(&render_table(state.employees()));
    out
}

pub fn render_table(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return "No employees found\n".to_string();
    }

    let rows: Vec<[String; 6]> = employees
        .iter()
        .enumerate()
        .map(|(i, e)| {
            [
                (i + 1).to_string(),
                e.full_name.clone(),
                e.username.clone(),
                e.shift.label().to_string(),
                e.status.label().to_string(),
                if e.avatar_data_uri().is_some() { "yes" } else { "-" }.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}
