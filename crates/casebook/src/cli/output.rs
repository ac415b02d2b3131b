//! Output formatting utilities for CLI commands
//!
//! Provides consistent formatting for tables, timestamps, and status colors.

use casebook_protocol::{CaseStatus, Pagination, ReportStatus, StatementStatus};
use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};

/// Print a table with headers and rows
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row);
    }

    println!("{}", table);
}

/// Print a table whose cells carry their own styling
pub fn print_cell_table(headers: &[&str], rows: Vec<Vec<Cell>>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row);
    }

    println!("{}", table);
}

/// Footer line for a paginated listing
pub fn print_pagination(shown: usize, pagination: &Pagination, noun: &str) {
    println!(
        "Showing {} of {} {} (page {} of {})",
        shown, pagination.total, noun, pagination.current, pagination.pages
    );
}

/// Format a timestamp as a relative age, falling back to the date for
/// anything older than a month
pub fn format_age(time: DateTime<Utc>) -> String {
    let elapsed = Utc::now().signed_duration_since(time);
    let secs = elapsed.num_seconds();
    if secs < 0 {
        return time.format("%Y-%m-%d").to_string();
    }
    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else if secs < 30 * 86_400 {
        format!("{}d ago", secs / 86_400)
    } else {
        time.format("%Y-%m-%d").to_string()
    }
}

pub fn case_status_color(status: CaseStatus) -> Color {
    match status {
        CaseStatus::Open => Color::Yellow,
        CaseStatus::Pending => Color::Blue,
        CaseStatus::Closed => Color::Green,
    }
}

pub fn statement_status_color(status: StatementStatus) -> Color {
    match status {
        StatementStatus::Pending => Color::Yellow,
        StatementStatus::Reviewed => Color::Blue,
        StatementStatus::Verified => Color::Green,
    }
}

pub fn report_status_color(status: ReportStatus) -> Color {
    match status {
        ReportStatus::Draft => Color::Yellow,
        ReportStatus::Final => Color::Green,
    }
}
