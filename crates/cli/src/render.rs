//! Plain-text output. Tables and notices go to stdout, failures to stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use dairy_ledger_client::Freshness;
use dairy_ledger_core::{Amount, PageView, Totals};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::commands::CommandError;

/// Print a failure the way the app shows an alert.
pub fn failure(error: &CommandError) {
    eprintln!("Error: {error}");
}

/// Print a success notice, falling back to `default` when the backend sent
/// no message.
pub fn done(message: Option<String>, default: &str) {
    println!("{}", message.unwrap_or_else(|| default.to_string()));
}

/// Print one line.
pub fn line(text: &str) {
    println!("{text}");
}

/// Warn that a list came from the offline snapshot.
pub fn freshness(freshness: Freshness) {
    if freshness == Freshness::Cached {
        println!("(offline: showing last saved list)");
    }
}

/// Column-aligned table.
pub fn table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    println!("{}", format_row(headers.iter().copied(), &widths));
    println!(
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ")
    );
    for row in rows {
        println!("{}", format_row(row.iter().map(String::as_str), &widths));
    }
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Print the visible page as a table followed by its position.
pub fn page<T>(view: &PageView<'_, T>, headers: &[&str], row: impl Fn(&T) -> Vec<String>) {
    if view.is_empty() {
        println!("No records found");
        return;
    }
    let rows: Vec<Vec<String>> = view.items().iter().map(|r| row(r)).collect();
    table(headers, &rows);
    println!(
        "\nPage {}/{} ({}){}",
        view.page(),
        view.total_pages(),
        view.range_label(),
        if view.filtered_count() == view.total_count() {
            String::new()
        } else {
            format!(", filtered from {}", view.total_count())
        }
    );
}

/// Litres with up to two decimals, e.g. `12.5 L`.
pub fn litres(value: f64) -> String {
    let rounded = Decimal::from_f64(value).unwrap_or_default().round_dp(2).normalize();
    format!("{rounded} L")
}

/// Rupees from a floating-point total, e.g. `₹800.00`.
pub fn rupees(value: f64) -> String {
    Amount::new(Decimal::from_f64(value).unwrap_or_default()).display()
}

/// Print a totals line. `quantity`/`amount` are skipped when irrelevant.
pub fn totals(totals: &Totals, quantity: bool, amount: bool) {
    let mut parts = vec![format!("{} records", totals.count)];
    if quantity {
        parts.push(format!("total {}", litres(totals.quantity)));
    }
    if amount {
        parts.push(format!("total {}", rupees(totals.amount)));
    }
    println!("{}", parts.join(", "));
}
