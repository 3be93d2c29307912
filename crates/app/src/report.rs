//! Plain-text rendering shared by the menu and the one-shot commands.

use std::io::Write;

use engine::{EngineError, Row, Store, Summary};

/// Every category with its numbered transactions. Numbers start at 1 and
/// are the positions the user types for update/delete.
pub fn print_store(out: &mut impl Write, store: &Store) -> std::io::Result<()> {
    if store.is_empty() {
        return writeln!(out, "No transactions recorded.");
    }

    for category in store {
        writeln!(out, "\n{}:", category.name)?;
        if category.transactions.is_empty() {
            writeln!(out, "  (no transactions)")?;
        }
        for (i, tx) in category.transactions.iter().enumerate() {
            writeln!(out, "  {}. Amount: {}, Date: {}", i + 1, tx.amount, tx.date)?;
        }
    }
    Ok(())
}

/// Search results, grouped by category, numbered by their position in the
/// full store.
pub fn print_matches(out: &mut impl Write, term: &str, rows: &[Row]) -> std::io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No transactions match \"{term}\".");
    }

    let mut current: Option<&str> = None;
    for row in rows {
        if current != Some(row.category.as_str()) {
            writeln!(out, "\n{}:", row.category)?;
            current = Some(row.category.as_str());
        }
        writeln!(
            out,
            "  {}. Amount: {}, Date: {}",
            row.index + 1,
            row.amount,
            row.date
        )?;
    }
    Ok(())
}

/// One line per row, in the given order, each labelled with its category
/// and its position there.
pub fn print_rows(out: &mut impl Write, rows: &[Row]) -> std::io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No transactions recorded.");
    }
    for row in rows {
        writeln!(
            out,
            "{} {}. Amount: {}, Date: {}",
            row.category,
            row.index + 1,
            row.amount,
            row.date
        )?;
    }
    Ok(())
}

pub fn print_summary(out: &mut impl Write, summary: &Summary) -> std::io::Result<()> {
    writeln!(out, "\nSummary")?;
    match summary {
        Summary::NoTransactions => writeln!(out, "No transactions to display.")?,
        Summary::Totals {
            by_category,
            grand_total,
        } => {
            for (category, total) in by_category {
                writeln!(out, "{category}: {total}")?;
            }
            writeln!(out, "Total: {grand_total}")?;
        }
    }
    writeln!(out, "End of summary")
}

/// Message shown to the user for a recoverable engine error.
pub fn user_message(err: &EngineError) -> String {
    match err {
        EngineError::CategoryNotFound(_) => "Category not found.".to_string(),
        EngineError::IndexOutOfRange { len: 0, category, .. } => {
            format!("\"{category}\" has no transactions.")
        }
        EngineError::IndexOutOfRange { len, .. } => {
            format!("Invalid index. Enter a number from 1 to {len}.")
        }
        EngineError::InvalidAmount(reason) => {
            format!("Invalid amount: {reason}. Please enter a number.")
        }
        other => other.to_string(),
    }
}
