//! Substring search over the store.

use crate::{Amount, Row, Store, Transaction};

/// Returns the part of `store` matching `term`.
///
/// A transaction is kept when the term appears, ignoring case, in its date or
/// in its category name, or appears verbatim in its amount's text. Categories
/// left without transactions are dropped. An empty term keeps every
/// transaction.
pub fn search(store: &Store, term: &str) -> Store {
    let needle = term.to_lowercase();
    let mut result = Store::new();

    for category in store {
        let kept: Vec<Transaction> = category
            .transactions
            .iter()
            .filter(|tx| matches(&category.name, &tx.date, tx.amount, term, &needle))
            .cloned()
            .collect();
        if !kept.is_empty() {
            result.insert_category(category.name.clone(), kept);
        }
    }

    tracing::debug!(
        term,
        matched = result.transaction_count(),
        "search finished"
    );
    result
}

/// Same filter as [`search`], flattened into rows. Each row keeps its
/// position in `store`, not in the filtered result, so it can be handed back
/// to an update or delete.
pub fn search_rows(store: &Store, term: &str) -> Vec<Row> {
    let needle = term.to_lowercase();
    let mut rows = store.rows();
    rows.retain(|row| matches(&row.category, &row.date, row.amount, term, &needle));
    rows
}

/// `needle` is `term` lowercased; the amount is matched against `term` as typed.
fn matches(category: &str, date: &str, amount: Amount, term: &str, needle: &str) -> bool {
    date.to_lowercase().contains(needle)
        || amount.to_string().contains(term)
        || category.to_lowercase().contains(needle)
}
