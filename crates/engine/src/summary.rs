//! Per-category totals and the grand total.

use crate::{Amount, EngineError, ResultEngine, Store};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Summary {
    /// The store holds no transaction in any category.
    NoTransactions,
    Totals {
        /// One entry per category, in store order. Empty categories total 0.
        by_category: Vec<(String, Amount)>,
        grand_total: Amount,
    },
}

/// Totals every category of `store`.
///
/// The "no transactions" case is decided on the store as a whole, never on a
/// single category's total, so a store whose amounts cancel out to zero still
/// gets a table. A total that does not fit a finite amount is
/// [`EngineError::TotalOverflow`].
pub fn summarize(store: &Store) -> ResultEngine<Summary> {
    if !store.has_transactions() {
        return Ok(Summary::NoTransactions);
    }

    let by_category = store
        .iter()
        .map(|category| {
            let total = category
                .total()
                .ok_or_else(|| EngineError::TotalOverflow(format!("\"{}\"", category.name)))?;
            Ok((category.name.clone(), total))
        })
        .collect::<ResultEngine<Vec<(String, Amount)>>>()?;
    let grand_total = Amount::checked_sum(by_category.iter().map(|(_, total)| *total))
        .ok_or_else(|| EngineError::TotalOverflow("all categories".to_string()))?;

    Ok(Summary::Totals {
        by_category,
        grand_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(value: f64) -> Amount {
        Amount::new(value).unwrap()
    }

    fn totals(summary: Summary) -> (Vec<(String, Amount)>, Amount) {
        match summary {
            Summary::Totals {
                by_category,
                grand_total,
            } => (by_category, grand_total),
            Summary::NoTransactions => panic!("expected totals"),
        }
    }

    #[test]
    fn totals_per_category_and_overall() {
        let mut store = Store::new();
        store.add_transaction("food", "2024-01-01", amount(10.0));
        store.add_transaction("food", "2024-01-02", amount(20.0));
        store.add_transaction("rent", "2024-01-03", amount(500.0));

        assert_eq!(
            summarize(&store).unwrap(),
            Summary::Totals {
                by_category: vec![
                    ("food".to_string(), amount(30.0)),
                    ("rent".to_string(), amount(500.0)),
                ],
                grand_total: amount(530.0),
            }
        );
    }

    #[test]
    fn empty_store_reports_no_transactions() {
        assert_eq!(summarize(&Store::new()).unwrap(), Summary::NoTransactions);
    }

    #[test]
    fn only_empty_categories_report_no_transactions() {
        let mut store = Store::new();
        store.add_transaction("food", "2024-01-01", amount(10.0));
        store.delete_transaction("food", 0).unwrap();

        assert_eq!(summarize(&store).unwrap(), Summary::NoTransactions);
    }

    #[test]
    fn empty_category_contributes_zero() {
        let mut store = Store::new();
        store.add_transaction("rent", "2024-01-01", amount(5.0));
        store.delete_transaction("rent", 0).unwrap();
        store.add_transaction("food", "2024-01-02", amount(2.5));

        let (by_category, grand_total) = totals(summarize(&store).unwrap());
        assert_eq!(
            by_category,
            vec![
                ("rent".to_string(), Amount::ZERO),
                ("food".to_string(), amount(2.5)),
            ]
        );
        assert_eq!(grand_total, amount(2.5));
    }

    #[test]
    fn last_category_zero_still_shows_table() {
        let mut store = Store::new();
        store.add_transaction("salary", "2024-01-01", amount(100.0));
        store.add_transaction("refund", "2024-01-02", amount(5.0));
        store.add_transaction("refund", "2024-01-03", amount(-5.0));

        let (_, grand_total) = totals(summarize(&store).unwrap());
        assert_eq!(grand_total, amount(100.0));
    }

    #[test]
    fn grand_total_overflow_is_reported() {
        let mut store = Store::new();
        store.add_transaction("a", "2024-01-01", amount(1e308));
        store.add_transaction("b", "2024-01-02", amount(1e308));

        assert_eq!(
            summarize(&store),
            Err(EngineError::TotalOverflow("all categories".to_string()))
        );
    }

    #[test]
    fn category_total_overflow_names_the_category() {
        let mut store = Store::new();
        store.add_transaction("a", "2024-01-01", amount(-1e308));
        store.add_transaction("a", "2024-01-02", amount(-1e308));

        let err = summarize(&store).unwrap_err();
        assert_eq!(err, EngineError::TotalOverflow("\"a\"".to_string()));
        assert_eq!(err.to_string(), "total of \"a\" is too large to display");
    }
}
