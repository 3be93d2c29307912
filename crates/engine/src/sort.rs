//! Ordering of the flattened, displayed rows.
//!
//! Sorting works on [`Row`]s, never on the [`Store`](crate::Store) itself, so
//! the stored order is untouched.

use std::cmp::Ordering;

use crate::Amount;

/// One displayed line: a transaction tagged with its category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub category: String,
    /// Position of the transaction inside its category in the store the row
    /// was built from.
    pub index: usize,
    pub amount: Amount,
    pub date: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Category,
    Amount,
    Date,
}

impl SortField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Amount => "Amount",
            Self::Date => "Date",
        }
    }

    fn compare(self, a: &Row, b: &Row) -> Ordering {
        match self {
            Self::Category => a.category.cmp(&b.category),
            Self::Amount => a.amount.cmp(&b.amount),
            Self::Date => a.date.cmp(&b.date),
        }
    }
}

impl TryFrom<&str> for SortField {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "category" => Ok(Self::Category),
            "amount" => Ok(Self::Amount),
            "date" => Ok(Self::Date),
            other => Err(format!("unknown sort field: {other}")),
        }
    }
}

/// Stable in-place sort. Rows with equal keys keep their relative order in
/// both directions.
pub fn sort_rows(rows: &mut [Row], field: SortField, descending: bool) {
    if descending {
        rows.sort_by(|a, b| field.compare(b, a));
    } else {
        rows.sort_by(|a, b| field.compare(a, b));
    }
}

/// Returns `rows` ordered by `field`.
pub fn sort_by(mut rows: Vec<Row>, field: SortField, descending: bool) -> Vec<Row> {
    sort_rows(&mut rows, field, descending);
    rows
}

/// Column-header toggle: asking for the active field again flips the
/// direction, asking for another field starts ascending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(SortField, bool)>,
}

impl SortState {
    /// Applies the toggle rule for `field` and returns the resulting
    /// `(field, descending)` pair.
    pub fn toggle(&mut self, field: SortField) -> (SortField, bool) {
        let descending = match self.active {
            Some((current, descending)) if current == field => !descending,
            _ => false,
        };
        self.active = Some((field, descending));
        (field, descending)
    }

    /// The active field and whether it is descending.
    pub fn current(&self) -> Option<(SortField, bool)> {
        self.active
    }

    /// Sorts `rows` by the active field; leaves them alone when none is set.
    pub fn apply(&self, rows: &mut [Row]) {
        if let Some((field, descending)) = self.active {
            sort_rows(rows, field, descending);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, amount: f64, date: &str) -> Row {
        Row {
            category: category.to_string(),
            index: 0,
            amount: Amount::new(amount).unwrap(),
            date: date.to_string(),
        }
    }

    fn categories(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r.category.as_str()).collect()
    }

    #[test]
    fn sorts_by_amount_both_directions() {
        let rows = vec![row("b", 5.0, "2024-02-01"), row("a", 10.0, "2024-01-01")];

        let ascending = sort_by(rows.clone(), SortField::Amount, false);
        assert_eq!(categories(&ascending), ["b", "a"]);

        let descending = sort_by(rows, SortField::Amount, true);
        assert_eq!(categories(&descending), ["a", "b"]);
    }

    #[test]
    fn amount_compares_numerically_not_as_text() {
        let rows = vec![row("x", 100.0, "d"), row("y", 9.0, "d"), row("z", -20.0, "d")];
        let sorted = sort_by(rows, SortField::Amount, false);
        assert_eq!(categories(&sorted), ["z", "y", "x"]);
    }

    #[test]
    fn sorts_by_category_and_date_lexicographically() {
        let rows = vec![row("b", 5.0, "2024-02-01"), row("a", 10.0, "2024-01-01")];

        assert_eq!(
            categories(&sort_by(rows.clone(), SortField::Category, false)),
            ["a", "b"]
        );
        assert_eq!(
            categories(&sort_by(rows.clone(), SortField::Date, false)),
            ["a", "b"]
        );
        assert_eq!(categories(&sort_by(rows, SortField::Date, true)), ["b", "a"]);
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let rows = vec![
            row("first", 1.0, "2024-01-01"),
            row("second", 1.0, "2024-01-01"),
            row("third", 1.0, "2024-01-01"),
        ];
        for descending in [false, true] {
            let sorted = sort_by(rows.clone(), SortField::Amount, descending);
            assert_eq!(categories(&sorted), ["first", "second", "third"]);
        }
    }

    #[test]
    fn toggle_flips_same_field_and_resets_on_new_field() {
        let mut state = SortState::default();
        assert_eq!(state.current(), None);

        assert_eq!(state.toggle(SortField::Date), (SortField::Date, false));
        assert_eq!(state.toggle(SortField::Date), (SortField::Date, true));
        assert_eq!(state.toggle(SortField::Date), (SortField::Date, false));
        assert_eq!(state.toggle(SortField::Date), (SortField::Date, true));

        assert_eq!(state.toggle(SortField::Category), (SortField::Category, false));
        assert_eq!(state.toggle(SortField::Category), (SortField::Category, true));
        assert_eq!(state.toggle(SortField::Amount), (SortField::Amount, false));
        assert_eq!(state.current(), Some((SortField::Amount, false)));
    }

    #[test]
    fn apply_without_field_keeps_order() {
        let mut rows = vec![row("b", 5.0, "x"), row("a", 1.0, "y")];
        SortState::default().apply(&mut rows);
        assert_eq!(categories(&rows), ["b", "a"]);
    }

    #[test]
    fn parses_field_names() {
        assert_eq!(SortField::try_from("Amount"), Ok(SortField::Amount));
        assert_eq!(SortField::try_from("date"), Ok(SortField::Date));
        assert!(SortField::try_from("note").is_err());
    }
}
