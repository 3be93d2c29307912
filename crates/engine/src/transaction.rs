//! Transaction primitives.
//!
//! A `Transaction` is one recorded monetary event. It carries no id: it is
//! identified by its position inside its category.

use serde::{Deserialize, Serialize};

use crate::Amount;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Free-form `YYYY-MM-DD` text. Not checked against the calendar.
    pub date: String,
    pub amount: Amount,
}

impl Transaction {
    pub fn new(date: impl Into<String>, amount: Amount) -> Self {
        Self {
            date: date.into(),
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_unknown_fields() {
        let tx: Transaction =
            serde_json::from_str(r#"{"amount": 4.5, "date": "2024-03-01", "note": "x"}"#).unwrap();
        assert_eq!(tx, Transaction::new("2024-03-01", Amount::new(4.5).unwrap()));
    }

    #[test]
    fn rejects_missing_or_textual_amount() {
        assert!(serde_json::from_str::<Transaction>(r#"{"date": "2024-03-01"}"#).is_err());
        assert!(
            serde_json::from_str::<Transaction>(r#"{"date": "2024-03-01", "amount": "4.5"}"#)
                .is_err()
        );
    }
}
