//! The `Store` holds every category and its transactions.
//!
//! Categories keep the order in which they were first created; transactions
//! keep insertion order inside their category and are addressed by
//! zero-based position.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::{Amount, EngineError, ResultEngine, Row, Transaction};

/// A named, ordered list of transactions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub transactions: Vec<Transaction>,
}

impl Category {
    fn new(name: String) -> Self {
        Self {
            name,
            transactions: Vec::new(),
        }
    }

    /// Sum of the amounts in this category (0 when empty), or `None` when
    /// the sum is not finite.
    pub fn total(&self) -> Option<Amount> {
        Amount::checked_sum(self.transactions.iter().map(|tx| tx.amount))
    }
}

/// Every category and its transactions.
///
/// Serialised as a JSON object mapping category name to an array of
/// transactions. Empty categories are kept, never pruned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Store {
    categories: Vec<Category>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transaction to `category`, creating the category when it
    /// does not exist yet. Returns the position of the new transaction.
    pub fn add_transaction(
        &mut self,
        category: &str,
        date: impl Into<String>,
        amount: Amount,
    ) -> usize {
        let list = &mut self.entry(category).transactions;
        list.push(Transaction::new(date, amount));
        let index = list.len() - 1;
        tracing::debug!(category, index, "transaction added");
        index
    }

    /// Replaces the transaction at `index` in place and returns the old one.
    pub fn update_transaction(
        &mut self,
        category: &str,
        index: usize,
        date: impl Into<String>,
        amount: Amount,
    ) -> ResultEngine<Transaction> {
        let slot = self.slot_mut(category, index)?;
        let previous = std::mem::replace(slot, Transaction::new(date, amount));
        tracing::debug!(category, index, "transaction updated");
        Ok(previous)
    }

    /// Removes the transaction at `index`, shifting the later ones down, and
    /// returns it. The category stays even when it becomes empty.
    pub fn delete_transaction(&mut self, category: &str, index: usize) -> ResultEngine<Transaction> {
        let list = self
            .get_mut(category)
            .ok_or_else(|| EngineError::CategoryNotFound(category.to_string()))?;
        if index >= list.len() {
            return Err(EngineError::IndexOutOfRange {
                category: category.to_string(),
                index,
                len: list.len(),
            });
        }
        let removed = list.remove(index);
        tracing::debug!(category, index, "transaction deleted");
        Ok(removed)
    }

    /// Transactions of `category`, if it exists.
    pub fn transactions(&self, category: &str) -> Option<&[Transaction]> {
        self.find(category).map(|c| c.transactions.as_slice())
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.find(category).is_some()
    }

    /// Category names in store order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Read-only view of every category, in store order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Number of categories (including empty ones).
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// `true` when the store has no categories at all.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn transaction_count(&self) -> usize {
        self.categories.iter().map(|c| c.transactions.len()).sum()
    }

    /// `true` when at least one category holds a transaction.
    pub fn has_transactions(&self) -> bool {
        self.categories.iter().any(|c| !c.transactions.is_empty())
    }

    /// Flattens the store into display rows, category by category.
    pub fn rows(&self) -> Vec<Row> {
        self.categories
            .iter()
            .flat_map(|c| {
                c.transactions.iter().enumerate().map(|(index, tx)| Row {
                    category: c.name.clone(),
                    index,
                    amount: tx.amount,
                    date: tx.date.clone(),
                })
            })
            .collect()
    }

    /// Sets the whole list of `name`, replacing any previous one but keeping
    /// its position.
    pub(crate) fn insert_category(&mut self, name: String, transactions: Vec<Transaction>) {
        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.transactions = transactions,
            None => self.categories.push(Category { name, transactions }),
        }
    }

    fn find(&self, category: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == category)
    }

    fn get_mut(&mut self, category: &str) -> Option<&mut Vec<Transaction>> {
        self.categories
            .iter_mut()
            .find(|c| c.name == category)
            .map(|c| &mut c.transactions)
    }

    fn entry(&mut self, category: &str) -> &mut Category {
        let position = match self.categories.iter().position(|c| c.name == category) {
            Some(position) => position,
            None => {
                self.categories.push(Category::new(category.to_string()));
                self.categories.len() - 1
            }
        };
        &mut self.categories[position]
    }

    fn slot_mut(&mut self, category: &str, index: usize) -> ResultEngine<&mut Transaction> {
        let list = self
            .get_mut(category)
            .ok_or_else(|| EngineError::CategoryNotFound(category.to_string()))?;
        let len = list.len();
        list.get_mut(index).ok_or_else(|| EngineError::IndexOutOfRange {
            category: category.to_string(),
            index,
            len,
        })
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.categories.iter()
    }
}

impl Serialize for Store {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.transactions)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Store {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StoreVisitor;

        impl<'de> Visitor<'de> for StoreVisitor {
            type Value = Store;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping category names to lists of transactions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Store, A::Error> {
                let mut store = Store::new();
                while let Some((name, transactions)) =
                    access.next_entry::<String, Vec<Transaction>>()?
                {
                    store.insert_category(name, transactions);
                }
                Ok(store)
            }
        }

        deserializer.deserialize_map(StoreVisitor)
    }
}
