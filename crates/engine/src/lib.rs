//! Core of the personal finance ledger.
//!
//! The [`Store`] maps category names to ordered lists of [`Transaction`]s and
//! is persisted as one JSON document (see [`persistence`]). [`search`] and
//! [`sort_rows`] derive filtered/ordered views without touching the store.
//!
//! [`Engine`] ties a store to its file: every mutation is written to disk
//! before it becomes visible in memory.

use std::path::{Path, PathBuf};

pub use amount::Amount;
pub use error::EngineError;
pub use search::{search, search_rows};
pub use sort::{Row, SortField, SortState, sort_by, sort_rows};
pub use store::{Category, Store};
pub use summary::{Summary, summarize};
pub use transaction::Transaction;

mod amount;
mod error;
pub mod persistence;
mod search;
mod sort;
mod store;
mod summary;
mod transaction;

pub type ResultEngine<T> = Result<T, EngineError>;

/// A store bound to the file it is persisted in.
#[derive(Debug)]
pub struct Engine {
    path: PathBuf,
    store: Store,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only view of the current store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn add_transaction(
        &mut self,
        category: &str,
        date: &str,
        amount: Amount,
    ) -> ResultEngine<usize> {
        self.commit(|store| Ok(store.add_transaction(category, date, amount)))
    }

    pub fn update_transaction(
        &mut self,
        category: &str,
        index: usize,
        date: &str,
        amount: Amount,
    ) -> ResultEngine<Transaction> {
        self.commit(|store| store.update_transaction(category, index, date, amount))
    }

    pub fn delete_transaction(&mut self, category: &str, index: usize) -> ResultEngine<Transaction> {
        self.commit(|store| store.delete_transaction(category, index))
    }

    /// Persists `store` and makes it the current one.
    pub fn replace_store(&mut self, store: Store) -> ResultEngine<()> {
        persistence::save(&self.path, &store)?;
        self.store = store;
        Ok(())
    }

    pub fn summarize(&self) -> ResultEngine<Summary> {
        summarize(&self.store)
    }

    pub fn search(&self, term: &str) -> Store {
        search(&self.store, term)
    }

    pub fn rows(&self) -> Vec<Row> {
        self.store.rows()
    }

    /// Runs `op` on a copy of the store, saves the copy and only then swaps
    /// it in. A failing `op` or save leaves the engine unchanged.
    fn commit<T>(&mut self, op: impl FnOnce(&mut Store) -> ResultEngine<T>) -> ResultEngine<T> {
        let mut next = self.store.clone();
        let value = op(&mut next)?;
        persistence::save(&self.path, &next)?;
        self.store = next;
        Ok(value)
    }
}

#[derive(Debug)]
pub struct EngineBuilder {
    path: PathBuf,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            path: PathBuf::from(persistence::DEFAULT_PATH),
        }
    }
}

impl EngineBuilder {
    /// Pass the file the store lives in.
    pub fn path(mut self, path: impl Into<PathBuf>) -> EngineBuilder {
        self.path = path.into();
        self
    }

    /// Construct `Engine`, loading the store from disk.
    pub fn build(self) -> ResultEngine<Engine> {
        let store = persistence::load(&self.path)?;
        Ok(Engine {
            path: self.path,
            store,
        })
    }
}
