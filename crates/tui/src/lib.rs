//! Terminal table view over a ledger [`Store`].
//!
//! The view owns the store while it runs and hands it back on exit, with any
//! rows the user deleted removed. Saving is the caller's job.

mod app;
mod error;
mod ui;

use engine::Store;

pub use error::{Result, ViewError};

/// Shows `store` as a searchable, sortable table until the user quits and
/// returns the (possibly edited) store.
pub fn run(store: Store) -> Result<Store> {
    app::App::new(store).run()
}
