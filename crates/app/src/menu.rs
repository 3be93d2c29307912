//! Interactive text menu over an [`Engine`].
//!
//! The loop reads answers from any [`BufRead`] and writes to any [`Write`],
//! so tests drive it with in-memory buffers. The table view is injected for
//! the same reason.

use std::io::{BufRead, Write};

use engine::{Amount, Engine, EngineError, Store};

use crate::{
    error::{AppError, Result},
    report,
};

const MENU: &str = "\nPersonal Finance Tracker
1. Show all transactions
2. Add a new transaction
3. Update a transaction
4. Delete a transaction
5. Display summary
6. Search transactions
7. Launch table view
8. Exit";

/// Opens the table view on a copy of the store and returns the edited one.
pub type Viewer = Box<dyn FnMut(Store) -> ledger_tui::Result<Store>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Show,
    Add,
    Update,
    Delete,
    Summary,
    Search,
    Table,
    Exit,
}

impl Choice {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "1" => Some(Self::Show),
            "2" => Some(Self::Add),
            "3" => Some(Self::Update),
            "4" => Some(Self::Delete),
            "5" => Some(Self::Summary),
            "6" => Some(Self::Search),
            "7" => Some(Self::Table),
            "8" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub struct Menu<'a, R, W> {
    engine: &'a mut Engine,
    input: R,
    out: W,
    viewer: Viewer,
    today: Box<dyn Fn() -> String>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(engine: &'a mut Engine, input: R, out: W) -> Self {
        Self {
            engine,
            input,
            out,
            viewer: Box::new(ledger_tui::run),
            today: Box::new(|| chrono::Local::now().format("%Y-%m-%d").to_string()),
        }
    }

    #[cfg(test)]
    pub fn with_viewer(mut self, viewer: Viewer) -> Self {
        self.viewer = viewer;
        self
    }

    /// Replaces the clock used for blank dates.
    #[cfg(test)]
    pub fn with_today(mut self, today: impl Fn() -> String + 'static) -> Self {
        self.today = Box::new(today);
        self
    }

    /// Runs until the user exits or the input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "{MENU}")?;
            let answer = match self.prompt("Choose an option: ") {
                Ok(answer) => answer,
                Err(AppError::InputClosed) => break,
                Err(err) => return Err(err),
            };
            let Some(choice) = Choice::parse(&answer) else {
                writeln!(self.out, "Invalid choice. Please try again.")?;
                continue;
            };
            if choice == Choice::Exit {
                break;
            }

            match self.dispatch(choice) {
                Ok(()) => {}
                Err(AppError::InputClosed) => break,
                Err(AppError::Engine(err)) if err.is_recoverable() => {
                    tracing::warn!("{err}");
                    writeln!(self.out, "{}", report::user_message(&err))?;
                }
                Err(err) => return Err(err),
            }
        }

        writeln!(self.out, "Goodbye!")?;
        Ok(())
    }

    fn dispatch(&mut self, choice: Choice) -> Result<()> {
        match choice {
            Choice::Show => report::print_store(&mut self.out, self.engine.store())?,
            Choice::Add => self.add()?,
            Choice::Update => self.update()?,
            Choice::Delete => self.delete()?,
            Choice::Summary => {
                let summary = self.engine.summarize()?;
                report::print_summary(&mut self.out, &summary)?;
            }
            Choice::Search => self.search()?,
            Choice::Table => self.table()?,
            Choice::Exit => {}
        }
        Ok(())
    }

    fn add(&mut self) -> Result<()> {
        let category = self.prompt_category()?;
        let date = self.prompt("Enter date (YYYY-MM-DD, blank for today): ")?;
        let date = if date.is_empty() { (self.today)() } else { date };
        let amount = self.prompt_amount("Enter amount: ")?;

        self.engine.add_transaction(&category, &date, amount)?;
        tracing::info!(%category, %date, %amount, "transaction added");
        writeln!(self.out, "Transaction added successfully.")?;
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        let category = self.prompt_category()?;
        let Some(index) = self.prompt_existing(&category)? else {
            return Ok(());
        };
        let amount = self.prompt_amount("Enter new amount: ")?;
        let date = self.prompt("Enter new date (YYYY-MM-DD, blank to keep): ")?;
        let date = if date.is_empty() {
            self.current_date(&category, index)?
        } else {
            date
        };

        self.engine
            .update_transaction(&category, index, &date, amount)?;
        tracing::info!(%category, index, "transaction updated");
        writeln!(self.out, "Transaction updated successfully.")?;
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let category = self.prompt_category()?;
        let Some(index) = self.prompt_existing(&category)? else {
            return Ok(());
        };

        self.engine.delete_transaction(&category, index)?;
        tracing::info!(%category, index, "transaction deleted");
        writeln!(self.out, "Transaction deleted successfully.")?;
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        let term = self.prompt("Enter search term: ")?;
        let rows = engine::search_rows(self.engine.store(), &term);
        report::print_matches(&mut self.out, &term, &rows)?;
        Ok(())
    }

    fn table(&mut self) -> Result<()> {
        let edited = (self.viewer)(self.engine.store().clone())?;
        if &edited != self.engine.store() {
            self.engine.replace_store(edited)?;
            writeln!(self.out, "Changes from the table view saved.")?;
        }
        Ok(())
    }

    fn current_date(&self, category: &str, index: usize) -> Result<String> {
        self.engine
            .store()
            .transactions(category)
            .and_then(|list| list.get(index))
            .map(|tx| tx.date.clone())
            .ok_or_else(|| {
                AppError::Engine(EngineError::CategoryNotFound(category.to_string()))
            })
    }

    /// Asks for a one-based position inside `category`. Returns `None` after
    /// telling the user when there is nothing to pick from.
    fn prompt_existing(&mut self, category: &str) -> Result<Option<usize>> {
        let len = match self.engine.store().transactions(category) {
            Some(list) => list.len(),
            None => {
                writeln!(self.out, "Category not found.")?;
                return Ok(None);
            }
        };
        if len == 0 {
            writeln!(self.out, "\"{category}\" has no transactions.")?;
            return Ok(None);
        }

        loop {
            let raw = self.prompt(&format!("Enter transaction number (1-{len}): "))?;
            match crate::settings::parse_position(&raw) {
                Ok(index) if index < len => return Ok(Some(index)),
                Ok(_) => writeln!(self.out, "Invalid index. Enter a number from 1 to {len}.")?,
                Err(reason) => writeln!(self.out, "Invalid index: {reason}.")?,
            }
        }
    }

    fn prompt_category(&mut self) -> Result<String> {
        loop {
            let category = self.prompt("Enter category: ")?;
            if !category.is_empty() {
                return Ok(category);
            }
            writeln!(self.out, "Category cannot be empty.")?;
        }
    }

    fn prompt_amount(&mut self, question: &str) -> Result<Amount> {
        loop {
            let raw = self.prompt(question)?;
            match raw.parse::<Amount>() {
                Ok(amount) => return Ok(amount),
                Err(err) => writeln!(self.out, "{}", report::user_message(&err))?,
            }
        }
    }

    /// Prints `question` and reads one trimmed line.
    fn prompt(&mut self, question: &str) -> Result<String> {
        write!(self.out, "{question}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}
