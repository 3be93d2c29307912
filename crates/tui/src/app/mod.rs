use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use engine::{SortField, Store};

use crate::{
    error::{Result, ViewError},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

mod table;

pub use table::{Message, MessageLevel, TableMode, TableView};

#[derive(Debug)]
pub struct AppState {
    pub store: Store,
    pub table: TableView,
}

pub struct App {
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(store: Store) -> Self {
        let table = TableView::new(&store);
        Self {
            state: AppState { store, table },
            should_quit: false,
        }
    }

    /// Runs the view and returns the store, restoring the terminal even when
    /// the loop fails.
    pub fn run(mut self) -> Result<Store> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result?;
        Ok(self.state.store)
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| ViewError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_action(map_key(key));
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn handle_action(&mut self, action: AppAction) {
        match self.state.table.mode {
            TableMode::Browse => self.handle_browse(action),
            TableMode::Search => self.handle_search(action),
            TableMode::ConfirmDelete => self.handle_confirm(action),
        }
    }

    fn handle_browse(&mut self, action: AppAction) {
        let table = &mut self.state.table;
        match action {
            AppAction::Quit | AppAction::Cancel => self.should_quit = true,
            AppAction::Up => table.select_prev(),
            AppAction::Down => table.select_next(),
            AppAction::Input(ch) => match ch {
                'q' | 'Q' => self.should_quit = true,
                'j' => table.select_next(),
                'k' => table.select_prev(),
                '1' | 'c' => table.sort_by(SortField::Category),
                '2' | 'a' => table.sort_by(SortField::Amount),
                '3' | 't' => table.sort_by(SortField::Date),
                '/' => table.start_search(),
                'x' => table.clear_search(&self.state.store),
                'd' => {
                    if table.selected_row().is_some() {
                        table.mode = TableMode::ConfirmDelete;
                    }
                }
                _ => {}
            },
            AppAction::Submit | AppAction::Backspace | AppAction::None => {}
        }
    }

    fn handle_search(&mut self, action: AppAction) {
        let table = &mut self.state.table;
        match action {
            AppAction::Quit => self.should_quit = true,
            AppAction::Cancel => table.clear_search(&self.state.store),
            AppAction::Submit => table.apply_search(&self.state.store),
            AppAction::Backspace => {
                table.input.pop();
            }
            AppAction::Input(ch) => table.input.push(ch),
            AppAction::Up | AppAction::Down | AppAction::None => {}
        }
    }

    fn handle_confirm(&mut self, action: AppAction) {
        match action {
            AppAction::Quit => self.should_quit = true,
            AppAction::Input('y' | 'Y') => self.delete_selected(),
            _ => {
                self.state.table.mode = TableMode::Browse;
            }
        }
    }

    fn delete_selected(&mut self) {
        let AppState { store, table } = &mut self.state;
        table.mode = TableMode::Browse;
        let Some(row) = table.selected_row().cloned() else {
            return;
        };

        table.message = Some(match store.delete_transaction(&row.category, row.index) {
            Ok(removed) => Message {
                level: MessageLevel::Info,
                text: format!(
                    "Deleted {} on {} from {}",
                    removed.amount, removed.date, row.category
                ),
            },
            Err(err) => {
                // The alternate screen is active; stderr output would land on it.
                tracing::debug!("delete from table view failed: {err}");
                Message {
                    level: MessageLevel::Error,
                    text: err.to_string(),
                }
            }
        });
        table.refresh(store);
    }
}
