use engine::{Row, SortField, SortState, Store, search_rows};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    Browse,
    Search,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: MessageLevel,
    pub text: String,
}

/// What the table shows: the store filtered by `term`, then ordered by the
/// active sort.
#[derive(Debug)]
pub struct TableView {
    pub rows: Vec<Row>,
    pub selected: usize,
    pub sort: SortState,
    /// Term currently applied to `rows`.
    pub term: String,
    /// Text being typed in the search box.
    pub input: String,
    pub mode: TableMode,
    pub message: Option<Message>,
}

impl TableView {
    pub fn new(store: &Store) -> Self {
        let mut view = Self {
            rows: Vec::new(),
            selected: 0,
            sort: SortState::default(),
            term: String::new(),
            input: String::new(),
            mode: TableMode::Browse,
            message: None,
        };
        view.refresh(store);
        view
    }

    /// Re-derives the rows from `store`, keeping term and sort.
    pub fn refresh(&mut self, store: &Store) {
        self.rows = search_rows(store, &self.term);
        self.sort.apply(&mut self.rows);
        self.clamp_selection();
    }

    /// Toggles the sort on `field` and reorders the displayed rows.
    pub fn sort_by(&mut self, field: SortField) {
        let (field, descending) = self.sort.toggle(field);
        self.sort.apply(&mut self.rows);
        self.selected = 0;
        tracing::debug!(field = field.label(), descending, "table sorted");
    }

    pub fn start_search(&mut self) {
        self.input = self.term.clone();
        self.mode = TableMode::Search;
    }

    pub fn apply_search(&mut self, store: &Store) {
        self.term = self.input.trim().to_string();
        self.mode = TableMode::Browse;
        self.selected = 0;
        self.refresh(store);
        self.message = Some(Message {
            level: MessageLevel::Info,
            text: format!("{} matching transactions", self.rows.len()),
        });
    }

    pub fn clear_search(&mut self, store: &Store) {
        self.term.clear();
        self.input.clear();
        self.mode = TableMode::Browse;
        self.refresh(store);
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.rows.len() - 1);
    }

    pub fn select_prev(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Amount;

    fn store() -> Store {
        let mut store = Store::new();
        for (category, date, value) in [
            ("food", "2024-01-03", 12.5),
            ("rent", "2024-01-01", 500.0),
            ("food", "2023-12-30", 4.0),
            ("books", "2024-02-10", 30.0),
        ] {
            store.add_transaction(category, date, Amount::new(value).unwrap());
        }
        store
    }

    fn categories(view: &TableView) -> Vec<&str> {
        view.rows.iter().map(|r| r.category.as_str()).collect()
    }

    #[test]
    fn starts_with_all_rows_in_store_order() {
        let view = TableView::new(&store());
        assert_eq!(categories(&view), ["food", "food", "rent", "books"]);
        assert_eq!(view.selected, 0);
    }

    #[test]
    fn sort_toggles_direction() {
        let mut view = TableView::new(&store());

        view.sort_by(SortField::Amount);
        let amounts: Vec<f64> = view.rows.iter().map(|r| r.amount.value()).collect();
        assert_eq!(amounts, [4.0, 12.5, 30.0, 500.0]);

        view.sort_by(SortField::Amount);
        let amounts: Vec<f64> = view.rows.iter().map(|r| r.amount.value()).collect();
        assert_eq!(amounts, [500.0, 30.0, 12.5, 4.0]);

        view.sort_by(SortField::Category);
        assert_eq!(categories(&view), ["books", "food", "food", "rent"]);
    }

    #[test]
    fn search_then_sort_then_refresh_keeps_both() {
        let store = store();
        let mut view = TableView::new(&store);

        view.start_search();
        view.input.push_str("2024");
        view.apply_search(&store);
        assert_eq!(view.mode, TableMode::Browse);
        assert_eq!(view.rows.len(), 3);

        view.sort_by(SortField::Date);
        view.sort_by(SortField::Date);
        let dates: Vec<&str> = view.rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2024-02-10", "2024-01-03", "2024-01-01"]);

        view.refresh(&store);
        let dates: Vec<&str> = view.rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2024-02-10", "2024-01-03", "2024-01-01"]);

        view.clear_search(&store);
        assert_eq!(view.rows.len(), 4);
        assert!(view.term.is_empty());
    }

    #[test]
    fn selection_stays_in_bounds() {
        let store = store();
        let mut view = TableView::new(&store);
        view.select_prev();
        assert_eq!(view.selected, 0);
        for _ in 0..10 {
            view.select_next();
        }
        assert_eq!(view.selected, 3);

        view.input = "books".to_string();
        view.apply_search(&store);
        assert_eq!(view.selected, 0);
        assert_eq!(view.selected_row().map(|r| r.category.as_str()), Some("books"));

        view.input = "zzz".to_string();
        view.apply_search(&store);
        assert!(view.selected_row().is_none());
        view.select_next();
        assert_eq!(view.selected, 0);
    }
}
