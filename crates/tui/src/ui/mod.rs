pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, TableMode};
use components::hints::{KeyHint, hints_to_spans};
use theme::Theme;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();

    // Main layout: info bar, table, search box, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_info_bar(frame, layout[0], state, &theme);
    screens::transactions::render(frame, layout[1], state, &theme);
    screens::transactions::render_search(frame, layout[2], state, &theme);
    render_bottom_bar(frame, layout[3], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let sort = match state.table.sort.current() {
        Some((field, descending)) => {
            let arrow = if descending { "↓" } else { "↑" };
            format!("{} {arrow}", field.label())
        }
        None => "-".to_string(),
    };
    let filter = if state.table.term.is_empty() {
        "-"
    } else {
        state.table.term.as_str()
    };

    let line = Line::from(vec![
        Span::styled("Categories", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.store.len())),
        Span::styled("Shown", Style::default().fg(theme.text_muted)),
        Span::raw(format!(
            ": {}/{}  ",
            state.table.rows.len(),
            state.store.transaction_count()
        )),
        Span::styled("Sort", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {sort}  ")),
        Span::styled("Filter", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {filter}")),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints = match state.table.mode {
        TableMode::Browse => vec![
            KeyHint::new("↑↓", "select"),
            KeyHint::new("1/2/3", "sort"),
            KeyHint::new("/", "search"),
            KeyHint::new("x", "clear"),
            KeyHint::new("d", "delete"),
            KeyHint::new("q", "back"),
        ],
        TableMode::Search => vec![
            KeyHint::new("Enter", "apply"),
            KeyHint::new("Esc", "clear"),
        ],
        TableMode::ConfirmDelete => vec![
            KeyHint::new("y", "confirm delete"),
            KeyHint::new("any", "cancel"),
        ],
    };

    frame.render_widget(Paragraph::new(Line::from(hints_to_spans(&hints, theme))), area);
}
