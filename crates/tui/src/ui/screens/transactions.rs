use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table, TableState},
};

use engine::SortField;

use crate::{
    app::{AppState, MessageLevel, TableMode},
    ui::{components::money, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Personal Finance Tracker")
        .border_style(Style::default().fg(theme.border));

    if state.table.rows.is_empty() {
        let text = if state.store.transaction_count() == 0 {
            "No transactions recorded."
        } else {
            "No transactions match the search."
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(text, Style::default().fg(theme.text_muted))))
                .block(block)
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let header = TableRow::new(vec![
        header_cell(state, SortField::Category, theme),
        header_cell(state, SortField::Amount, theme),
        header_cell(state, SortField::Date, theme),
    ])
    .height(1);

    let rows = state
        .table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let amount = if i == state.table.selected {
                money::styled_amount_bold(row.amount, theme)
            } else {
                money::styled_amount(row.amount, theme)
            };
            TableRow::new(vec![
                Cell::from(row.category.clone()),
                Cell::from(Line::from(amount)),
                Cell::from(row.date.clone()),
            ])
        })
        .collect::<Vec<_>>();

    let mut table_state = TableState::default();
    table_state.select(Some(state.table.selected));

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("» ");

    frame.render_stateful_widget(table, area, &mut table_state);
}

fn header_cell(state: &AppState, field: SortField, theme: &Theme) -> Cell<'static> {
    let (label, style) = match state.table.sort.current() {
        Some((active, descending)) if active == field => {
            let arrow = if descending { " ↓" } else { " ↑" };
            (
                format!("{}{arrow}", field.label()),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        }
        _ => (
            field.label().to_string(),
            Style::default().fg(theme.text_muted),
        ),
    };
    Cell::from(Span::styled(label, style))
}

pub fn render_search(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let table = &state.table;
    let (title, border) = match table.mode {
        TableMode::Search => ("Search", theme.accent),
        _ => ("Search (/)", theme.border),
    };

    let mut line = vec![Span::raw(match table.mode {
        TableMode::Search => format!("{}_", table.input),
        _ => table.term.clone(),
    })];

    if table.mode == TableMode::ConfirmDelete {
        if let Some(row) = table.selected_row() {
            line = vec![Span::styled(
                format!(
                    "Delete {} on {} from {}? (y/N)",
                    row.amount, row.date, row.category
                ),
                Style::default().fg(theme.error),
            )];
        }
    } else if let Some(message) = &table.message {
        let color = match message.level {
            MessageLevel::Info => theme.text_muted,
            MessageLevel::Error => theme.error,
        };
        line.push(Span::raw("   "));
        line.push(Span::styled(message.text.clone(), Style::default().fg(color)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border));
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}
