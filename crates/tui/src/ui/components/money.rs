use engine::Amount;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Creates a styled span for an amount with semantic coloring.
///
/// - Positive amounts: green
/// - Negative amounts: red
/// - Zero: neutral text color
#[must_use]
pub fn styled_amount(amount: Amount, theme: &Theme) -> Span<'static> {
    Span::styled(amount.to_string(), Style::default().fg(amount_color(amount, theme)))
}

/// Same as [`styled_amount`], bold (used for the selected row).
#[must_use]
pub fn styled_amount_bold(amount: Amount, theme: &Theme) -> Span<'static> {
    Span::styled(
        amount.to_string(),
        Style::default()
            .fg(amount_color(amount, theme))
            .add_modifier(Modifier::BOLD),
    )
}

fn amount_color(amount: Amount, theme: &Theme) -> ratatui::style::Color {
    let value = amount.value();
    if value > 0.0 {
        theme.positive
    } else if value < 0.0 {
        theme.negative
    } else {
        theme.text
    }
}
