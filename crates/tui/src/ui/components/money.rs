use engine::Money;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Styled span for a BRL amount: `R$ 1.234,56`.
#[must_use]
pub fn styled_amount(amount: Money, theme: &Theme) -> Span<'static> {
    let color = if amount == Money::ZERO {
        theme.text_muted
    } else {
        theme.text
    };
    Span::styled(amount.format_symbol(), Style::default().fg(color))
}

/// Bold variant for totals.
#[must_use]
pub fn styled_amount_bold(amount: Money, theme: &Theme) -> Span<'static> {
    Span::styled(
        amount.format_symbol(),
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )
}
