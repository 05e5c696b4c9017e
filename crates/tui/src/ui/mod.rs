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

use crate::app::{AppState, CheckoutMode, CustomersMode, Section};

pub use terminal::{CheckoutTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    // Main layout: info bar, tabs, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    match state.section {
        Section::Checkout => screens::checkout::render(frame, layout[2], state),
        Section::Customers => screens::customers::render(frame, layout[2], state),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let filial = state
        .session
        .branch()
        .map(|b| b.nome.as_str())
        .unwrap_or("-");
    let (secret, secret_style) = if state.checkout.loading_secret {
        ("...", Style::default().fg(theme.text_muted))
    } else if state.session.secret_key().is_some() {
        ("OK", Style::default().fg(theme.positive))
    } else {
        ("pendente", Style::default().fg(theme.error))
    };

    let line = Line::from(vec![
        Span::styled("Gateway", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Filial", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {filial}  ")),
        Span::styled("Chave", Style::default().fg(theme.text_muted)),
        Span::raw(": "),
        Span::styled(secret, secret_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::tabs::tab_shortcuts(theme);

    let context_hints = get_context_hints(state, theme);
    if !context_hints.is_empty() {
        parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        parts.extend(context_hints);
    }

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" sair"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn get_context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    match state.section {
        Section::Checkout => get_checkout_hints(state, theme),
        Section::Customers => get_customers_hints(state, theme),
    }
}

fn get_checkout_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    match state.checkout.mode {
        CheckoutMode::View => vec![
            Span::styled("a", Style::default().fg(theme.accent)),
            Span::raw(" valor  "),
            Span::styled("b", Style::default().fg(theme.accent)),
            Span::raw(" filial  "),
            Span::styled("s", Style::default().fg(theme.accent)),
            Span::raw(" +split  "),
            Span::styled("m", Style::default().fg(theme.accent)),
            Span::raw(" modo  "),
            Span::styled("r", Style::default().fg(theme.accent)),
            Span::raw(" recebedor  "),
            Span::styled("e", Style::default().fg(theme.accent)),
            Span::raw(" editar  "),
            Span::styled("p", Style::default().fg(theme.accent)),
            Span::raw(" método  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" enviar  "),
            Span::styled("x", Style::default().fg(theme.accent)),
            Span::raw(" limpar"),
        ],
        CheckoutMode::Edit(_) => vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw("/"),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" concluir  "),
            Span::styled("Tab", Style::default().fg(theme.accent)),
            Span::raw(" próximo"),
        ],
    }
}

fn get_customers_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    match state.customers.mode {
        CustomersMode::List => vec![
            Span::styled("c", Style::default().fg(theme.accent)),
            Span::raw(" criar  "),
            Span::styled("r", Style::default().fg(theme.accent)),
            Span::raw(" recarregar  "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw("/"),
            Span::styled("p", Style::default().fg(theme.accent)),
            Span::raw(" página"),
        ],
        CustomersMode::Create(_) => vec![
            Span::styled("Tab", Style::default().fg(theme.accent)),
            Span::raw(" próximo  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" salvar  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" cancelar"),
        ],
    }
}
