use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
};

use crate::{
    app::{AppState, CustomerFormField, CustomersMode},
    ui::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Create form
            Constraint::Min(0),    // List
            Constraint::Length(1), // Paging footer
        ])
        .split(area);

    render_form(frame, rows[0], state, &theme);
    render_list(frame, rows[1], state, &theme);
    render_footer(frame, rows[2], state, &theme);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let customers = &state.customers;
    let focus = |field| customers.mode == CustomersMode::Create(field);

    let input = |label: &'static str, value: &str, focused: bool| {
        let cursor = if focused { "│" } else { "" };
        let style = if focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.text)
        };
        Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(theme.text_muted)),
            Span::styled(format!("{value}{cursor}"), style),
        ])
    };

    let mut lines = vec![
        input("Nome", &customers.form_name, focus(CustomerFormField::Name)),
        input(
            "E-mail",
            &customers.form_email,
            focus(CustomerFormField::Email),
        ),
        input(
            "Documento",
            &customers.form_document,
            focus(CustomerFormField::Document),
        ),
    ];
    if let Some(message) = &customers.message {
        lines.push(Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(theme.error),
        )));
    }
    if let Some(success) = &customers.success {
        lines.push(Line::from(Span::styled(
            success.as_str(),
            Style::default().fg(theme.positive),
        )));
    }

    let block = Block::default()
        .title(" Novo cliente ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let customers = &state.customers;

    let block = Block::default()
        .title(" Clientes ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if customers.is_loading {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Carregando...",
                Style::default().fg(theme.text_muted),
            )),
            inner,
        );
        return;
    }

    let rows: Vec<Row<'_>> = customers
        .items
        .iter()
        .map(|customer| {
            Row::new(vec![
                Cell::from(customer.id.as_str()),
                Cell::from(customer.name.as_str()),
                Cell::from(customer.email.as_deref().unwrap_or("-")),
                Cell::from(customer.document.as_deref().unwrap_or("-")),
            ])
            .style(Style::default().fg(theme.text))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(25),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
            Constraint::Percentage(15),
        ],
    )
    .header(Row::new(vec!["ID", "Nome", "E-mail", "Documento"]).style(Style::default().fg(theme.dim)));
    frame.render_widget(table, inner);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let customers = &state.customers;
    let line = Line::from(vec![
        Span::styled("Página ", Style::default().fg(theme.text_muted)),
        Span::styled(
            customers.page.to_string(),
            Style::default().fg(theme.text),
        ),
        Span::styled("  Total ", Style::default().fg(theme.text_muted)),
        Span::styled(
            customers.total.to_string(),
            Style::default().fg(theme.text),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
