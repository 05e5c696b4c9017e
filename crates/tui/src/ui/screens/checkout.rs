use engine::{Money, PaymentMethod, SplitMode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
};

use crate::{
    app::{AppState, CheckoutField, CheckoutMode},
    ui::{Theme, components},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Payment
            Constraint::Length(8), // Customer
            Constraint::Min(0),    // Result / message
        ])
        .split(columns[0]);

    render_payment_panel(frame, left[0], state, &theme);
    render_customer_panel(frame, left[1], state, &theme);
    render_result_panel(frame, left[2], state, &theme);
    render_split_panel(frame, columns[1], state, &theme);
}

fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
}

fn field_line<'a>(
    label: &'a str,
    value: String,
    focused: bool,
    theme: &Theme,
) -> Line<'a> {
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
}

fn method_label(method: &PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::PaymentLink { .. } => "Link de pagamento",
        PaymentMethod::Pix { .. } => "PIX",
        PaymentMethod::Boleto { .. } => "Boleto",
        PaymentMethod::CreditCard(_) => "Cartão de crédito",
    }
}

fn render_payment_panel(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let checkout = &state.checkout;
    let focus = |field| checkout.mode == CheckoutMode::Edit(field);

    let mut lines = vec![
        field_line(
            "Valor",
            state.session.amount().format_symbol(),
            focus(CheckoutField::Amount),
            theme,
        ),
        field_line(
            "Parcelas",
            checkout.installments_input.clone(),
            focus(CheckoutField::Installments),
            theme,
        ),
        Line::from(vec![
            Span::styled("Método: ", Style::default().fg(theme.text_muted)),
            Span::styled(
                method_label(&checkout.method),
                Style::default().fg(theme.accent),
            ),
        ]),
    ];
    if matches!(checkout.method, PaymentMethod::CreditCard(_)) {
        lines.push(field_line(
            "Token do cartão",
            checkout.card_token_input.clone(),
            focus(CheckoutField::CardToken),
            theme,
        ));
    }
    lines.push(field_line(
        "Pedido (consulta)",
        checkout.order_id_input.clone(),
        focus(CheckoutField::OrderId),
        theme,
    ));

    let block = panel("Pagamento", theme);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_customer_panel(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let checkout = &state.checkout;
    let focus = |field| checkout.mode == CheckoutMode::Edit(field);

    let lines = vec![
        field_line(
            "ID existente",
            checkout.customer_id_input.clone(),
            focus(CheckoutField::CustomerId),
            theme,
        ),
        field_line(
            "Nome",
            checkout.customer_name_input.clone(),
            focus(CheckoutField::CustomerName),
            theme,
        ),
        field_line(
            "E-mail",
            checkout.customer_email_input.clone(),
            focus(CheckoutField::CustomerEmail),
            theme,
        ),
        field_line(
            "Documento",
            checkout.customer_document_input.clone(),
            focus(CheckoutField::CustomerDocument),
            theme,
        ),
        Line::from(Span::styled(
            "Link de pagamento dispensa cliente.",
            Style::default().fg(theme.dim),
        )),
    ];

    let block = panel("Cliente", theme);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_split_panel(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let split = &state.session.split;
    let recipients = state.session.recipients();

    let mode_label = match split.mode {
        SplitMode::Percentage => "percentual",
        SplitMode::Flat => "valor fixo",
    };
    let block = panel("Split", theme).title_bottom(Line::from(vec![
        Span::styled(" modo: ", Style::default().fg(theme.text_muted)),
        Span::styled(mode_label, Style::default().fg(theme.accent)),
        Span::raw(" "),
    ]));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let editing_amount = state.checkout.mode == CheckoutMode::Edit(CheckoutField::SplitAmount);
    let rows: Vec<Row<'_>> = split
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let recipient = recipients
                .iter()
                .find(|r| r.id == entry.recipient_id)
                .map(|r| r.nome.as_str())
                .unwrap_or("(sem recebedor)");
            let amount = match entry.mode {
                SplitMode::Percentage => format!("{}%", entry.amount),
                SplitMode::Flat => Money::from(entry.amount).format_symbol(),
            };
            let liable = if entry.liable { "sim" } else { "não" };

            let selected = i == state.checkout.selected_entry;
            let style = if selected && editing_amount {
                Style::default().fg(theme.accent)
            } else if selected {
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_muted)
            };

            Row::new(vec![
                Cell::from(recipient.to_string()),
                Cell::from(amount),
                Cell::from(liable),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
        ],
    )
    .header(
        Row::new(vec!["Recebedor", "Valor", "Resp."])
            .style(Style::default().fg(theme.dim)),
    );
    frame.render_widget(table, rows_area[0]);

    let total_line = match split.mode {
        SplitMode::Percentage => Line::from(vec![
            Span::styled("Total: ", Style::default().fg(theme.text_muted)),
            Span::styled(
                format!("{}% / 100%", split.total()),
                Style::default().fg(theme.text),
            ),
        ]),
        SplitMode::Flat => Line::from(vec![
            Span::styled("Total: ", Style::default().fg(theme.text_muted)),
            components::money::styled_amount(Money::from(split.total()), theme),
            Span::styled(" de ", Style::default().fg(theme.text_muted)),
            components::money::styled_amount_bold(state.session.amount(), theme),
        ]),
    };
    frame.render_widget(Paragraph::new(total_line), rows_area[1]);
}

fn render_result_panel(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let checkout = &state.checkout;
    let mut lines: Vec<Line<'_>> = Vec::new();

    if checkout.is_loading || checkout.loading_filiais {
        lines.push(Line::from(Span::styled(
            "Carregando...",
            Style::default().fg(theme.text_muted),
        )));
    }
    if let Some(message) = &checkout.message {
        lines.push(Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(theme.error),
        )));
    }
    for line in &checkout.result {
        lines.push(Line::from(Span::styled(
            line.as_str(),
            Style::default().fg(theme.positive),
        )));
    }

    let block = panel("Resultado", theme);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
