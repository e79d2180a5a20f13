use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{ListItem, Paragraph};

use super::{hints, label_value, or_reason, section, selectable_list};
use crate::core::conversion::{CurrencyCode, format_money};
use crate::core::reference::FundingKind;
use crate::core::state::App;

pub fn send_money(frame: &mut Frame, area: Rect, app: &App) {
    let [recipient_area, form_area, source_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(9),
        Constraint::Min(0),
    ])
    .areas(area);

    let recipient = match app.recipient_contact() {
        Some(contact) => vec![
            Line::from(Span::styled(
                contact.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("{} · {}", contact.phone, contact.country)),
        ],
        None => vec![Line::from(Span::styled(
            "No recipient selected",
            Style::default().fg(Color::DarkGray),
        ))],
    };
    frame.render_widget(
        Paragraph::new(recipient).block(section("Recipient")),
        recipient_area,
    );

    let amount_style = if app.exchange_preview().is_some() {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red)
    };
    let mut form = vec![
        Line::from(vec![
            Span::styled("Amount: ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}▏", app.amount_input), amount_style),
            Span::raw(format!(" {}", app.source_currency)),
        ]),
        label_value("From", format!("{}  (←/→)", app.source_currency)),
        label_value("To", format!("{}  (↑/↓)", app.recipient_currency)),
        label_value(
            "Rate",
            or_reason(
                app.engine.quote(app.source_currency, app.recipient_currency),
                |q| q.to_string(),
            ),
        ),
    ];
    if let Some(preview) = app.exchange_preview() {
        form.push(label_value(
            "Recipient gets",
            format_money(preview.converted_amount, app.recipient_currency),
        ));
    }
    form.push(Line::from(""));
    form.push(if app.transfer_in_flight() {
        Line::from(Span::styled(
            "Verifying on blockchain...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        hints("Enter  Send    Backspace  Edit amount")
    });
    frame.render_widget(
        Paragraph::new(form).block(section("Transfer")),
        form_area,
    );

    let mut source = Vec::new();
    if let Some(s) = app.selected_funding_source() {
        source.push(label_value(
            "Pay from",
            format!("{} {}", s.name, s.account_number),
        ));
    }
    source.push(label_value(
        "Wallet",
        format_money(app.wallet_balance(), app.wallet_currency),
    ));
    source.push(hints("f  Change funding source"));
    frame.render_widget(
        Paragraph::new(source).block(section("Funding")),
        source_area,
    );
}

pub fn wallet(frame: &mut Frame, area: Rect, app: &App, selected: usize) {
    let [list_area, total_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(4)]).areas(area);

    let items: Vec<ListItem> = app
        .balances
        .iter()
        .map(|b| {
            let usd = app
                .engine
                .to_usd(b.balance, b.currency)
                .map(|v| format!("≈ {}", format_money(v, CurrencyCode::USD)))
                .unwrap_or_default();
            let marker = if b.currency == app.wallet_currency { "●" } else { " " };
            ListItem::new(format!(
                "{marker} {:<4} {:>14}   {usd}",
                b.currency.code(),
                format_money(b.balance, b.currency)
            ))
        })
        .collect();
    selectable_list(frame, list_area, "Currency Balances (Enter to activate)", items, selected);

    frame.render_widget(
        Paragraph::new(vec![
            label_value(
                "Total Balance",
                or_reason(app.total_balance_usd(), |v| format_money(v, CurrencyCode::USD)),
            ),
            hints("f  Funding sources"),
        ])
        .block(section("Total")),
        total_area,
    );
}

pub fn funding_sources(frame: &mut Frame, area: Rect, app: &App, selected: usize) {
    let items: Vec<ListItem> = app
        .reference
        .funding_sources
        .iter()
        .map(|s| {
            let kind = match s.kind {
                FundingKind::Bank => "Bank",
                FundingKind::Card => "Card",
                FundingKind::International => "Intl",
            };
            let default = if s.is_default { "  (default)" } else { "" };
            let marker = if app.funding_source == Some(s.id) { "●" } else { " " };
            ListItem::new(format!(
                "{marker} {kind:<5} {} {} · {}{default}",
                s.name, s.account_number, s.currency
            ))
        })
        .collect();
    selectable_list(frame, area, "Funding Sources (Enter to pay from)", items, selected);
}
