use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{ListItem, Paragraph};

use super::{hints, label_value, or_reason, section, selectable_list};
use crate::core::action::sent_message;
use crate::core::conversion::{CurrencyCode, format_money, format_signed};
use crate::core::state::{App, ContactTab};

pub fn welcome(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Munir",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("Send money across borders, secured by your fingerprint."),
        Line::from(Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        hints("Enter  Get started    q  Quit"),
    ];
    let [center] = Layout::vertical([Constraint::Length(lines.len() as u16)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), center);
}

pub fn dashboard(frame: &mut Frame, area: Rect, app: &App, selected: usize) {
    let contacts = app.visible_contacts();
    let [balance_area, contacts_area, recent_area] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(contacts.len() as u16 + 2),
        Constraint::Min(0),
    ])
    .areas(area);

    let balance = vec![
        Line::from(Span::styled(
            format_money(app.wallet_balance(), app.wallet_currency),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        label_value(
            "Total across wallets",
            or_reason(app.total_balance_usd(), |v| format_money(v, CurrencyCode::USD)),
        ),
        hints("Tab  Switch tabs    s  Send    t  History"),
    ];
    frame.render_widget(
        Paragraph::new(balance).block(section("Available Balance")),
        balance_area,
    );

    let items: Vec<ListItem> = contacts
        .iter()
        .map(|c| {
            let star = if c.favorite { "★ " } else { "  " };
            ListItem::new(format!("{star}{} ({}, {})", c.name, c.country, c.currency))
        })
        .collect();
    selectable_list(
        frame,
        contacts_area,
        &contact_tabs(app.contact_tab),
        items,
        selected,
    );

    let recent: Vec<Line> = app
        .reference
        .transactions
        .iter()
        .take(4)
        .map(|t| {
            Line::from(vec![
                Span::raw(format!("{:<22}", t.name)),
                Span::styled(format!("{:<10}", t.date), Style::default().fg(Color::DarkGray)),
                Span::raw(format_signed(t.amount, CurrencyCode::USD)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(recent).block(section("Recent Transactions")),
        recent_area,
    );
}

/// List title with the active tab bracketed: `[Recent] Favorites`.
fn contact_tabs(active: ContactTab) -> String {
    let tabs: Vec<String> = [ContactTab::Recent, ContactTab::Favorites]
        .into_iter()
        .map(|tab| {
            if tab == active {
                format!("[{}]", tab.label())
            } else {
                tab.label().to_string()
            }
        })
        .collect();
    format!("{}  ←/→ switch, Enter send", tabs.join(" "))
}

pub fn payment_success(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![Line::from(Span::styled(
        "✓ Payment Successful",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(transfer) = &app.completed_transfer {
        lines.push(Line::from(sent_message(transfer)));
        if let Some(contact) = transfer.recipient.and_then(|id| app.reference.contact(id)) {
            lines.push(label_value("Recipient", contact.name.clone()));
        }
        if let Some(source) = transfer
            .funding_source
            .and_then(|id| app.reference.funding_source(id))
        {
            lines.push(label_value(
                "Paid from",
                format!("{} {}", source.name, source.account_number),
            ));
        }
        lines.push(label_value(
            "Rate",
            or_reason(app.engine.quote(transfer.from, transfer.to), |q| q.to_string()),
        ));
        lines.push(label_value(
            "Remaining",
            format_money(app.balance(transfer.wallet).unwrap_or_default(), transfer.wallet),
        ));
    }
    lines.push(Line::from(""));
    lines.push(hints("Verified on the ledger    Enter  Back to dashboard"));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(section("Payment")),
        area,
    );
}
