use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{ListItem, Paragraph};

use super::{hints, label_value, section, selectable_list};
use crate::core::conversion::{CurrencyCode, format_signed};
use crate::core::reference::Transaction;
use crate::core::state::App;

fn amount_style(amount: rust_decimal::Decimal) -> Style {
    if amount.is_sign_negative() {
        Style::default()
    } else {
        Style::default().fg(Color::Green)
    }
}

pub fn transactions(frame: &mut Frame, area: Rect, app: &App, selected: usize) {
    let items: Vec<ListItem> = app
        .reference
        .transactions
        .iter()
        .map(|t| {
            let flagged = app
                .reference
                .anomalies
                .iter()
                .any(|a| a.transaction_id == t.id);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<22}", t.name)),
                Span::styled(
                    format!("{:<12}{:<14}", t.date, t.category),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format_signed(t.amount, CurrencyCode::USD),
                    amount_style(t.amount),
                ),
                Span::styled(
                    if flagged { "  ⚠" } else { "" },
                    Style::default().fg(Color::Yellow),
                ),
            ]))
        })
        .collect();
    selectable_list(frame, area, "Transaction History (Enter for details)", items, selected);
}

pub fn transaction_detail(frame: &mut Frame, area: Rect, app: &App, transaction: &Transaction) {
    let mut lines = vec![
        Line::from(Span::styled(
            format_signed(transaction.amount, CurrencyCode::USD),
            amount_style(transaction.amount),
        )),
        label_value("Name", transaction.name.clone()),
        label_value("Date", transaction.date.clone()),
        label_value("Category", transaction.category.clone()),
        label_value("Description", transaction.description.clone()),
        label_value("Location", transaction.location.clone()),
    ];
    if let Some(anomaly) = app
        .reference
        .anomalies
        .iter()
        .find(|a| a.transaction_id == transaction.id)
    {
        lines.push(Line::from(Span::styled(
            format!("⚠ {}", anomaly.reason),
            Style::default().fg(Color::Yellow),
        )));
    }
    lines.push(Line::from(""));
    lines.push(match transaction.contact_id {
        Some(_) => hints("r  Repeat payment    Esc  Back"),
        None => hints("Esc  Back"),
    });
    frame.render_widget(
        Paragraph::new(lines).block(section("Transaction Details")),
        area,
    );
}

#[cfg(test)]
mod tests {
    use crate::core::action::{Action, update};
    use crate::core::screen::ScreenId;
    use crate::core::state::Handoff;
    use crate::test_support::test_app;
    use crate::tui::screens::tests::render;

    #[test]
    fn test_flagged_transaction_shows_reason() {
        let mut app = test_app();
        update(
            &mut app,
            Action::NavigateWith(ScreenId::TransactionDetail, Handoff::Transaction(8)),
        );
        let text = render(&app, 0);
        assert!(text.contains("Online Store"));
        assert!(text.contains("Unusual merchant"));
        assert!(!text.contains("Repeat payment"));
    }

    #[test]
    fn test_transfer_offers_repeat() {
        let mut app = test_app();
        update(
            &mut app,
            Action::NavigateWith(ScreenId::TransactionDetail, Handoff::Transaction(1)),
        );
        let text = render(&app, 0);
        assert!(text.contains("Repeat payment"));
    }
}
