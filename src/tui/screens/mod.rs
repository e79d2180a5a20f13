//! # Screens
//!
//! One render function per `ScreenId`. Each reads `App` and draws into the
//! body area; none of them mutate state. List cursors come from `TuiState`.

mod account;
mod history;
mod home;
mod insights;
mod money;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::core::budget::BudgetStatus;
use crate::core::screen::ScreenId;
use crate::core::state::App;

pub fn draw_screen(frame: &mut Frame, area: Rect, app: &App, selected: usize) {
    match app.current_screen() {
        ScreenId::Welcome => home::welcome(frame, area),
        ScreenId::Dashboard => home::dashboard(frame, area, app, selected),
        ScreenId::PaymentSuccess => home::payment_success(frame, area, app),
        ScreenId::SendMoney => money::send_money(frame, area, app),
        ScreenId::Wallet => money::wallet(frame, area, app, selected),
        ScreenId::FundingSources => money::funding_sources(frame, area, app, selected),
        ScreenId::Insights => insights::insights(frame, area, app),
        ScreenId::Budget => insights::budget(frame, area, app, selected),
        ScreenId::Transactions => history::transactions(frame, area, app, selected),
        ScreenId::TransactionDetail => match app.selected_transaction() {
            Some(transaction) => history::transaction_detail(frame, area, app, transaction),
            None => placeholder(
                frame,
                area,
                ScreenId::TransactionDetail.title(),
                "No transaction selected. Pick one from the history.",
            ),
        },
        ScreenId::Profile => account::profile(frame, area, app),
        ScreenId::BiometricAuth => account::biometric_auth(frame, area, app),
        ScreenId::SecuritySettings => account::security_settings(frame, area, app),
    }
}

/// Degraded view for a screen that has nothing to show.
pub fn placeholder(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    frame.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(section(title)),
        area,
    );
}

fn section(title: &str) -> Block<'static> {
    Block::bordered()
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {title} "))
        .padding(Padding::horizontal(1))
}

fn hints(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

fn label_value(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

/// Formats a derived figure, or the reason it cannot be shown.
fn or_reason<T, E: std::fmt::Display>(result: Result<T, E>, show: impl FnOnce(T) -> String) -> String {
    match result {
        Ok(value) => show(value),
        Err(e) => format!("unavailable ({e})"),
    }
}

fn status_color(status: BudgetStatus) -> Color {
    match status {
        BudgetStatus::Normal => Color::Green,
        BudgetStatus::Warning => Color::Yellow,
        BudgetStatus::Danger => Color::Red,
    }
}

fn selectable_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: Vec<ListItem<'static>>,
    selected: usize,
) {
    let mut state = ListState::default().with_selected((!items.is_empty()).then_some(selected));
    let list = List::new(items)
        .block(section(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut state);
}
