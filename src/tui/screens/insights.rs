use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, ListItem, Paragraph, Wrap};
use rust_decimal::prelude::ToPrimitive;

use super::{hints, label_value, placeholder, section, selectable_list, status_color};
use crate::core::budget::BudgetSummary;
use crate::core::conversion::{CurrencyCode, format_money};
use crate::core::state::App;

pub fn insights(frame: &mut Frame, area: Rect, app: &App) {
    let [trend_area, savings_area, flow_area] = Layout::vertical([
        Constraint::Length(app.reference.monthly_trends.len() as u16 + 2),
        Constraint::Min(0),
        Constraint::Length(6),
    ])
    .areas(area);

    let trends: Vec<Line> = app
        .reference
        .monthly_trends
        .iter()
        .map(|m| {
            let suffix = if m.forecast { "  (forecast)" } else { "" };
            Line::from(format!(
                "{:<4} spent {:>10}  earned {:>10}{suffix}",
                m.month,
                format_money(m.spending, CurrencyCode::USD),
                format_money(m.income, CurrencyCode::USD)
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(trends).block(section("Monthly Trends")), trend_area);

    let mut savings: Vec<Line> = app
        .reference
        .savings_recommendations
        .iter()
        .flat_map(|r| {
            [
                Line::from(format!(
                    "{}  (save ~{}/mo)",
                    r.title,
                    format_money(r.potential, CurrencyCode::USD)
                )),
                Line::from(Span::styled(
                    r.description.clone(),
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        })
        .collect();
    for anomaly in &app.reference.anomalies {
        if let Some(t) = app.reference.transaction(anomaly.transaction_id) {
            savings.push(Line::from(Span::styled(
                format!("⚠ {}: {}", t.name, anomaly.reason),
                Style::default().fg(Color::Yellow),
            )));
        }
    }
    frame.render_widget(
        Paragraph::new(savings)
            .wrap(Wrap { trim: true })
            .block(section("Recommendations")),
        savings_area,
    );

    let flow = &app.reference.cash_flow;
    frame.render_widget(
        Paragraph::new(vec![
            label_value("Current", format_money(flow.current_balance, CurrencyCode::USD)),
            label_value(
                "End of month",
                format_money(flow.end_of_month_prediction, CurrencyCode::USD),
            ),
            label_value("Next month", format_money(flow.next_month, CurrencyCode::USD)),
            hints("b  Budget"),
        ])
        .block(section("Cash Flow Forecast")),
        flow_area,
    );
}

pub fn budget(frame: &mut Frame, area: Rect, app: &App, selected: usize) {
    let [summary_area, list_area] =
        Layout::vertical([Constraint::Length(5), Constraint::Min(0)]).areas(area);

    match app.budget.summary() {
        Ok(summary) => budget_summary(frame, summary_area, &summary),
        Err(e) => placeholder(frame, summary_area, "Monthly Budget", &e.to_string()),
    }

    let items: Vec<ListItem> = app
        .budget
        .categories()
        .into_iter()
        .map(|category| match category.report() {
            Ok(report) => ListItem::new(Line::from(vec![
                Span::raw(format!(
                    "{:<15} {:>10} / {:>10}  ",
                    category.name,
                    format_money(category.spent, CurrencyCode::USD),
                    format_money(category.budgeted, CurrencyCode::USD)
                )),
                Span::styled(
                    format!("{:>6}% {}", report.percentage.round_dp(1), report.status),
                    Style::default().fg(status_color(report.status)),
                ),
            ])),
            Err(e) => ListItem::new(format!("{:<15} {e}", category.name)),
        })
        .collect();
    selectable_list(frame, list_area, "Categories (+/- adjust)", items, selected);
}

fn budget_summary(frame: &mut Frame, area: Rect, summary: &BudgetSummary) {
    let [totals_area, gauge_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Length(1)])
            .areas(section("Monthly Budget").inner(area));
    frame.render_widget(section("Monthly Budget"), area);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(format!(
                "Spent {} of {}",
                format_money(summary.total_spent, CurrencyCode::USD),
                format_money(summary.total_budget, CurrencyCode::USD)
            )),
            label_value("Remaining", format_money(summary.remaining, CurrencyCode::USD)),
        ]),
        totals_area,
    );
    let ratio = (summary.percentage_used / rust_decimal::Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(status_color(summary.health())))
            .ratio(ratio)
            .label(format!("{}%", summary.percentage_used.round_dp(1))),
        gauge_area,
    );
}
