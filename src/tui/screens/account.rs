use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{hints, label_value, section};
use crate::auth::AuthMethod;
use crate::core::state::App;

pub fn profile(frame: &mut Frame, area: Rect, app: &App) {
    let p = &app.reference.profile;
    let lines = vec![
        Line::from(Span::styled(
            p.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        label_value("Phone", p.phone.clone()),
        label_value("Email", p.email.clone()),
        label_value(
            "Blockchain ID",
            format!("{} ({})", p.blockchain_id, p.blockchain_id_type),
        ),
        label_value("Last verified", p.last_verified.clone()),
        label_value("Security level", p.security_level.clone()),
        Line::from(""),
        hints("g  Security settings    f  Funding sources"),
    ];
    frame.render_widget(Paragraph::new(lines).block(section("Profile")), area);
}

pub fn biometric_auth(frame: &mut Frame, area: Rect, app: &App) {
    let method = app
        .auth_session
        .map(|s| s.method)
        .unwrap_or(app.auth_method);
    let icon = match method {
        AuthMethod::Fingerprint => "[ ((@)) ]",
        AuthMethod::Face => "[ (o_o) ]",
    };
    let status = if app.auth_in_progress() {
        Line::from(Span::styled(
            format!("Scanning {}...", method.label().to_lowercase()),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        hints("Enter  Scan    m  Switch method    Esc  Cancel")
    };
    let target = app
        .navigation
        .pending_target()
        .map(|s| format!("to open {}", s.title()))
        .unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled(
            "Authentication Required",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(target, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(icon),
        Line::from(format!("Use {}", method.label())),
        Line::from(""),
        status,
    ];
    let [center] = Layout::vertical([Constraint::Length(lines.len() as u16)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), center);
}

pub fn security_settings(frame: &mut Frame, area: Rect, app: &App) {
    let gating = if app.navigation.gating_enabled() {
        Span::styled("On", Style::default().fg(Color::Green))
    } else {
        Span::styled("Off", Style::default().fg(Color::Red))
    };
    let lines = vec![
        Line::from(vec![Span::raw("Biometric authentication: "), gating]),
        label_value("Method", app.auth_method.label().to_string()),
        label_value(
            "Protected screens",
            crate::core::screen::SENSITIVE_SCREENS
                .iter()
                .map(|s| s.title())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Line::from(""),
        hints("Enter  Toggle authentication    m  Switch method"),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(section("Security Settings")),
        area,
    );
}

#[cfg(test)]
mod tests {
    use crate::core::action::{Action, update};
    use crate::core::screen::ScreenId;
    use crate::test_support::test_app;
    use crate::tui::screens::tests::render;

    #[test]
    fn test_gate_names_its_target() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(ScreenId::SendMoney));
        let text = render(&app, 0);
        assert!(text.contains("Authentication Required"));
        assert!(text.contains("to open Send Money"));
    }

    #[test]
    fn test_gate_shows_scan_in_progress() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(ScreenId::Profile));
        update(&mut app, Action::ToggleAuthMethod);
        update(&mut app, Action::BeginAuthentication);
        let text = render(&app, 0);
        assert!(text.contains("Scanning"));
    }
}
