use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{BottomNav, TitleBar, ToastView};
use crate::tui::screens;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use std::time::Instant;

/// Short status shown in the title bar while background work runs.
fn activity(app: &App) -> Option<String> {
    if app.auth_in_progress() {
        Some("Scanning...".to_string())
    } else if app.transfer_in_flight() {
        Some("Sending...".to_string())
    } else {
        None
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &TuiState) {
    use Constraint::{Length, Min};
    let screen = app.current_screen();

    if screen.shows_chrome() {
        let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
        let [title_area, main_area, nav_area] = layout.areas(frame.area());

        TitleBar::new(
            screen,
            tui.session_elapsed(Instant::now()),
            app.navigation.gating_enabled(),
            activity(app),
        )
        .render(frame, title_area);
        screens::draw_screen(frame, main_area, app, tui.selected);
        BottomNav { current: screen }.render(frame, nav_area);
    } else {
        screens::draw_screen(frame, frame.area(), app, tui.selected);
    }

    // Toast floats over everything
    if let Some(toast) = &app.toast {
        ToastView::new(toast).render(frame, frame.area());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::screen::ScreenId;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(90, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let tui = TuiState::new(app.current_screen());
        terminal.draw(|f| draw_ui(f, app, &tui)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_draw_ui() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(ScreenId::Dashboard));
        let text = draw(&app);
        assert!(text.contains("Munir Wallet | Dashboard | 0:00"));
        assert!(text.contains("Home"));
    }

    #[test]
    fn test_welcome_has_no_chrome() {
        let app = test_app();
        assert_eq!(app.current_screen(), ScreenId::Welcome);
        let text = draw(&app);
        assert!(!text.contains("Munir Wallet |"));
    }

    #[test]
    fn test_toast_overlays_screen() {
        let mut app = test_app();
        update(&mut app, Action::SetGatingEnabled(false));
        let text = draw(&app);
        assert!(text.contains("Biometric authentication disabled"));
    }

    #[test]
    fn test_activity_while_sending() {
        let mut app = test_app();
        update(&mut app, Action::SetGatingEnabled(false));
        update(&mut app, Action::Navigate(ScreenId::SendMoney));
        update(&mut app, Action::SendMoney);
        assert_eq!(activity(&app).as_deref(), Some("Sending..."));
        assert!(draw(&app).contains("Sending..."));
    }
}
