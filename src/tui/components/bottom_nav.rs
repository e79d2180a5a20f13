//! # Bottom Navigation
//!
//! The tab strip under every screen that shows chrome. Screens outside the
//! strip (budget, settings, ...) highlight nothing.

use crate::core::screen::ScreenId;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const TABS: [(ScreenId, &str); 5] = [
    (ScreenId::Dashboard, "Home"),
    (ScreenId::Wallet, "Wallet"),
    (ScreenId::SendMoney, "Send"),
    (ScreenId::Insights, "Insights"),
    (ScreenId::Profile, "Profile"),
];

fn tab_index(screen: ScreenId) -> Option<usize> {
    TABS.iter().position(|(s, _)| *s == screen)
}

/// Tab to the right of `screen`, wrapping. Off-strip screens go to the first tab.
pub fn next_tab(screen: ScreenId) -> ScreenId {
    match tab_index(screen) {
        Some(i) => TABS[(i + 1) % TABS.len()].0,
        None => TABS[0].0,
    }
}

pub fn prev_tab(screen: ScreenId) -> ScreenId {
    match tab_index(screen) {
        Some(i) => TABS[(i + TABS.len() - 1) % TABS.len()].0,
        None => TABS[TABS.len() - 1].0,
    }
}

pub struct BottomNav {
    pub current: ScreenId,
}

impl Component for BottomNav {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::with_capacity(TABS.len() * 2);
        for (screen, label) in TABS {
            let style = if screen == self.current {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!(" {label} "), style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Line::from(spans).centered(), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_tab_cycling_wraps() {
        assert_eq!(next_tab(ScreenId::Dashboard), ScreenId::Wallet);
        assert_eq!(next_tab(ScreenId::Profile), ScreenId::Dashboard);
        assert_eq!(prev_tab(ScreenId::Dashboard), ScreenId::Profile);
    }

    #[test]
    fn test_off_strip_screens() {
        assert_eq!(next_tab(ScreenId::Budget), ScreenId::Dashboard);
        assert_eq!(prev_tab(ScreenId::FundingSources), ScreenId::Profile);
    }

    #[test]
    fn test_renders_every_tab() {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut nav = BottomNav {
            current: ScreenId::Wallet,
        };
        terminal.draw(|f| nav.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        for (_, label) in TABS {
            assert!(text.contains(label), "missing {label}");
        }
    }
}
