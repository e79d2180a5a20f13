//! # TitleBar Component
//!
//! Top status bar showing where the user is, how long the session has run
//! and whether the gate is armed.
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! TitleBar is purely presentational: it receives all data as props and has
//! no internal state.
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(ScreenId::Wallet, elapsed, true, Some("Scanning...".into()));
//! title_bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Busy**: `"Munir Wallet | Send Money | 2:05 | 🔒 | Sending..."`
//! 2. **Gated**: `"Munir Wallet | Send Money | 2:05 | 🔒"`
//! 3. **Default**: `"Munir Wallet | Send Money | 2:05"`

use std::time::Duration;

use crate::core::screen::ScreenId;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Session length as `M:SS`. Minutes are not capped at 59.
pub fn format_session_time(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub struct TitleBar {
    pub screen: ScreenId,
    /// Time since the app started.
    pub session: Duration,
    /// Whether sensitive screens currently require authentication.
    pub gating_enabled: bool,
    /// Transient activity, e.g. "Scanning..." while a provider runs.
    pub activity: Option<String>,
}

impl TitleBar {
    pub fn new(
        screen: ScreenId,
        session: Duration,
        gating_enabled: bool,
        activity: Option<String>,
    ) -> Self {
        Self {
            screen,
            session,
            gating_enabled,
            activity,
        }
    }

    fn text(&self) -> String {
        let mut text = format!(
            "Munir Wallet | {} | {}",
            self.screen.title(),
            format_session_time(self.session)
        );
        if self.gating_enabled {
            text.push_str(" | 🔒");
        }
        if let Some(activity) = &self.activity {
            text.push_str(" | ");
            text.push_str(activity);
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
