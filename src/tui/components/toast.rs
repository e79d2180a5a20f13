//! # Toast
//!
//! One-line notification floating above the bottom of the body. The event
//! loop decides when it expires; this only draws it.

use crate::core::state::{Toast, ToastKind};
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Clear, Paragraph};

pub struct ToastView<'a> {
    pub toast: &'a Toast,
}

impl<'a> ToastView<'a> {
    pub fn new(toast: &'a Toast) -> Self {
        Self { toast }
    }

    /// Bordered box centred horizontally, sitting on the bottom edge of `area`.
    pub fn placement(&self, area: Rect) -> Rect {
        let width = (self.toast.message.chars().count() as u16 + 4).min(area.width);
        let height = 3.min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + area.height - height,
            width,
            height,
        }
    }
}

fn kind_style(kind: ToastKind) -> Style {
    match kind {
        ToastKind::Success => Style::default().fg(Color::Green),
        ToastKind::Info => Style::default().fg(Color::Cyan),
        ToastKind::Warning => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    }
}

impl Component for ToastView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rect = self.placement(area);
        let style = kind_style(self.toast.kind);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(self.toast.message.as_str())
                .style(style)
                .centered()
                .block(Block::bordered().border_style(style)),
            rect,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn toast(message: &str) -> Toast {
        Toast {
            serial: 1,
            message: message.to_string(),
            kind: ToastKind::Success,
        }
    }

    #[test]
    fn test_placement_is_bottom_centred() {
        let t = toast("hello");
        let rect = ToastView::new(&t).placement(Rect::new(0, 0, 40, 20));
        assert_eq!(rect, Rect::new(15, 17, 9, 3));
    }

    #[test]
    fn test_placement_clamps_to_area() {
        let t = toast(&"x".repeat(100));
        let rect = ToastView::new(&t).placement(Rect::new(0, 0, 30, 2));
        assert_eq!(rect.width, 30);
        assert_eq!(rect.height, 2);
    }

    #[test]
    fn test_renders_message() {
        let backend = TestBackend::new(50, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        let t = toast("$100.00 sent successfully!");
        terminal
            .draw(|f| ToastView::new(&t).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("sent successfully!"));
    }
}
