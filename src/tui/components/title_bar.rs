//! # TitleBar Component
//!
//! Top status bar: a fixed context label, the current status message, and a
//! scrolled-away indicator when the transcript is not following its tail.
//!
//! Purely presentational - all three props come from elsewhere (`context`
//! from config, `status_message` from core state, `following` from TUI
//! state), and the bar just renders what it's given.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    /// e.g. "gitup (push: origin/main)"
    pub context: String,
    /// Transient status (e.g. "Running git...", "Done")
    pub status_message: String,
    /// Whether the transcript is stuck to its bottom edge.
    pub following: bool,
}

impl TitleBar {
    pub fn new(context: String, status_message: String, following: bool) -> Self {
        Self {
            context,
            status_message,
            following,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if !self.following {
            format!("{} | {} | ↑ scrolled", self.context, self.status_message)
        } else if self.status_message.is_empty() {
            self.context.clone()
        } else {
            format!("{} | {}", self.context, self.status_message)
        };

        frame.render_widget(Span::raw(title_text), area);
    }
}
