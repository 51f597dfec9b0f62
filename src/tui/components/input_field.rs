//! # InputField Component
//!
//! The single-line prompt at the bottom of the screen. The buffer itself is
//! core state (`App::input`); this component only renders it and places the
//! terminal cursor. When the buffer is wider than the field, the tail is
//! shown - the cursor always sits at the end of the line.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::state::InputPrompt;
use crate::tui::component::Component;

pub struct InputField<'a> {
    prompt: Option<&'a InputPrompt>,
}

impl<'a> InputField<'a> {
    pub fn new(prompt: Option<&'a InputPrompt>) -> Self {
        Self { prompt }
    }
}

impl Component for InputField<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        match self.prompt {
            Some(prompt) => {
                let block = Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Green))
                    .title(format!(" {} ", prompt.label));

                // Reserve one cell so the cursor fits after the last char.
                let inner = area.width.saturating_sub(2) as usize;
                let visible = visible_tail(&prompt.buffer, inner.saturating_sub(1));

                let input = Paragraph::new(visible)
                    .block(block)
                    .style(Style::default().fg(Color::Green));
                frame.render_widget(input, area);

                let cursor_x = area.x + 1 + visible.width() as u16;
                frame.set_cursor_position((cursor_x, area.y + 1));
            }
            None => {
                let block = Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Input ");
                let hint = Paragraph::new("choose a task to fill in its details")
                    .block(block)
                    .style(Style::default().fg(Color::DarkGray));
                frame.render_widget(hint, area);
            }
        }
    }
}

/// The longest suffix of `buffer` that fits in `max_width` columns.
fn visible_tail(buffer: &str, max_width: usize) -> &str {
    let mut start = buffer.len();
    let mut width = 0;
    for (idx, ch) in buffer.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        start = idx;
    }
    &buffer[start..]
}
