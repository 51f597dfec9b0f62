//! # Transcript Component
//!
//! The right pane: a scrollable log of the command lines that were run and
//! their captured output. Follows the persistent state + transient wrapper
//! pattern - `TranscriptState` lives in `TuiState`, `Transcript` is created
//! each frame with borrowed state.
//!
//! The view sticks to the bottom while new output arrives; any upward
//! scroll unsticks it, and the End key sticks it again.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::TranscriptEntry;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const BANNER: &str = r#"  ____ ___ _____ _   _ ____
 / ___|_ _|_   _| | | |  _ \
| |  _ | |  | | | | | | |_) |
| |_| || |  | | | |_| |  __/
 \____|___| |_|  \___/|_|"#;

/// Persistent scroll state for the transcript pane.
pub struct TranscriptState {
    pub scroll_state: ScrollViewState,
    following: bool,
}

impl TranscriptState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            following: true,
        }
    }

    /// Re-enable stick-to-bottom (after new output, or on the End key).
    pub fn follow(&mut self) {
        self.following = true;
    }

    pub fn is_following(&self) -> bool {
        self.following
    }
}

impl EventHandler for TranscriptState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.following = false;
                Some(())
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                Some(())
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.following = false;
                Some(())
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                Some(())
            }
            TuiEvent::ScrollToBottom => {
                self.follow();
                Some(())
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the transcript pane.
pub struct Transcript<'a> {
    entries: &'a [TranscriptEntry],
    state: &'a mut TranscriptState,
}

impl<'a> Transcript<'a> {
    pub fn new(entries: &'a [TranscriptEntry], state: &'a mut TranscriptState) -> Self {
        Self { entries, state }
    }

    fn render_banner(&self, frame: &mut Frame, area: Rect) {
        let banner_height = BANNER.lines().count() as u16;
        let text_lines = vec![
            Line::styled("git and SSH setup tasks", Style::default().fg(Color::DarkGray)),
            Line::styled(
                format!("v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::DarkGray),
            ),
        ];

        let [banner_area, _, text_area] = Layout::vertical([
            Constraint::Length(banner_height),
            Constraint::Length(1),
            Constraint::Length(text_lines.len() as u16),
        ])
        .flex(Flex::Center)
        .areas(area);

        let banner = Paragraph::new(BANNER)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD));
        frame.render_widget(banner, banner_area);

        let text = Paragraph::new(text_lines).alignment(Alignment::Center);
        frame.render_widget(text, text_area);
    }
}

impl Component for Transcript<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.entries.is_empty() {
            self.render_banner(frame, area);
            return;
        }

        let content_width = area.width.saturating_sub(1);

        // Build paragraphs and cache heights for the canvas size
        let rendered: Vec<(Paragraph, u16)> = self
            .entries
            .iter()
            .map(|entry| {
                let (text, style) = style_entry(entry);
                let paragraph = Paragraph::new(text).style(style).wrap(Wrap { trim: false });
                let height = paragraph.line_count(content_width) as u16;
                (paragraph, height)
            })
            .collect();

        let total_height: u16 = rendered.iter().map(|(_, h)| *h).sum();

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (paragraph, height) in rendered {
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(paragraph, rect);
            y_offset += height;
        }

        if self.state.following {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

fn style_entry(entry: &TranscriptEntry) -> (String, Style) {
    match entry {
        TranscriptEntry::Command(cmd) => (
            format!("$ {cmd}"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        TranscriptEntry::Output(text) => (text.clone(), Style::default().fg(Color::Gray)),
        TranscriptEntry::Failure(text) => (text.clone(), Style::default().fg(Color::Red)),
        TranscriptEntry::Notice(text) => (text.clone(), Style::default().fg(Color::Green)),
    }
}
