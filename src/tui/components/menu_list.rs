//! # MenuList Component
//!
//! The task list in the left pane. A transient wrapper over core's `Menu`:
//! the selection lives in core state, so this component only translates it
//! into a ratatui `List` each frame.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};

use crate::core::menu::Menu;
use crate::tui::component::Component;

pub struct MenuList<'a> {
    menu: &'a Menu,
    /// Dimmed while a text prompt has focus.
    active: bool,
}

impl<'a> MenuList<'a> {
    pub fn new(menu: &'a Menu, active: bool) -> Self {
        Self { menu, active }
    }
}

impl Component for MenuList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help_text = " j/k move  enter choose  q quit ";

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Tasks ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = self
            .menu
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let is_selected = i == self.menu.selected();
                let marker = if is_selected { "[x] " } else { "[ ] " };

                let label_style = if is_selected && self.active {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if is_selected {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Magenta)),
                    Span::styled(entry.label, label_style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        let mut list_state = ListState::default().with_selected(Some(self.menu.selected()));
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
