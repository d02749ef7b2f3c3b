//! Tab bar — one tab per management screen, with record counts.

use crate::app::TabState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Tabs, Widget},
};

/// Renders the 1-line strip of tabs at the top of the screen.
///
/// Each label carries the collection size; a `*` suffix marks tabs whose
/// view is narrowed by a search, filter or sort.
pub struct TabBar<'a> {
    tabs: &'a [TabState],
    active: usize,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(tabs: &'a [TabState], active: usize, theme: &'a Theme) -> Self {
        Self { tabs, active, theme }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let labels: Vec<Line> = self
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let marker = if tab.query().is_identity() { "" } else { "*" };
                Line::from(format!(
                    " {}:{} ({}){marker} ",
                    i + 1,
                    tab.kind.title(),
                    tab.records.len()
                ))
            })
            .collect();

        Tabs::new(labels)
            .select(self.active)
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .divider("")
            .render(area, buf);

        let hint = " [ ]:tab  ::cmd  ?:help  q:quit ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(hint_x, area.y, hint, self.theme.muted);
    }
}
