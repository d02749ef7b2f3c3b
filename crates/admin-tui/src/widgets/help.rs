//! Help popup — centred overlay listing keybindings and commands.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit"),
    ("[  /  ]", "Previous / next screen"),
    ("Tab", "Cycle focus: filters → table → search"),
    ("/", "Focus search bar"),
    ("Escape", "Leave search bar"),
    ("↑ k  /  ↓ j", "Move between filters or rows"),
    ("← h  /  → l, Enter", "Cycle the selected filter or sort"),
    ("PageUp  /  Ctrl+u", "Page up"),
    ("PageDown / Ctrl+d", "Page down"),
    ("G", "Jump to last row"),
    ("x", "Clear search, filters and sort"),
    (":", "Open command bar"),
    ("?", "Toggle this help popup"),
];

const COMMANDS: &[(&str, &str)] = &[
    (":sort <key|none>", "e.g. most-deals, newest-first"),
    (":filter <field> <value|any>", "e.g. filter status Active"),
    (":tab <entity>", "users, brokers, suppliers, properties"),
    (":theme <name>", "default, gruvbox"),
    (":clear  :help  :q", ""),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (BINDINGS.len() + COMMANDS.len() + 3) as u16;
        let popup = centered_rect(84, height, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" legacy-admin — keybindings (? to close) ")
            .border_style(self.theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let entry = |(key, desc): &(&'static str, &'static str)| {
            Line::from(vec![
                Span::styled(format!("  {key:<30}"), bold),
                Span::raw(*desc),
            ])
        };

        let mut lines: Vec<Line> = BINDINGS.iter().map(entry).collect();
        lines.push(Line::default());
        lines.extend(COMMANDS.iter().map(entry));

        Paragraph::new(lines).render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
