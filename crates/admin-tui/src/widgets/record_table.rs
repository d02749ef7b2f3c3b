//! Record table — the scrollable result view on the right.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one row |
//! | `↓` / `j` | Move cursor down one row |
//! | `PageUp` / `Ctrl+u` | Move up one page |
//! | `PageDown` / `Ctrl+d` | Move down one page |
//! | `G` | Jump to the last row |
//!
//! `offset` is the index of the first visible row; the cursor is kept inside
//! the window, scrolling it when the cursor crosses an edge.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use admin_core::types::scalar_text;
use admin_core::{EntityKind, Record};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        Block, Cell as TableCell, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, StatefulWidget, Table, Widget,
    },
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnStyle {
    Plain,
    /// Coloured by status bucket.
    Status,
    /// Coloured by a stable per-value palette entry.
    Label,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    /// Field paths tried in order; the first with a value wins.
    pub paths: &'static [&'static str],
    pub width: Constraint,
    pub style: ColumnStyle,
}

const fn col(
    header: &'static str,
    paths: &'static [&'static str],
    width: Constraint,
    style: ColumnStyle,
) -> Column {
    Column {
        header,
        paths,
        width,
        style,
    }
}

use ColumnStyle::{Label, Plain, Status};
use Constraint::{Fill, Length};

const USER_COLUMNS: &[Column] = &[
    col("Name", &["name"], Fill(2), Plain),
    col("Email", &["email"], Fill(3), Plain),
    col("Phone", &["phone"], Length(14), Plain),
    col("Project", &["project"], Fill(2), Label),
    col("Property", &["property"], Fill(1), Plain),
    col("Status", &["status"], Length(9), Status),
    col("Payment", &["paymentStatus"], Length(11), Status),
    col("Joined", &["joinDate"], Length(13), Plain),
];

const BROKER_COLUMNS: &[Column] = &[
    col("Name", &["name"], Fill(2), Plain),
    col("Email", &["email"], Fill(3), Plain),
    col("Phone", &["phone"], Length(14), Plain),
    col("Clients", &["clientsManaged"], Length(8), Plain),
    col("Deals", &["successfulDeals"], Length(6), Plain),
    col("Performance", &["performance"], Length(12), Status),
    col("Status", &["status"], Length(9), Status),
    col("Joined", &["joinDate"], Length(13), Plain),
];

const SUPPLIER_COLUMNS: &[Column] = &[
    col("Company", &["companyName"], Fill(3), Plain),
    col("Contact", &["contactPerson"], Fill(2), Plain),
    col("Email", &["email"], Fill(3), Plain),
    col("Phone", &["phone"], Length(14), Plain),
    col("Category", &["category"], Fill(2), Label),
    col("Location", &["location"], Fill(2), Plain),
    col("Status", &["status"], Length(9), Status),
    col("Verification", &["verificationStatus"], Length(12), Status),
];

const PROPERTY_COLUMNS: &[Column] = &[
    col("Flat", &["flatNo"], Length(8), Plain),
    col("Project", &["projectName"], Fill(2), Label),
    col("Location", &["location"], Fill(2), Plain),
    col("Owners", &["users[].name", "user.name"], Fill(3), Plain),
    col("Status", &["status"], Length(10), Status),
];

/// The columns shown for an entity.
pub fn columns_for(kind: EntityKind) -> &'static [Column] {
    match kind {
        EntityKind::Users => USER_COLUMNS,
        EntityKind::Brokers => BROKER_COLUMNS,
        EntityKind::Suppliers => SUPPLIER_COLUMNS,
        EntityKind::Properties => PROPERTY_COLUMNS,
    }
}

/// Display text of a column: every scalar the first non-empty path
/// resolves to, comma separated.
pub fn cell_text(record: &Record, column: &Column) -> String {
    column
        .paths
        .iter()
        .map(|path| {
            record
                .resolve(path)
                .into_iter()
                .filter_map(scalar_text)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct RecordTableState {
    /// Index of the highlighted row within the current view.
    pub cursor: usize,
    /// Index of the first visible row.
    pub offset: usize,
    /// Cached from the last render so `handle()` can page by screenfuls.
    last_height: Cell<usize>,
}

impl Default for RecordTableState {
    fn default() -> Self {
        Self {
            cursor: 0,
            offset: 0,
            last_height: Cell::new(20),
        }
    }
}

impl RecordTableState {
    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    /// Handle a navigation event for a view of `total` rows.
    pub fn handle(&mut self, event: &AppEvent, total: usize) {
        if total == 0 {
            self.reset();
            return;
        }
        let last = total - 1;

        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.cursor = (self.cursor + 1).min(last),
            AppEvent::ScrollUp => self.cursor = self.cursor.saturating_sub(PAGE_STEP),
            AppEvent::ScrollDown => self.cursor = (self.cursor + PAGE_STEP).min(last),
            AppEvent::ScrollToEnd => self.cursor = last,
            _ => return,
        }
        self.follow_cursor();
        tracing::debug!(cursor = self.cursor, offset = self.offset, "table: moved");
    }

    /// Keep the cursor inside a view that now has `total` rows, e.g. after
    /// the query or the underlying records changed.
    pub fn clamp(&mut self, total: usize) {
        if total == 0 {
            self.reset();
            return;
        }
        self.cursor = self.cursor.min(total - 1);
        self.offset = self.offset.min(self.cursor);
        self.follow_cursor();
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    fn follow_cursor(&mut self) {
        let height = self.height();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct RecordTable<'a> {
    kind: EntityKind,
    rows: &'a [Record],
    total: usize,
    stats: &'a [(String, usize)],
    state: &'a RecordTableState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> RecordTable<'a> {
    /// `rows` is the evaluated view; `total` the size of the unfiltered
    /// collection.
    pub fn new(
        kind: EntityKind,
        rows: &'a [Record],
        total: usize,
        state: &'a RecordTableState,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            kind,
            rows,
            total,
            stats: &[],
            state,
            focused,
            theme,
        }
    }

    /// Per-status counts over the whole collection, shown in the title.
    pub fn stats(mut self, stats: &'a [(String, usize)]) -> Self {
        self.stats = stats;
        self
    }

    fn title(&self) -> Line<'static> {
        let mut spans = vec![Span::raw(format!(
            " {} · {} of {} shown ",
            self.kind.title(),
            self.rows.len(),
            self.total
        ))];
        for (label, count) in self.stats {
            spans.push(Span::styled(
                format!("{label} {count} "),
                self.theme.status_style(label),
            ));
        }
        Line::from(spans)
    }

    fn cell(&self, record: &Record, column: &Column) -> TableCell<'static> {
        let text = cell_text(record, column);
        let style = match column.style {
            ColumnStyle::Plain => Style::default(),
            ColumnStyle::Status => self.theme.status_style(&text),
            ColumnStyle::Label => self.theme.label_style(&text),
        };
        TableCell::from(Span::styled(text, style))
    }
}

impl Widget for RecordTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title(self.title()).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.rows.is_empty() {
            let msg = if self.total == 0 {
                "no records"
            } else {
                "no records match (x to clear filters)"
            };
            Paragraph::new(Span::styled(msg, self.theme.muted)).render(inner, buf);
            return;
        }

        // One row is taken by the header.
        let height = (inner.height as usize).saturating_sub(1).max(1);
        self.state.last_height.set(height);

        let start = self.state.offset.min(self.rows.len().saturating_sub(1));
        let end = (start + height).min(self.rows.len());
        let columns = columns_for(self.kind);

        let rows: Vec<Row> = self.rows[start..end]
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let row = Row::new(columns.iter().map(|c| self.cell(record, c)));
                if self.focused && start + i == self.state.cursor {
                    row.style(self.theme.table_cursor)
                } else {
                    row
                }
            })
            .collect();

        let header = Row::new(columns.iter().map(|c| c.header)).style(self.theme.table_header);

        let text_area = Rect {
            width: inner.width.saturating_sub(1),
            ..inner
        };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Widget::render(
            Table::new(rows, columns.iter().map(|c| c.width))
                .header(header)
                .column_spacing(1),
            text_area,
            buf,
        );

        let mut sb_state = ScrollbarState::new(self.rows.len())
            .position(start)
            .viewport_content_length(height);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
