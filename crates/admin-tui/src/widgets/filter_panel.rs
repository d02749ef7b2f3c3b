//! Filter panel — the dropdown filters and sort selector in the left pane.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move between rows; the last row is the sort
//!   selector when the entity has any sort strategies.
//! - `→`/`l` or `Enter` advances the row to its next option, `←`/`h` goes
//!   back. Options wrap around through the sentinel (`All Status`, `Sort By`).

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use admin_core::descriptor::{EntityDescriptor, FilterSpec, SortStrategy, SORT_SENTINEL};
use admin_core::{FilterValue, Query, Record, SortKey};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FilterPanelState {
    pub filters: Vec<FilterSpec>,
    pub sorts: Vec<SortStrategy>,
    /// Current selection per filter, parallel to `filters`. `None` is the
    /// sentinel.
    pub selected: Vec<Option<String>>,
    /// Index into `sorts`, or `None` for the original order.
    pub sort: Option<usize>,
    /// Row under the cursor.
    pub cursor: usize,
}

impl FilterPanelState {
    pub fn new(descriptor: &EntityDescriptor) -> Self {
        Self {
            filters: descriptor.filters.clone(),
            sorts: descriptor.sorts.clone(),
            selected: vec![None; descriptor.filters.len()],
            sort: None,
            cursor: 0,
        }
    }

    pub fn row_count(&self) -> usize {
        self.filters.len() + usize::from(!self.sorts.is_empty())
    }

    fn is_sort_row(&self, row: usize) -> bool {
        row == self.filters.len() && !self.sorts.is_empty()
    }

    /// Handle an event while the panel is focused. `records` supplies the
    /// options of filters that list distinct values.
    pub fn handle(&mut self, event: &AppEvent, records: &[Record]) {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "filters: cursor up");
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < self.row_count() {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "filters: cursor down");
            }
            AppEvent::Nav(Direction::Right) | AppEvent::Enter => self.cycle(true, records),
            AppEvent::Nav(Direction::Left) => self.cycle(false, records),
            _ => {}
        }
    }

    fn cycle(&mut self, forward: bool, records: &[Record]) {
        let row = self.cursor;
        if self.is_sort_row(row) {
            // choices: [None, Some(0), Some(1), ...]
            let current = self.sort.map_or(0, |i| i + 1);
            self.sort = match step(current, self.sorts.len() + 1, forward) {
                0 => None,
                n => Some(n - 1),
            };
            tracing::debug!(sort = ?self.sort_key(), "filters: sort changed");
            return;
        }

        let Some(spec) = self.filters.get(row) else {
            return;
        };
        let options = spec.options(records);
        let current = self.selected[row]
            .as_ref()
            .and_then(|v| options.iter().position(|o| o == v))
            .map_or(0, |i| i + 1);
        self.selected[row] = match step(current, options.len() + 1, forward) {
            0 => None,
            n => Some(options[n - 1].clone()),
        };
        tracing::debug!(
            field = %spec.field,
            value = ?self.selected[row],
            "filters: selection changed"
        );
    }

    /// Reset every filter and the sort to their sentinels.
    pub fn clear(&mut self) {
        self.selected.iter_mut().for_each(|s| *s = None);
        self.sort = None;
    }

    /// Set a filter directly. Returns `false` when the entity has no such
    /// filter.
    pub fn set_filter(&mut self, field: &str, value: FilterValue) -> bool {
        let Some(idx) = self.filters.iter().position(|f| f.field == field) else {
            return false;
        };
        self.selected[idx] = match value {
            FilterValue::Any => None,
            FilterValue::Exact(v) => Some(v),
        };
        true
    }

    /// Set the sort directly. Returns `false` for a strategy key this entity
    /// does not define.
    pub fn set_sort(&mut self, key: &SortKey) -> bool {
        match key {
            SortKey::Unsorted => {
                self.sort = None;
                true
            }
            SortKey::Strategy(name) => match self.sorts.iter().position(|s| &s.key == name) {
                Some(idx) => {
                    self.sort = Some(idx);
                    true
                }
                None => false,
            },
        }
    }

    pub fn sort_key(&self) -> SortKey {
        match self.sort {
            Some(i) => SortKey::Strategy(self.sorts[i].key.clone()),
            None => SortKey::Unsorted,
        }
    }

    pub fn sort_label(&self) -> &str {
        self.sort.map_or(SORT_SENTINEL, |i| self.sorts[i].label.as_str())
    }

    /// Copy the panel's selections onto `query`.
    pub fn apply(&self, mut query: Query) -> Query {
        for (spec, selected) in self.filters.iter().zip(&self.selected) {
            if let Some(value) = selected {
                query = query.filter(spec.field.clone(), value.clone());
            }
        }
        query.sort = self.sort_key();
        query
    }
}

/// Move one step through `len` choices, wrapping at both ends.
fn step(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

/// `paymentStatus` -> `Payment Status`, `users[].name` -> `Users Name`.
fn field_title(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    let mut upper_next = true;
    for c in field.chars() {
        if !c.is_alphanumeric() {
            upper_next = true;
            continue;
        }
        if c.is_uppercase() && !out.is_empty() {
            out.push(' ');
        } else if upper_next && !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
        if upper_next {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        upper_next = false;
    }
    out
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct FilterPanel<'a> {
    state: &'a FilterPanelState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FilterPanel<'a> {
    pub fn new(state: &'a FilterPanelState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            theme,
        }
    }

    fn row<'b>(&self, title: String, value: &'b str, active: bool, width: usize) -> ListItem<'b> {
        let value_style = if active {
            self.theme.filter_active
        } else {
            self.theme.muted
        };
        ListItem::new(Line::from(vec![
            Span::raw(format!("{title:<width$} ")),
            Span::styled(value, value_style),
        ]))
    }
}

impl Widget for FilterPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let titles: Vec<String> = self.state.filters.iter().map(|f| field_title(&f.field)).collect();
        let width = titles
            .iter()
            .map(|t| t.chars().count())
            .chain(std::iter::once(4))
            .max()
            .unwrap_or(4);

        let mut items: Vec<ListItem> = self
            .state
            .filters
            .iter()
            .zip(&self.state.selected)
            .zip(titles)
            .map(|((spec, selected), title)| match selected {
                Some(v) => self.row(title, v.as_str(), true, width),
                None => self.row(title, spec.sentinel.as_str(), false, width),
            })
            .collect();

        if !self.state.sorts.is_empty() {
            items.push(self.row(
                "Sort".to_string(),
                self.state.sort_label(),
                self.state.sort.is_some(),
                width,
            ));
        }

        let highlight = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };

        let list = List::new(items)
            .block(Block::bordered().title("Filters").border_style(border_style))
            .highlight_style(highlight);

        let mut list_state = ListState::default();
        list_state.select(Some(self.state.cursor));
        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
