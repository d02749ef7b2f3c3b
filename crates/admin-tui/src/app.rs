//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Record snapshots arriving
//! on the optional [`RecordFeed`] replace a tab's collection between frames.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        filter_panel::{FilterPanel, FilterPanelState},
        help::HelpPopup,
        record_table::{RecordTable, RecordTableState},
        search_bar::{SearchBar, SearchBarState},
        tab_bar::TabBar,
    },
};
use admin_core::{
    config::Config, count_where, EntityDescriptor, EntityKind, FilterOptions, MemoizedView, Query,
    QueryEngine, Record,
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::mpsc::{self, error::TryRecvError};

/// Fresh snapshots of whole collections, e.g. from a store watcher.
pub type RecordFeed = mpsc::UnboundedReceiver<(EntityKind, Vec<Record>)>;

// ---------------------------------------------------------------------------
// Focus + tab types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Filters,
    Table,
    Search,
    /// Vim-style `:` command line is active.
    Command,
}

/// One management screen.
pub struct TabState {
    pub kind: EntityKind,
    pub records: Arc<[Record]>,
    pub view: MemoizedView,
    pub search: SearchBarState,
    pub filters: FilterPanelState,
    pub table: RecordTableState,
}

impl TabState {
    pub fn new(kind: EntityKind, records: Vec<Record>) -> Self {
        let engine = QueryEngine::for_kind(kind);
        let filters = FilterPanelState::new(engine.descriptor());
        Self {
            kind,
            records: records.into(),
            view: MemoizedView::new(engine),
            search: SearchBarState::default(),
            filters,
            table: RecordTableState::default(),
        }
    }

    pub fn descriptor(&self) -> &EntityDescriptor {
        self.view.engine().descriptor()
    }

    /// The query described by the search bar and filter panel.
    pub fn query(&self) -> Query {
        self.filters.apply(Query::new().search(self.search.query.clone()))
    }

    /// The current view, recomputed only when records or query changed.
    pub fn visible(&mut self) -> Arc<[Record]> {
        let query = self.query();
        let view = self.view.view(&self.records, &query);
        self.table.clamp(view.len());
        view
    }

    pub fn replace_records(&mut self, records: Vec<Record>) {
        tracing::debug!(kind = %self.kind, count = records.len(), "tab: records replaced");
        self.records = records.into();
    }

    /// "Clear Filters": search, every filter and the sort back to defaults.
    pub fn clear(&mut self) {
        self.search.clear();
        self.filters.clear();
        self.table.reset();
    }

    /// Record count per status option, for the table title.
    pub fn status_counts(&self) -> Vec<(String, usize)> {
        let Some(spec) = self.descriptor().filter_spec("status") else {
            return Vec::new();
        };
        match &spec.options {
            FilterOptions::Fixed(options) => options
                .iter()
                .map(|o| (o.clone(), count_where(&self.records, &spec.field, o)))
                .collect(),
            FilterOptions::Distinct => Vec::new(),
        }
    }
}

fn placeholder_for(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Users => "search by name, email, phone, project or property",
        EntityKind::Brokers => "search by name, email or phone",
        EntityKind::Suppliers => "search by company, contact, email, phone, GST or location",
        EntityKind::Properties => "search by flat, project, owner or location",
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub tabs: Vec<TabState>,
    pub active_tab: usize,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

impl AppState {
    /// One tab per entity, in [`EntityKind::ALL`] order. Entities missing
    /// from `collections` start empty.
    pub fn new(collections: Vec<(EntityKind, Vec<Record>)>, config: Config, theme: Theme) -> Self {
        let mut tabs: Vec<TabState> = EntityKind::ALL
            .iter()
            .map(|&kind| TabState::new(kind, Vec::new()))
            .collect();
        for (kind, records) in collections {
            tabs[tab_index(kind)].replace_records(records);
        }

        Self {
            tabs,
            active_tab: 0,
            focus: Focus::Table,
            prev_focus: Focus::Table,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
        }
    }

    pub fn active(&self) -> &TabState {
        &self.tabs[self.active_tab]
    }

    pub fn active_mut(&mut self) -> &mut TabState {
        &mut self.tabs[self.active_tab]
    }

    pub fn select_kind(&mut self, kind: EntityKind) {
        self.active_tab = tab_index(kind);
        tracing::debug!(%kind, "tab selected");
    }

    /// Swap in a new snapshot of one collection.
    pub fn apply_update(&mut self, kind: EntityKind, records: Vec<Record>) {
        self.tabs[tab_index(kind)].replace_records(records);
    }

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        if self.focus == Focus::Command {
            self.handle_command_bar(event);
            return;
        }

        match event {
            AppEvent::Char('?') if self.focus != Focus::Search => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            AppEvent::Char(':') if self.focus != Focus::Search => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            AppEvent::Escape => {
                if self.focus == Focus::Search {
                    self.focus = Focus::Table;
                }
            }

            // Filters → Table → Search → Filters
            AppEvent::FocusNext => {
                let next = match self.focus {
                    Focus::Filters => Focus::Table,
                    Focus::Table => Focus::Search,
                    Focus::Search | Focus::Command => Focus::Filters,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
            }

            AppEvent::SearchFocus => self.focus = Focus::Search,

            AppEvent::NextTab => {
                self.active_tab = (self.active_tab + 1) % self.tabs.len();
            }
            AppEvent::PrevTab => {
                self.active_tab = (self.active_tab + self.tabs.len() - 1) % self.tabs.len();
            }

            AppEvent::ClearFilters => {
                tracing::debug!(kind = %self.active().kind, "filters cleared");
                self.active_mut().clear();
            }

            AppEvent::Resize(_, _) => {}

            other => self.dispatch_to_focused(other),
        }
    }

    fn handle_command_bar(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Enter => {
                let outcome = Command::parse(&self.command_bar.input).and_then(|cmd| {
                    tracing::debug!(command = ?cmd, "executing command");
                    execute_command(self, cmd)
                });
                match outcome {
                    Err(msg) if !msg.is_empty() => {
                        tracing::debug!(error = %msg, "command failed");
                        self.command_bar.error = Some(msg);
                    }
                    _ => {
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                    }
                }
            }
            other => self.command_bar.handle(&other),
        }
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent) {
        let focus = self.focus;
        let tab = self.active_mut();
        match focus {
            Focus::Filters => {
                let records = Arc::clone(&tab.records);
                tab.filters.handle(&event, &records);
                tab.table.reset();
            }
            Focus::Table => {
                let total = tab.visible().len();
                tab.table.handle(&event, total);
            }
            Focus::Search => {
                tab.search.handle(&event);
                tab.table.reset();
            }
            Focus::Command => {}
        }
    }
}

fn tab_index(kind: EntityKind) -> usize {
    EntityKind::ALL
        .iter()
        .position(|&k| k == kind)
        .unwrap_or_default()
}

/// Returns true when the current focus is on a text-input widget, meaning
/// shortcut letters should produce characters instead.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Search | Focus::Command)
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    feed: Option<RecordFeed>,
}

impl App {
    pub fn new(collections: Vec<(EntityKind, Vec<Record>)>, config: Config, theme: Theme) -> Self {
        Self {
            state: AppState::new(collections, config, theme),
            feed: None,
        }
    }

    pub fn with_feed(mut self, feed: RecordFeed) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.drain_feed();

            let visible = self.state.active_mut().visible();
            let stats = if self.state.config.ui.show_stats {
                self.state.active().status_counts()
            } else {
                Vec::new()
            };
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s, &visible, &stats))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn drain_feed(&mut self) {
        let Some(feed) = self.feed.as_mut() else {
            return;
        };
        loop {
            match feed.try_recv() {
                Ok((kind, records)) => self.state.apply_update(kind, records),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::debug!("record feed closed");
                    self.feed = None;
                    break;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState, visible: &[Record], stats: &[(String, usize)]) {
    let area = frame.area();

    // Vertical: 1-line tab bar | body | 3-line search bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    let pct = state.config.ui.filter_pane_width_pct;
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Percentage(pct), Constraint::Fill(1)])
        .split(vert[1]);

    let tab = state.active();

    frame.render_widget(TabBar::new(&state.tabs, state.active_tab, &state.theme), vert[0]);
    frame.render_widget(
        FilterPanel::new(&tab.filters, state.focus == Focus::Filters, &state.theme),
        horiz[0],
    );
    frame.render_widget(
        RecordTable::new(
            tab.kind,
            visible,
            tab.records.len(),
            &tab.table,
            state.focus == Focus::Table,
            &state.theme,
        )
        .stats(stats),
        horiz[1],
    );
    let search = SearchBar::new(&tab.search, state.focus == Focus::Search, &state.theme)
        .placeholder(placeholder_for(tab.kind))
        .sort_label(tab.filters.sort_label());
    let search_cursor = search.cursor_position(vert[2]);
    frame.render_widget(search, vert[2]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        frame.set_cursor_position((state.command_bar.cursor_col(cmd_area), cmd_area.y));
        return;
    }

    if state.focus == Focus::Search {
        frame.set_cursor_position(search_cursor);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
