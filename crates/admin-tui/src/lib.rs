//! legacy-admin console — ratatui application shell over the query engine.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, RecordFeed};

use admin_core::{config::Config, EntityKind, Record};

/// Start the console over the given collections.
///
/// `feed`, when present, delivers fresh snapshots that replace a tab's
/// records while the console is running.
pub fn run(
    collections: Vec<(EntityKind, Vec<Record>)>,
    config: Config,
    feed: Option<RecordFeed>,
) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.ui.theme, "unknown theme in config, using default");
        theme::Theme::load_default()
    });

    let app = App::new(collections, config, theme);
    match feed {
        Some(feed) => app.with_feed(feed).run(),
        None => app.run(),
    }
}
