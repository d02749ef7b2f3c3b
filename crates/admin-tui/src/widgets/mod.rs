//! Ratatui widgets for the legacy-admin console.

pub mod command_bar;
pub mod filter_panel;
pub mod help;
pub mod record_table;
pub mod search_bar;
pub mod tab_bar;
