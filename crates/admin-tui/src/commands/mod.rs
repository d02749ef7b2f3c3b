// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{app::AppState, theme::Theme};
use admin_core::EntityKind;

/// A parsed command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the console
    Quit,
    // Toggle the help popup
    Help,
    // Change theme
    Theme(String),
    // Sort the active screen by strategy key or label, `none` to unsort
    Sort(String),
    // Set one filter on the active screen; `any` clears it
    Filter { field: String, value: String },
    // Reset search, filters and sort on the active screen
    Clear,
    // Switch to a screen
    Tab(EntityKind),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Err(message)` on failure. An empty string returns `Err("")`
    /// as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "theme" if rest.is_empty() => Err("usage: theme <default|gruvbox>".to_string()),
            "theme" => Ok(Command::Theme(rest.to_string())),
            "sort" if rest.is_empty() => Err("usage: sort <key|none>".to_string()),
            "sort" => Ok(Command::Sort(rest.to_string())),
            "filter" => {
                // `filter status Active`, `filter paymentStatus Up to Date`
                // and `filter status=Active` are all accepted
                let split = rest
                    .split_once('=')
                    .or_else(|| rest.split_once(char::is_whitespace));
                match split.map(|(f, v)| (f.trim(), v.trim())) {
                    Some((field, value)) if !field.is_empty() && !value.is_empty() => {
                        Ok(Command::Filter {
                            field: field.to_string(),
                            value: value.to_string(),
                        })
                    }
                    _ => Err("usage: filter <field> <value|any>".to_string()),
                }
            }
            "tab" => rest
                .parse::<EntityKind>()
                .map(Command::Tab)
                .map_err(|e| e.to_string()),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
///
/// Returns an error message for commands that are well-formed but do not
/// apply to the active screen (unknown filter field, unknown sort, …).
pub fn execute_command(s: &mut AppState, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name)
                .ok_or_else(|| format!("unknown theme: {name} (default, gruvbox)"))?;
        }
        Command::Sort(name) => {
            let tab = s.active_mut();
            let key = tab.descriptor().parse_sort(&name).map_err(|e| e.to_string())?;
            tab.filters.set_sort(&key);
            tab.table.reset();
        }
        Command::Filter { field, value } => {
            let tab = s.active_mut();
            let (field, value) = tab
                .descriptor()
                .parse_filter(&format!("{field}={value}"))
                .map_err(|e| e.to_string())?;
            tab.filters.set_filter(&field, value);
            tab.table.reset();
        }
        Command::Clear => s.active_mut().clear(),
        Command::Tab(kind) => s.select_kind(kind),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit() {
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("  quit  "), Ok(Command::Quit));
        assert_eq!(Command::parse("q!"), Ok(Command::Quit));
    }

    #[test]
    fn parse_theme() {
        assert_eq!(
            Command::parse("theme gruvbox"),
            Ok(Command::Theme("gruvbox".to_string()))
        );
        assert!(Command::parse("theme").is_err());
    }

    #[test]
    fn parse_filter_forms() {
        let expected = Command::Filter {
            field: "paymentStatus".to_string(),
            value: "Up to Date".to_string(),
        };
        assert_eq!(Command::parse("filter paymentStatus Up to Date"), Ok(expected.clone()));
        assert_eq!(Command::parse("filter paymentStatus=Up to Date"), Ok(expected));
        assert!(Command::parse("filter status").is_err());
    }

    #[test]
    fn parse_tab() {
        assert_eq!(Command::parse("tab brokers"), Ok(Command::Tab(EntityKind::Brokers)));
        assert!(Command::parse("tab vendors").unwrap_err().contains("vendors"));
    }

    #[test]
    fn parse_empty_returns_sentinel_err() {
        assert_eq!(Command::parse(""), Err(String::new()));
        assert_eq!(Command::parse("   "), Err(String::new()));
    }

    #[test]
    fn parse_unknown() {
        let err = Command::parse("frobnicate").unwrap_err();
        assert!(err.contains("frobnicate"));
    }
}
