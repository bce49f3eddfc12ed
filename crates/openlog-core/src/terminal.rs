//! Coloured console output and terminal size detection.

use console::{style, Style, Term};

use crate::format::DEFAULT_WIDTH;
use crate::logging::entry::{Level, LogEntry, SHORT_TIMESTAMP_FORMAT, TIMESTAMP_FORMAT};

/// Columns of the attached terminal, or [`DEFAULT_WIDTH`] when stdout is not
/// a terminal.
pub fn terminal_width() -> usize {
    Term::stdout()
        .size_checked()
        .map(|(_rows, cols)| usize::from(cols))
        .filter(|cols| *cols > 0)
        .unwrap_or(DEFAULT_WIDTH)
}

fn level_style(level: Level) -> Style {
    let style = Style::new().bold();
    match level {
        Level::Info => style.blue(),
        Level::Error => style.red(),
        Level::Warn => style.yellow(),
        Level::Init => style.magenta(),
    }
}

/// Prints entries to stdout.
#[derive(Debug)]
pub struct ConsoleEcho {
    term: Term,
    short_timestamp: bool,
}

impl ConsoleEcho {
    pub fn stdout(short_timestamp: bool) -> Self {
        Self {
            term: Term::stdout(),
            short_timestamp,
        }
    }

    /// Styled console line for `entry`: `[ts]::[prefix]::LEVEL::text`.
    pub fn line(&self, entry: &LogEntry) -> String {
        let ts_format = if self.short_timestamp {
            SHORT_TIMESTAMP_FORMAT
        } else {
            TIMESTAMP_FORMAT
        };
        let sep = style("::").red().bold();

        let ts = format!("[{}]", entry.timestamp().format(ts_format));

        let mut line = format!("{}{}", style(ts).dim(), sep);
        if !entry.prefix().is_empty() {
            line.push_str(&format!(
                "{}{}",
                style(format!("[{}]", entry.prefix())).green().bold(),
                sep
            ));
        }
        line.push_str(&format!(
            "{}{}{}",
            level_style(entry.level()).apply_to(entry.level()),
            sep,
            entry.text()
        ));
        line
    }

    /// Console failures are ignored; the entry is already stored.
    pub fn echo(&self, entry: &LogEntry) {
        let _ = self.term.write_line(&self.line(entry));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn entry(prefix: &str) -> LogEntry {
        let ts = Local.with_ymd_and_hms(2026, 1, 21, 14, 30, 45).unwrap();
        LogEntry::at(ts, Level::Warn, "disk almost full", prefix)
    }

    #[test]
    fn test_line_layout() {
        let echo = ConsoleEcho::stdout(false);
        let plain = console::strip_ansi_codes(&echo.line(&entry(""))).to_string();
        assert_eq!(plain, "[2026-01-21 14:30:45]::WARN::disk almost full");
    }

    #[test]
    fn test_line_with_prefix_and_short_timestamp() {
        let echo = ConsoleEcho::stdout(true);
        let plain = console::strip_ansi_codes(&echo.line(&entry("APP"))).to_string();
        assert_eq!(plain, "[14:30]::[APP]::WARN::disk almost full");
    }

    #[test]
    fn test_terminal_width_has_fallback() {
        assert!(terminal_width() > 0);
    }
}
