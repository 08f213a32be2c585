use std::io::IsTerminal;

use super::mode::OutputMode;

const DEFAULT_WIDTH: usize = 80;

/// What the terminal and environment allow, after global flags are applied.
#[derive(Debug, Clone)]
pub struct UiContext {
    pub is_tty: bool,
    pub color: bool,
    pub unicode: bool,
    pub width: usize,
    pub mode: OutputMode,
}

/// Facts read from the process environment.
#[derive(Debug, Clone, Copy)]
struct Terminal {
    stdout_tty: bool,
    dumb: bool,
    no_color: bool,
    columns: Option<usize>,
}

impl Terminal {
    fn detect() -> Self {
        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            dumb: std::env::var("TERM").is_ok_and(|term| term == "dumb"),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            columns: std::env::var("COLUMNS")
                .ok()
                .and_then(|cols| cols.trim().parse().ok())
                .filter(|&cols: &usize| cols > 0),
        }
    }
}

impl UiContext {
    /// Context for this process, given `--json`, `--no-color` and `--ascii`.
    pub fn from_env(json_flag: bool, no_color_flag: bool, ascii_flag: bool) -> Self {
        Self::resolve(Terminal::detect(), json_flag, no_color_flag, ascii_flag)
    }

    fn resolve(term: Terminal, json_flag: bool, no_color_flag: bool, ascii_flag: bool) -> Self {
        Self {
            is_tty: term.stdout_tty,
            color: term.stdout_tty && !term.dumb && !term.no_color && !no_color_flag,
            unicode: !ascii_flag,
            width: term.columns.unwrap_or(DEFAULT_WIDTH),
            mode: OutputMode::resolve(json_flag, term.stdout_tty, term.dumb),
        }
    }

    /// Spinners draw only on a terminal in pretty mode.
    pub fn allows_animation(&self) -> bool {
        self.is_tty && self.mode == OutputMode::Pretty
    }
}
