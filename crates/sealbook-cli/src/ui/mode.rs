/// How a command prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// `--json`: one JSON document on stdout.
    Json,
    /// `key=value` and tab-separated lines for pipes and `TERM=dumb`.
    #[default]
    Plain,
    /// Badges, colors and tables on a terminal.
    Pretty,
}

impl OutputMode {
    /// `--json` beats everything; otherwise pretty only on a capable terminal.
    pub fn resolve(json_flag: bool, is_tty: bool, term_is_dumb: bool) -> Self {
        match (json_flag, is_tty && !term_is_dumb) {
            (true, _) => Self::Json,
            (false, true) => Self::Pretty,
            (false, false) => Self::Plain,
        }
    }

    pub fn is_json(&self) -> bool {
        *self == Self::Json
    }

    pub fn is_pretty(&self) -> bool {
        *self == Self::Pretty
    }
}
