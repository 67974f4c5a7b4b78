/// Which view of the source the parser/emitter produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Emit only the declarations and blocks extracted from annotations,
    /// as a companion header.
    Header,
    /// Emit the source with annotation syntax replaced by whitespace,
    /// preserving the original line count.
    Strip,
}

/// Immutable configuration for a single parser/emitter run.
///
/// Replaces the process-wide mutable statics (`token`, `indent_tab_size`,
/// `strip_mode`, and the source file descriptor's resolved name) that the
/// reference implementation reads from global state; here they are an
/// explicit, owned value passed into [`crate::parse`].
#[derive(Clone, Debug)]
pub struct Config {
    /// The sentinel token that opens an annotation. Must not be empty.
    pub token: Vec<u8>,
    /// Spaces a tab counts for when trimming a block's common indentation.
    /// `0` disables trimming.
    pub tab_width: usize,
    /// Header-emit or strip mode.
    pub mode: Mode,
    /// Human-readable source identifier used in emitted `#line` directives
    /// and in diagnostics.
    pub source_name: String,
}

impl Config {
    /// Creates a configuration with the reference defaults: token `@`,
    /// tab width 4, header mode.
    pub fn new(source_name: impl Into<String>) -> Self {
        Config {
            token: b"@".to_vec(),
            tab_width: 4,
            mode: Mode::Header,
            source_name: source_name.into(),
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<Vec<u8>>) -> Self {
        self.token = token.into();
        self
    }

    #[must_use]
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub(crate) fn strip(&self) -> bool {
        self.mode == Mode::Strip
    }
}
