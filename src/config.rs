/// Marker line that ends interactive content entry.
pub const DEFAULT_SENTINEL: &str = "/end/";

/// Session settings for [`Shell`](crate::Shell).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Print `<cwd>$ ` before reading each command.
    pub show_prompt: bool,
    /// Line that terminates `nwfiletxt`/`appendtxt` input.
    pub sentinel: String,
    /// Print the "enter the lines" hint before content entry.
    pub entry_hint: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            show_prompt: true,
            sentinel: DEFAULT_SENTINEL.to_string(),
            entry_hint: true,
        }
    }
}

impl ShellConfig {
    /// Settings for piped input: no prompt, no hint.
    pub fn quiet() -> Self {
        Self {
            show_prompt: false,
            entry_hint: false,
            ..Self::default()
        }
    }

    pub fn with_sentinel<S: Into<String>>(mut self, sentinel: S) -> Self {
        self.sentinel = sentinel.into();
        self
    }
}
