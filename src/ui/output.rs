//! Output verbosity.

/// How much status output the UI prints.
///
/// Errors and `print` values are shown in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Messages, spinners and final status.
    #[default]
    Normal,
    /// Only errors and values (`--quiet`).
    Quiet,
}

impl OutputMode {
    /// Whether spinners and status lines are printed.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
