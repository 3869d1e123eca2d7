use clap::ValueEnum;

/// Controls ANSI color output.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    /// Colors when stdout is a terminal and NO_COLOR is unset.
    Auto,
    Always,
    Never,
}
