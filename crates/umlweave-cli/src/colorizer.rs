//! Terminal colorization for evaluation output
//!
//! Applies ANSI escape codes to verdicts and diff lines using crossterm.

use crossterm::style::{Color, Stylize};

/// The PASS/FAIL tag of one evaluated model
pub fn verdict(passed: bool, colorize: bool) -> String {
    let tag = if passed { "PASS" } else { "FAIL" };
    if !colorize {
        return tag.to_string();
    }
    let color = if passed { Color::Green } else { Color::Red };
    format!("{}", tag.with(color).bold())
}

/// Colorize one line of a model comparison summary
///
/// Lines describing missing elements are red, unexpected ones yellow.
/// Anything else is returned unchanged.
pub fn colorize_diff_line(line: &str) -> String {
    if line.starts_with("missing") {
        format!("{}", line.with(Color::Red))
    } else if line.starts_with("unexpected") {
        format!("{}", line.with(Color::Yellow))
    } else {
        line.to_string()
    }
}

/// Whether stdout should carry colors when the choice is left to us
pub fn stdout_supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    crossterm::tty::IsTty::is_tty(&std::io::stdout())
}
