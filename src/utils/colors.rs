/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Efficiency colour: ≥ 85 % green, ≥ 60 % yellow, below red.
pub fn color_for_efficiency(pct: i64) -> &'static str {
    if pct >= 85 {
        GREEN
    } else if pct >= 60 {
        YELLOW
    } else {
        RED
    }
}

/// Wrap `value` in `color` … `RESET`.
pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}
