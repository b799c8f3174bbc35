//! Text User Interface (TUI) utilities.
//!
//! Banner and section boxes printed around the timer reports by the CLI.
//! The reports themselves are fixed-width and never depend on the terminal.

use terminal_size::{terminal_size, Width};

/// Get the current terminal width, constrained to a reasonable range
pub fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Double-line banner with the title centered, `width` columns inside the border.
pub fn banner(title: &str, width: usize) -> String {
    let title = truncate(&format!(" {} ", title), width);
    let len = title.chars().count();
    let padding = width.saturating_sub(len) / 2;
    let right_padding = width.saturating_sub(padding + len);
    let border = "═".repeat(width);

    format!(
        "╔{border}╗\n║{}{}{}║\n╚{border}╝\n",
        " ".repeat(padding),
        title,
        " ".repeat(right_padding)
    )
}

/// Single-line section box sized to its content.
pub fn section_box(title: &str, max_width: usize) -> String {
    let content_width = title.chars().count().min(max_width.saturating_sub(4).max(10));
    let border = "─".repeat(content_width + 2);

    format!(
        "┌{border}┐\n│ {:<width$} │\n└{border}┘\n",
        truncate(title, content_width),
        width = content_width
    )
}

/// Print the program banner
pub fn print_header() {
    let term_width = get_term_width().min(80); // Cap header at 80
    println!("{}", banner("Solver Timers", term_width.saturating_sub(2)));
}

/// Print a section title ahead of a report
pub fn print_section(title: &str) {
    print!("{}", section_box(title, get_term_width()));
}
