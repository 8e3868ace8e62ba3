// Output formatting — CLI verdict display and log-preview truncation.

use colored::Colorize;

/// Truncate a string to at most `max_chars` characters, appending "..." if
/// truncated. Respects UTF-8 character boundaries, so Indic text and emoji
/// never panic a byte slice.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Print a classification verdict for the `check` subcommand.
pub fn print_verdict(engine: &str, profane: bool, confidence: f64, category: &str) {
    let flag = if profane {
        "PROFANE".red().bold()
    } else {
        "CLEAN".green().bold()
    };
    println!("{flag}  [{engine}] {category} ({confidence:.2}%)");
}
