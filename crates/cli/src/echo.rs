use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "SEO Auditor".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Bulk SEO audits with AI commentary\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print a one-line summary of a batch run
pub fn print_summary(processed: usize, failed: usize, elapsed: std::time::Duration) {
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!(
        "  {} {}   {} {}   {} {:.2}s",
        "Audited:".dimmed(),
        processed.to_string().bright_white(),
        "Failed:".dimmed(),
        if failed == 0 { failed.to_string().green().to_string() } else { failed.to_string().red().to_string() },
        "Elapsed:".dimmed(),
        elapsed.as_secs_f64()
    );
    eprintln!("{}", "═".repeat(60).dimmed());
}
