use crate::analysis::AnalysisSummary;
use colored::Colorize;

/// Terminal formatting constants
const TERMINAL_WIDTH: usize = 80;
const SEPARATOR_WIDTH: usize = 40;

/// Console renderer for analysis reports and summaries
pub struct TerminalReporter {
    use_colors: bool,
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Print the tagged analysis report with a framed header.
    pub fn print_report(&self, alert_text: &str, report: &str) {
        if !self.use_colors {
            colored::control::set_override(false);
        }

        self.print_header("ALERTPILOT ANALYSIS REPORT");

        println!("\n{}", "📨 Alert".bright_white().bold());
        println!("{}", "─".repeat(SEPARATOR_WIDTH).bright_black());
        for line in alert_text.lines().filter(|l| !l.trim().is_empty()) {
            println!("  {}", line.trim());
        }

        println!("\n{}", "🔍 Analysis".bright_white().bold());
        println!("{}", "─".repeat(SEPARATOR_WIDTH).bright_black());
        println!("{}", report);

        self.print_footer();
    }

    /// Print the structured summary.
    pub fn print_summary(&self, summary: &AnalysisSummary) {
        if !self.use_colors {
            colored::control::set_override(false);
        }

        self.print_header("ALERTPILOT SUMMARY");

        println!("\n  Analysis ID:      {}", summary.analysis_id.bright_cyan());
        println!("  Severity:         {}", severity_display(&summary.severity));
        println!(
            "  Affected systems: {}",
            if summary.affected_systems.is_empty() {
                "-".to_string()
            } else {
                summary.affected_systems.join(", ")
            }
        );
        println!("  Causes found:     {}", summary.cause_count);
        println!(
            "  Historical match: {}",
            if summary.has_historical_match {
                "yes".bright_yellow()
            } else {
                "no".bright_green()
            }
        );
        println!(
            "  Error codes:      {}",
            if summary.error_codes.is_empty() {
                "-".to_string()
            } else {
                summary.error_codes.join(", ")
            }
        );
        println!("  Timestamp:        {}", summary.timestamp);

        self.print_footer();
    }

    fn print_header(&self, title: &str) {
        println!("\n{}", "═".repeat(TERMINAL_WIDTH).bright_blue());
        println!("{}", title.bright_white().bold());
        println!("{}", "═".repeat(TERMINAL_WIDTH).bright_blue());
    }

    fn print_footer(&self) {
        println!("\n{}", "═".repeat(TERMINAL_WIDTH).bright_blue());
    }
}

fn severity_display(severity: &str) -> colored::ColoredString {
    match severity {
        "严重" => severity.bright_red().bold(),
        "高" => severity.bright_red(),
        "中" => severity.bright_yellow(),
        "低" => severity.bright_green(),
        _ => severity.normal(),
    }
}
