use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "alertpilot",
    about = "Rule-based alert triage and analysis tool",
    version,
    author
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for logs
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze an alert and print the full triage report
    Analyze {
        /// Alert text. If not provided, --file is required
        #[arg(value_name = "ALERT")]
        alert: Option<String>,

        /// Read the alert text from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Analyzer configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Knowledge-base file with historical incidents (JSON)
        #[arg(short, long)]
        knowledge: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value = "terminal")]
        report: ReportFormat,

        /// Write the tagged report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a structured summary of an alert analysis
    Summary {
        /// Alert text. If not provided, --file is required
        #[arg(value_name = "ALERT")]
        alert: Option<String>,

        /// Read the alert text from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Analyzer configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Knowledge-base file with historical incidents (JSON)
        #[arg(short, long)]
        knowledge: Option<PathBuf>,

        /// Emit the summary as JSON instead of the terminal view
        #[arg(long)]
        json: bool,
    },

    /// LLM-assisted triage: classify the alert, then run the specialized
    /// analysis prompt (requires OPENAI_API_KEY)
    Triage {
        /// Alert text. If not provided, --file is required
        #[arg(value_name = "ALERT")]
        alert: Option<String>,

        /// Read the alert text from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Custom prompt template file containing {{ALERT_DETAILS}}
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// Show version and build information
    Info,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ReportFormat {
    /// Framed, colorized console output
    Terminal,
    /// Raw tagged report, suitable for piping
    Tagged,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogFormat {
    Text,
    Json,
}
