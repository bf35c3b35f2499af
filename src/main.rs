use alertpilot::cli::commands::{Cli, Commands};
use alertpilot::cli::handlers::{
    handle_analyze_command, handle_info_command, handle_summary_command, handle_triage_command,
};
use alertpilot::cli::utils::init_logging;
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.log_format);

    // Execute command
    match cli.command {
        Commands::Analyze {
            alert,
            file,
            config,
            knowledge,
            report,
            output,
        } => handle_analyze_command(alert, file, config, knowledge, report, output).await,

        Commands::Summary {
            alert,
            file,
            config,
            knowledge,
            json,
        } => handle_summary_command(alert, file, config, knowledge, json).await,

        Commands::Triage { alert, file, template } => {
            handle_triage_command(alert, file, template).await
        }

        Commands::Info => handle_info_command(),
    }
}
