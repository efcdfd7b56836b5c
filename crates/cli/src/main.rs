use std::process::ExitCode;

use clap::Parser;
use shopsync_cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    shopsync_observability::init(cli.log_format);

    match shopsync_cli::run(&cli).await {
        Ok(summary) => {
            tracing::info!(
                mode = %summary.mode,
                records = summary.records,
                bytes = summary.bytes,
                report = ?summary.report,
                "export complete"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(stage = err.stage(), error = %err, "export failed");
            ExitCode::from(err.exit_code())
        }
    }
}
