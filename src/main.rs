use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use reqwest::Url;

use ssl_checker::client::DEFAULT_API_URL;
use ssl_checker::logging;
use ssl_checker::poller::{Outcome, PollConfig, Poller};

/// ssl-checker — run an SSL Labs assessment for a domain and print the result.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ssl-checker",
    version,
    about = "Run an SSL Labs assessment for a domain, wait for it to finish, and print a summary.",
    long_about = None
)]
struct Cli {
    /// Domain to assess (e.g., example.com).
    domain: String,

    /// Analyze endpoint to call.
    #[arg(long = "api-url", default_value = DEFAULT_API_URL)]
    api_url: Url,

    /// Seconds to wait before each status poll.
    #[arg(long = "interval-secs", default_value_t = 10)]
    interval_secs: u64,

    /// Diagnostic log level on stderr (overridden by RUST_LOG).
    #[arg(long = "log-level", default_value = logging::DEFAULT_LEVEL)]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = writeln!(io::stdout(), "{}", e.render());
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(&cli.log_level);

    match run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = writeln!(io::stdout(), "Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Outcome> {
    let poller = Poller::new(PollConfig {
        api_url: cli.api_url,
        interval: Duration::from_secs(cli.interval_secs),
    });
    let mut stdout = io::stdout().lock();
    Ok(poller.run(&cli.domain, &mut stdout).await?)
}
