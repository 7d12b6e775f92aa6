use std::io::{self, BufRead};
use std::process;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::fmt::Subscriber;

use cname_check::check::{parse_line, run_checks, CnameChecker};
use cname_check::common::dns::HickoryResolver;

#[derive(Parser)]
#[command(name = "cname-check")]
#[command(about = "Verify that hosts CNAME into a parent domain", long_about = None)]
struct Cli {
    /// Parent domain every CNAME target must sit directly under.
    #[arg(long, default_value = "nusii.com")]
    parent_domain: String,
}

fn init_tracing() {
    let log_level = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|l| Level::from_str(&l).ok())
        .unwrap_or(Level::WARN);
    let subscriber = Subscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("failed to set subscriber");
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // All of stdin is read and parsed before the first query goes out, so a
    // bad line aborts the run with nothing printed.
    let mut requests = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        match parse_line(&line) {
            Ok(request) => requests.push(request),
            Err(e) => {
                error!("{}", e);
                process::exit(1);
            }
        }
    }

    let resolver =
        HickoryResolver::new().map_err(|e| anyhow!("failed to build DNS resolver: {e}"))?;
    let checker = CnameChecker::new(resolver, &cli.parent_domain);

    let stdout = io::stdout();
    run_checks(&checker, &requests, stdout.lock()).await?;

    // Validation failures are reported, not signaled via the exit code.
    Ok(())
}
