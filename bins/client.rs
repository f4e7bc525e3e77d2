use std::time::Duration;

use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info};

/// Sample memo client: runs one create/read/update/list/delete pass.
#[derive(Debug, Parser)]
#[command(name = "client", version)]
struct ClientArgs {
    /// Server address, host:port
    #[arg(long, default_value = "localhost:9090")]
    server: String,
    /// Per-call deadline
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    let args = ClientArgs::parse();

    let client = client::MemoClient::new(&args.server, Duration::from_secs(args.timeout_secs));
    info!(service = "client", server = %client.base_url(), "running memo demo");

    match client::run_demo(&client, chrono::Utc::now()).await {
        Ok(report) => {
            info!(service = "client", id = report.created_id, "demo finished");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "client", error = %e, "demo failed");
            std::process::ExitCode::FAILURE
        }
    }
}
