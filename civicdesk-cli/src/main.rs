mod frontend;

use civicdesk_runtime::runtime_session::{build_session_from_config, load_config};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::frontend::{Flow, Frontend, HELP, explain, parse_command};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // `init` also routes `log` records from the library crates.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cfg = load_config()?;
    let (session, remote) = build_session_from_config(&cfg)?;

    match remote.health().await {
        Ok(status) => log::info!("intake service health: {status}"),
        Err(e) => log::warn!("intake service health check failed: {e:#}"),
    }

    println!("Smart City Complaint Assistant ({})", remote.base_url());
    println!("{HELP}\n");

    let mut frontend = Frontend::new(session);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    frontend.render().await;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if let Flow::Quit = frontend.handle(parse_command(&line)).await {
                    break;
                }
            }
            outcome = frontend.next_outcome() => {
                if let Some(outcome) = outcome {
                    explain(outcome);
                }
            }
        }
        frontend.render().await;
    }

    Ok(())
}
