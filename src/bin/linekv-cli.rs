//! LineKV interactive client.
//!
//! Reads commands from stdin, sends each one to the server and prints the
//! reply. Type `EXIT` (any case) or press Ctrl+D to leave.

use anyhow::Context;
use clap::Parser;
use linekv::client::{is_exit_command, Client};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "linekv-cli", author, version, about = "Interactive client for LineKV")]
struct Args {
    /// Server host to connect to
    #[arg(long, default_value = linekv::DEFAULT_HOST)]
    host: String,

    /// Server port to connect to
    #[arg(short, long, default_value_t = linekv::DEFAULT_PORT)]
    port: u16,
}

fn prompt() -> std::io::Result<()> {
    print!("linekv> ");
    std::io::stdout().flush()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let addr = format!("{}:{}", args.host, args.port);

    let mut client = Client::connect(&addr)
        .await
        .with_context(|| format!("failed to connect to {}", addr))?;

    println!(
        "Connected to LineKV at {}. Type commands (e.g. SET key value). Type 'EXIT' to quit.",
        addr
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt()?;

        let Some(input) = lines.next_line().await? else {
            break; // EOF
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if is_exit_command(input) {
            break;
        }

        match client.send(input).await {
            Ok(reply) => println!("{}", reply),
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    println!("Exiting...");
    Ok(())
}
