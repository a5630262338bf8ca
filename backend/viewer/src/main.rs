use std::{
    io::{self, BufRead, Write},
    time::Duration,
};

use clap::Parser;
use dashboard::{Dashboard, GatewayClient, render::render};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;

use commands::{Command, HELP, Outcome, apply};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the record gateway
    #[arg(long, env = "ADS_GATEWAY_URL", default_value = "http://localhost:1111")]
    gateway: String,

    /// Print the first page and exit
    #[arg(long)]
    no_interactive: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let gateway = GatewayClient::new(&args.gateway);
    let mut dashboard = Dashboard::new();

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Fetching {}", gateway.endpoint()));
    pb.enable_steady_tick(Duration::from_millis(100));

    dashboard.load(&gateway).await;

    pb.finish_and_clear();

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", render(&dashboard))?;

    if args.no_interactive {
        return Ok(());
    }

    info!(gateway = %args.gateway, "Interactive session started");

    writeln!(stdout, "\n{HELP}")?;
    prompt(&mut stdout)?;

    for line in io::stdin().lock().lines() {
        let line = line?;

        match Command::parse(&line).map(|command| apply(&mut dashboard, command)) {
            Some(Outcome::Redraw) => write!(stdout, "{}", render(&dashboard))?,
            Some(Outcome::Message(message)) => writeln!(stdout, "{message}")?,
            Some(Outcome::Exit) => break,
            None if line.trim().is_empty() => {}
            None => writeln!(stdout, "Unknown command, try help")?,
        }

        prompt(&mut stdout)?;
    }

    info!("Interactive session ended");

    Ok(())
}

fn prompt(stdout: &mut impl Write) -> io::Result<()> {
    write!(stdout, "> ")?;
    stdout.flush()
}
