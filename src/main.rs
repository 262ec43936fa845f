mod client;
mod collectors;
mod config;
mod report;
mod snapshot;

use clap::Parser;
use client::OpenClawClient;
use collectors::run_health_check;
use config::Config;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "clawcheck")]
#[command(version)]
#[command(about = "Health check and reporting for the OpenClaw platform")]
struct Cli {
    /// Run the full health check
    #[arg(long)]
    health: bool,
    /// Check OpenClaw status only
    #[arg(long)]
    status: bool,
    /// Check Git servers only
    #[arg(long)]
    git: bool,
    /// Render the health check as a plain-text report
    #[arg(long)]
    report: bool,
    /// Render the health check as an HTML dashboard
    #[arg(long)]
    html: bool,
    /// Force JSON output (the default)
    #[arg(long)]
    json: bool,
    /// Optional YAML config; built-in defaults apply without it
    #[arg(long)]
    config: Option<String>,
    #[arg(long)]
    print_default_config: bool,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    if cli.print_default_config {
        println!("{}", Config::example_yaml());
        return;
    }

    let cfg = match &cli.config {
        Some(path) => match Config::load_from_file(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                error!(error = %err, "failed to load configuration");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let client = OpenClawClient::new(&cfg.openclaw_path);

    if cli.health {
        let snapshot = run_health_check(&client, &cfg).await;
        let output = if cli.html {
            report::render_html(&snapshot)
        } else if cli.report {
            report::render_text(&snapshot)
        } else {
            report::render_json(&snapshot)
        };
        println!("{output}");
    } else if cli.status {
        let status = client.status().await;
        println!("{}", report::to_pretty_json(&status));
    } else if cli.git {
        let servers = collectors::git::collect_git_servers(&cfg.git_checks).await;
        println!("{}", report::to_pretty_json(&servers));
    } else {
        print_usage();
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    println!("clawcheck - health check and reporting for the OpenClaw platform");
    println!();
    println!("Available commands:");
    println!("  clawcheck --health            # Run full health check");
    println!("  clawcheck --status            # Check OpenClaw status");
    println!("  clawcheck --git               # Check Git servers");
    println!("  clawcheck --health --report   # Generate text report");
    println!("  clawcheck --health --html     # Generate HTML dashboard");
    println!("  clawcheck --health --json     # Force JSON output");
}
