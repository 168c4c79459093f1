mod check;
mod fetch;
mod parser;
mod records;
mod server;
mod settings;
#[cfg(test)]
mod testutil;

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::fetch::Fetcher;
use crate::parser::extract::{
    acceptance, announcements, extract_all, hostel, postgraduate, requirements, undergraduate,
};
use crate::parser::text::format_amount;
use crate::parser::Page;
use crate::records::UndergraduateFees;
use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "uniben_scraper", version, about = "UNIBEN admissions page scraper and JSON API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API
    Serve {
        /// Listen port (default: $PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,
        /// Listen address (default: $UNIBEN_HOST or 0.0.0.0)
        #[arg(long)]
        host: Option<IpAddr>,
    },
    /// Run one extractor and print its JSON
    Extract {
        #[arg(value_enum)]
        what: Target,
        /// Read a saved copy of the page instead of fetching it
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Undergraduate fees overview table
    Fees {
        /// Read a saved copy of the page instead of fetching it
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Smoke-test a running API instance
    Check {
        #[arg(long, default_value = "http://localhost:3000")]
        base_url: String,
        /// Pause between routes, in milliseconds
        #[arg(long, default_value = "1000")]
        pause_ms: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    All,
    Undergraduate,
    Postgraduate,
    Hostel,
    Acceptance,
    Announcements,
    Requirements,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port, host } => {
            let settings = Settings::load()?;
            let host = match host {
                Some(h) => h,
                None => settings
                    .host
                    .parse()
                    .with_context(|| format!("invalid host {:?}", settings.host))?,
            };
            let addr = SocketAddr::new(host, port.unwrap_or(settings.port));
            let fetcher = Fetcher::from_settings(&settings)?;
            return server::serve(fetcher, addr).await;
        }
        Commands::Extract { what, file } => {
            let page = load_page(file).await?;
            match what {
                Target::All => print_json(&extract_all(&page)),
                Target::Undergraduate => print_json(&undergraduate::extract(&page)),
                Target::Postgraduate => print_json(&postgraduate::extract(&page)),
                Target::Hostel => print_json(&hostel::extract(&page)),
                Target::Acceptance => print_json(&acceptance::extract(&page)),
                Target::Announcements => print_json(&announcements::extract(&page)),
                Target::Requirements => print_json(&requirements::extract(&page)),
            }
        }
        Commands::Fees { file } => {
            let page = load_page(file).await?;
            print_fees(&undergraduate::extract(&page));
            Ok(())
        }
        Commands::Check { base_url, pause_ms } => {
            let report = check::run(&base_url, Duration::from_millis(pause_ms)).await?;
            report.print();
            if report.failed > 0 {
                bail!("{} of {} routes failed", report.failed, report.passed + report.failed);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

async fn load_page(file: Option<PathBuf>) -> anyhow::Result<Page> {
    match file {
        Some(path) => {
            let html = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(Page::parse(&html))
        }
        None => {
            let settings = Settings::load()?;
            Ok(Fetcher::from_settings(&settings)?.load_page().await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_fees(fees: &UndergraduateFees) {
    let fresh = &fees.fresh_students;
    if fresh.science.is_empty() && fees.additional_charges.is_empty() {
        println!("No undergraduate fees found.");
        return;
    }

    println!("{:<32} | {:>14} | {:>14}", "Item", "Science", "Non-Science");
    println!("{}", "-".repeat(66));

    for (label, science) in fresh.science.iter() {
        let non_science = fresh
            .non_science
            .get(label)
            .map(|v| format_amount(*v))
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<32} | {:>14} | {:>14}",
            truncate(label, 32),
            format_amount(*science),
            non_science
        );
    }

    if !fees.additional_charges.is_empty() {
        println!("\n--- Additional charges ---");
        for (label, pair) in fees.additional_charges.iter() {
            println!(
                "{:<32} | {:>14} | {:>14}",
                truncate(label, 32),
                format_amount(pair.science),
                format_amount(pair.non_science)
            );
        }
    }

    if !fees.note.is_empty() {
        println!("\nNote: {}", fees.note);
    }

    println!(
        "\n{} items | {} additional charges",
        fresh.science.len(),
        fees.additional_charges.len()
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{}...", kept)
    }
}
