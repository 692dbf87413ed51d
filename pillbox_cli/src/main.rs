use clap::{Parser, Subcommand};
use pillbox_core::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pillbox")]
#[command(about = "Daily medication inventory ledger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the medication history file
    #[arg(long, global = true)]
    history: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show remaining pills for every day of the history (default)
    Show {
        /// Print the ledger as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Export the ledger to a CSV file
    Export {
        /// Destination CSV path
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    // Initialize logging
    pillbox_core::logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let history_path = cli
        .history
        .unwrap_or_else(|| config.data.history_path.clone());

    let history = History::load(&history_path)?;
    let ledger = history.ledger()?;

    match cli.command {
        Some(Commands::Show { json }) => cmd_show(&ledger, json, &config),
        Some(Commands::Export { path }) => cmd_export(&ledger, &path),
        None => cmd_show(&ledger, false, &config),
    }
}

fn cmd_show(ledger: &Ledger, json: bool, config: &Config) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(ledger)?);
        return Ok(());
    }

    display_ledger(ledger, config);
    Ok(())
}

fn cmd_export(ledger: &Ledger, path: &Path) -> Result<()> {
    let count = ledger.write_csv(path)?;

    println!("✓ Exported {} days to CSV", count);
    println!("  CSV: {}", path.display());
    Ok(())
}

fn display_ledger(ledger: &Ledger, config: &Config) {
    let (Some(first), Some(last)) = (ledger.days().first(), ledger.last()) else {
        println!("Ledger is empty.");
        return;
    };

    let peak = ledger.iter().map(|d| d.amount).max().unwrap_or(0).max(1);
    let width = config.display.bar_width;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  PILLS REMAINING  {} → {}", first.date, last.date);
    println!("╰─────────────────────────────────────────╯");
    println!();

    for day in ledger {
        let bar_len = if day.amount > 0 {
            ((day.amount as f64 / peak as f64) * width as f64).ceil() as usize
        } else {
            0
        };
        let flag = if day.amount < 0 {
            "  out of stock"
        } else if day.amount <= config.display.low_stock_pills {
            "  low"
        } else {
            ""
        };

        println!(
            "  {:>4}  {}  {:>6}  {}{}",
            day.index,
            day.date,
            day.amount,
            "█".repeat(bar_len),
            flag
        );
    }

    println!();
    println!("  Remaining: {} pills", last.amount);
    if let Some(short) = ledger.first_shortfall() {
        println!("  ⚠ Out of stock from {} (day {})", short.date, short.index);
    }
    println!();
}
