mod dashboard;
mod report;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{Local, Utc};
use clap::Parser;
use spendboard_core::{
    generate_daily_spending_monthly, generate_daily_spending_yearly, generate_monthly_spending,
    parse_month, parse_year, resolve_data_dir, CardService, FileCardRepository, Settings,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spendboard")]
#[command(about = "Deterministic demo spending data for payment cards", long_about = None)]
struct Cli {
    /// Directory holding config.json and the card store
    #[arg(long, global = true, env = "SPENDBOARD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Daily spending for one month
    Monthly {
        card: String,
        /// YYYY-MM, "this" or "last"
        #[arg(short, long, default_value = "this")]
        month: String,
    },
    /// Month-by-month spending for one year
    Yearly {
        card: String,
        /// YYYY or "this"
        #[arg(short, long, default_value = "this")]
        year: String,
    },
    /// Monthly total and category split for a card
    Summary { card: String },
    /// Regenerate the card store for the given cards (defaults from config)
    Sync { cards: Vec<String> },
    /// Regenerate one stored card now, regardless of its age
    Refresh {
        /// Card number or card id
        card: String,
    },
    /// List stored cards
    List,
    /// Open the terminal dashboard
    Dashboard {
        /// Card number; defaults to the first active stored card
        card: Option<String>,
        #[arg(short, long, default_value = "this")]
        month: String,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir)?;
    debug!(data_dir = %data_dir.display(), "resolved data directory");

    match cli.command {
        Commands::Monthly { card, month } => {
            let (year, month) = parse_month(&month)?;
            let entries = generate_daily_spending_monthly(&card, year, month);
            report::show_monthly(&card, year, month, &entries);
        }
        Commands::Yearly { card, year } => {
            let year = parse_year(&year)?;
            let entries = generate_daily_spending_yearly(&card, year);
            report::show_yearly(&card, year, &entries);
        }
        Commands::Summary { card } => {
            report::show_summary(&card, &generate_monthly_spending(&card));
        }
        Commands::Sync { cards } => {
            let settings = Settings::load(&data_dir)?;
            let cards = if cards.is_empty() { settings.default_cards.clone() } else { cards };
            if cards.is_empty() {
                return Err(anyhow!("No cards given and no default_cards in config"));
            }

            let service = CardService::new(FileCardRepository::new(&data_dir)?, &settings);
            let active = service.sync(&cards, Local::now().date_naive(), Utc::now())?;
            println!("Synced {} active card(s).", active.len());
            report::show_cards(&service.all_cards()?);
        }
        Commands::Refresh { card } => {
            let settings = Settings::load(&data_dir)?;
            let service = CardService::new(FileCardRepository::new(&data_dir)?, &settings);
            let record = service.refresh(&card, Local::now().date_naive(), Utc::now())?;
            println!("Refreshed {}.", record.card_id);
            report::show_cards(&service.all_cards()?);
        }
        Commands::List => {
            let settings = Settings::load(&data_dir)?;
            let service = CardService::new(FileCardRepository::new(&data_dir)?, &settings);
            report::show_cards(&service.all_cards()?);
        }
        Commands::Dashboard { card, month } => {
            let (year, month) = parse_month(&month)?;
            let card = match card {
                Some(card) => card,
                None => {
                    let settings = Settings::load(&data_dir)?;
                    let service = CardService::new(FileCardRepository::new(&data_dir)?, &settings);
                    service
                        .active_cards()?
                        .into_iter()
                        .next()
                        .map(|r| r.card_number)
                        .ok_or_else(|| anyhow!("No active cards stored; pass a card number"))?
                }
            };
            dashboard::run(&card, year, month)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_monthly_args() {
        let cli = Cli::try_parse_from(["spendboard", "monthly", "4111111111111111", "-m", "2024-02"]).unwrap();
        match cli.command {
            Commands::Monthly { card, month } => {
                assert_eq!(card, "4111111111111111");
                assert_eq!(month, "2024-02");
            }
            _ => panic!("expected monthly"),
        }
    }

    #[test]
    fn test_parse_sync_without_cards() {
        let cli = Cli::try_parse_from(["spendboard", "-vv", "sync"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Sync { ref cards } if cards.is_empty()));
    }

    #[test]
    fn test_parse_refresh_args() {
        let cli = Cli::try_parse_from(["spendboard", "refresh", "card-5ba8ea9d"]).unwrap();
        assert!(matches!(cli.command, Commands::Refresh { ref card } if card == "card-5ba8ea9d"));
    }

    #[test]
    fn test_current_month_default_parses() {
        let (_, month) = parse_month("this").unwrap();
        assert_eq!(month, Local::now().month0());
    }
}
