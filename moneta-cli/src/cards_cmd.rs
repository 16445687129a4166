use anyhow::{bail, Context, Result};
use clap::Subcommand;
use moneta_core::{format_vnd, CreditCardProfile};
use moneta_ingest::parse_cards_csv;
use std::path::PathBuf;
use tracing::info;

use crate::state::{cards_path, CardStore};

#[derive(Subcommand, Debug)]
pub enum CardsCommand {
    /// List stored cards
    List {
        /// Include inactive cards
        #[arg(long, default_value_t = false)]
        all: bool,
    },

    /// Add a card
    Add {
        #[arg(long)]
        bank: String,

        #[arg(long)]
        name: String,

        /// Last four digits of the card number
        #[arg(long)]
        last4: String,

        /// Day of month the statement closes (1-31)
        #[arg(long)]
        statement_day: u32,

        /// Advertised interest-free days (informational)
        #[arg(long)]
        interest_free_days: u32,

        /// Days after the statement date that payment is due
        #[arg(long)]
        payment_due_days: u32,

        #[arg(long)]
        credit_limit: Option<f64>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a card
    Remove {
        #[arg(long)]
        id: String,
    },

    /// Exclude a card from optimization without deleting it
    Deactivate {
        #[arg(long)]
        id: String,
    },

    /// Include a previously deactivated card again
    Activate {
        #[arg(long)]
        id: String,
    },

    /// Import cards from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
}

pub fn run(cmd: CardsCommand) -> Result<()> {
    let path = cards_path()?;
    let mut store = CardStore::load(&path)?;

    match cmd {
        CardsCommand::List { all } => {
            list(&store, all);
            return Ok(());
        }
        CardsCommand::Add {
            bank,
            name,
            last4,
            statement_day,
            interest_free_days,
            payment_due_days,
            credit_limit,
            notes,
        } => {
            let mut card = CreditCardProfile::new(
                "",
                bank,
                name,
                last4,
                statement_day,
                interest_free_days,
                payment_due_days,
            );
            card.credit_limit = credit_limit;
            card.notes = notes;
            let id = store.add(card)?;
            println!("Added card {id}");
        }
        CardsCommand::Remove { id } => {
            let card = store.remove(&id)?;
            println!("Removed {}", card.display_name());
        }
        CardsCommand::Deactivate { id } => {
            store.set_active(&id, false)?;
            println!("Card {id} deactivated");
        }
        CardsCommand::Activate { id } => {
            store.set_active(&id, true)?;
            println!("Card {id} activated");
        }
        CardsCommand::Import { csv } => {
            if !csv.exists() {
                bail!("CSV not found: {}", csv.display());
            }
            let report = parse_cards_csv(&csv)
                .with_context(|| format!("parsing {}", csv.display()))?;

            let mut added = 0;
            for draft in report.cards {
                store.add(draft.into_profile(""))?;
                added += 1;
            }
            info!(added, rejected = report.rejected.len(), "imported cards");

            println!("Imported {added} cards from {}", csv.display());
            for r in &report.rejected {
                println!("  skipped line {}: {}", r.line, r.reason);
            }
        }
    }

    store.save(&path)?;
    Ok(())
}

fn list(store: &CardStore, all: bool) {
    let cards: Vec<&CreditCardProfile> = if all {
        store.cards().iter().collect()
    } else {
        store.active().collect()
    };

    if cards.is_empty() {
        println!("No cards. Add one with: moneta cards add --help");
        return;
    }

    for c in cards {
        let limit = c.credit_limit.map(format_vnd).unwrap_or_else(|| "-".to_string());
        println!(
            "[{}] {}{} | statement day {} | due +{}d | advertised {}d | limit {}",
            c.id,
            c.display_name(),
            if c.is_active { "" } else { " (inactive)" },
            c.statement_day,
            c.payment_due_days,
            c.interest_free_days,
            limit,
        );
    }
}
