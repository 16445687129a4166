use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use moneta_core::rebalance::RebalanceAction;
use moneta_core::time::{now_in, parse_transaction_date};
use moneta_core::{
    format_percent, format_vnd, optimize, plan_rebalance_with, AllocationTarget, Asset, GoalPriority,
    GoalType, InvestmentGoal, PortfolioSummary, Transaction,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cards_cmd;
mod config;
mod report;
mod state;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("MONETA_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "moneta", version, long_version = LONG_VERSION, about = "Personal finance toolkit: credit card float optimizer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pick the card with the longest interest-free window for a purchase
    Optimize {
        /// Purchase amount (VND)
        #[arg(long)]
        amount: f64,

        /// Purchase date: YYYY-MM-DD, "YYYY-MM-DD HH:MM" or RFC 3339 (default: now)
        #[arg(long)]
        date: Option<String>,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Manage stored credit cards
    Cards {
        #[command(subcommand)]
        command: cards_cmd::CardsCommand,
    },

    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Savings pace for a goal
    Goal {
        #[arg(long)]
        target: f64,

        #[arg(long, default_value_t = 0.0)]
        current: f64,

        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: String,

        /// Current monthly contribution
        #[arg(long)]
        monthly: Option<f64>,
    },

    /// Compare holdings with target weights (JSON list of allocation targets)
    Rebalance {
        #[arg(long)]
        file: PathBuf,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Value and P&L of a portfolio (JSON list of assets)
    Portfolio {
        #[arg(long)]
        file: PathBuf,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config.toml if none exists
    Init,

    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Optimize { amount, date, json } => run_optimize(amount, date, json)?,

        Command::Cards { command } => cards_cmd::run(command)?,

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },

        Command::Goal {
            target,
            current,
            deadline,
            monthly,
        } => run_goal(target, current, &deadline, monthly)?,

        Command::Rebalance { file, json } => run_rebalance(&file, json)?,

        Command::Portfolio { file, json } => run_portfolio(&file, json)?,
    }

    Ok(())
}

fn run_optimize(amount: f64, date: Option<String>, json: bool) -> Result<()> {
    let cfg = config::load_config()?;
    let tz = &cfg.general.timezone;

    let when = match date {
        Some(s) => parse_transaction_date(&s, tz)?,
        None => now_in(tz)?,
    };
    let tx = Transaction::new(amount, when)?;
    if tx.amount == 0.0 {
        bail!("amount must be greater than zero");
    }

    let store = state::CardStore::load(&state::cards_path()?)?;
    debug!(cards = store.cards().len(), %when, "optimizing");

    let Some(report) = optimize(store.cards(), &tx, &cfg.optimizer_config()) else {
        bail!("no active cards. Add one with: moneta cards add --help");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::render(&report));
    }
    Ok(())
}

fn run_goal(target: f64, current: f64, deadline: &str, monthly: Option<f64>) -> Result<()> {
    let cfg = config::load_config()?;
    let deadline = chrono::NaiveDate::parse_from_str(deadline.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid deadline '{deadline}' (expected YYYY-MM-DD)"))?;
    let today = now_in(&cfg.general.timezone)?.date();

    let mut goal = InvestmentGoal::new("goal", GoalType::Other, target, deadline, GoalPriority::Medium)
        .with_current(current);
    if let Some(m) = monthly {
        goal = goal.with_monthly_contribution(m);
    }

    println!("Progress: {:.1}%", goal.progress_percent());
    println!("Remaining: {}", format_vnd(goal.remaining_amount()));
    let months = goal.months_remaining(today);
    if months <= 0 {
        println!("Deadline {deadline} has passed");
        return Ok(());
    }
    println!("Months left: {months}");
    println!("Needed per month: {}", format_vnd(goal.monthly_needed(today)));
    if goal.monthly_contribution.is_some() {
        let gap = goal.contribution_gap(today);
        if gap > 0.0 {
            println!("Increase monthly contribution by {}", format_vnd(gap));
        } else {
            println!("Current contribution is on pace");
        }
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

fn run_rebalance(file: &Path, json: bool) -> Result<()> {
    let cfg = config::load_config()?;
    let targets: Vec<AllocationTarget> = read_json(file)?;
    let plan = plan_rebalance_with(&targets, cfg.rebalance.tolerance_percent);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    if plan.lines.is_empty() {
        println!("No allocation data. Add holdings first.");
        return Ok(());
    }

    println!("Total: {}", format_vnd(plan.total_value));
    println!(
        "Status: {}\n",
        if plan.is_balanced() { "balanced" } else { "needs rebalancing" }
    );
    for line in &plan.lines {
        println!(
            "{:<16} target {:>5.1}% | current {:>5.1}% | {:?}",
            line.name, line.target_percent, line.current_percent, line.action
        );
    }
    for line in plan.trades() {
        let verb = match line.action {
            RebalanceAction::Buy => "buy",
            RebalanceAction::Sell => "sell",
            RebalanceAction::Hold => continue,
        };
        println!("- {verb} {} of {} ({:?} priority)", format_vnd(line.difference.abs()), line.name, line.priority);
    }
    Ok(())
}

fn run_portfolio(file: &Path, json: bool) -> Result<()> {
    let assets: Vec<Asset> = read_json(file)?;
    let summary = PortfolioSummary::from_assets(&assets);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Value: {}", format_vnd(summary.total_value));
    println!("Cost:  {}", format_vnd(summary.total_cost));
    println!(
        "P&L:   {} ({})",
        format_vnd(summary.pnl),
        format_percent(summary.pnl_percent)
    );
    for (kind, total) in &summary.by_kind {
        println!(
            "  {:?}: {} across {} holdings ({:.1}%)",
            kind,
            format_vnd(total.value),
            total.count,
            summary.allocation_percent(*kind)
        );
    }
    Ok(())
}
