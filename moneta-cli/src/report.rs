//! Plain-text rendering of an optimization report.

use moneta_core::{format_vnd, CardOption, OptimizationReport, SavingsProduct};
use std::fmt::Write;

pub fn render(report: &OptimizationReport) -> String {
    let mut out = String::new();
    let best = &report.best_card;

    let _ = writeln!(out, "# Best card for {}\n", format_vnd(report.amount));
    let _ = writeln!(
        out,
        "Purchase at {}\n",
        report.transaction_date.format("%Y-%m-%d %H:%M")
    );
    let _ = writeln!(
        out,
        "-> {} {} ••{}: {} interest-free days (due {})\n",
        best.bank_name,
        best.card_name,
        best.last_four_digits,
        best.interest_free_period,
        best.due_date
    );

    let _ = writeln!(out, "## All options\n");
    for (i, o) in report.all_options.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, option_line(o));
    }

    let rec = &report.savings_recommendation;
    let _ = writeln!(out, "\n## Float plan\n");
    if rec.product == SavingsProduct::NoRecommendation {
        let _ = writeln!(out, "{}", rec.message);
    } else {
        let _ = writeln!(
            out,
            "{} ({}): {:.1}%/year, about {} over {} days",
            rec.product_name.as_deref().unwrap_or("-"),
            rec.bank_name.as_deref().unwrap_or("any provider"),
            rec.interest_rate,
            format_vnd(rec.estimated_interest),
            rec.days_available
        );
        let _ = writeln!(out, "{}", rec.message);
    }
    out
}

fn option_line(o: &CardOption) -> String {
    let mut line = format!(
        "{} {} ••{} | statement {} | due {} | {} days | {}",
        o.bank_name,
        o.card_name,
        o.last_four_digits,
        o.next_statement_date,
        o.due_date,
        o.interest_free_period,
        o.recommendation
    );
    if o.exceeds_advertised() {
        let _ = write!(line, " (bank advertises {} days)", o.interest_free_days);
    }
    line
}
