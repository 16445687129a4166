use chrono::{Datelike, NaiveDate};
use moneta_core::calendar::start_of_day;
use moneta_core::{
    optimize, rank_cards, CreditCardProfile, OptimizerConfig, SavingsProduct, Transaction,
    WindowTier,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// The three demo cards the optimize endpoint shipped with.
fn demo_cards() -> Vec<CreditCardProfile> {
    vec![
        CreditCardProfile::new("1", "VIB", "Online Plus", "1234", 20, 55, 15),
        CreditCardProfile::new("2", "Techcombank", "Cash Back", "5678", 25, 45, 15),
        CreditCardProfile::new("3", "HSBC", "Platinum", "9012", 15, 50, 20),
    ]
}

#[test]
fn test_demo_cards_after_statement_day() {
    let out = rank_cards(&demo_cards(), start_of_day(d(2025, 3, 21)));
    let ids: Vec<_> = out.iter().map(|o| o.card_id.as_str()).collect();
    // VIB and HSBC both reach May 5; VIB was listed first.
    assert_eq!(ids, vec!["1", "3", "2"]);
    assert_eq!(out[0].interest_free_period, 45);
    assert_eq!(out[1].interest_free_period, 45);
    assert_eq!(out[2].interest_free_period, 19);
    assert_eq!(out[2].tier, WindowTier::NotRecommended);
}

#[test]
fn test_demo_cards_early_in_month() {
    let out = rank_cards(&demo_cards(), start_of_day(d(2025, 3, 10)));
    assert_eq!(out[0].card_id, "2");
    assert_eq!(out[0].due_date, d(2025, 4, 9));
    assert_eq!(out[0].interest_free_period, 30);
    assert_eq!(out[0].tier, WindowTier::Average);
}

#[test]
fn test_year_end_rollover() {
    let out = rank_cards(&demo_cards(), start_of_day(d(2025, 12, 31)));
    assert_eq!(out[0].card_id, "2");
    assert_eq!(out[0].next_statement_date, d(2026, 1, 25));
    assert_eq!(out[0].interest_free_period, 40);
    for o in &out {
        assert_eq!(o.next_statement_date.month0(), 0, "{} should bill in January", o.card_id);
    }
}

#[test]
fn test_full_optimization_report() {
    let tx = Transaction::on(30_000_000.0, d(2025, 3, 21)).unwrap();
    let report = optimize(&demo_cards(), &tx, &OptimizerConfig::default()).unwrap();

    assert_eq!(report.best_card.bank_name, "VIB");
    assert_eq!(report.all_options.len(), 3);

    let rec = &report.savings_recommendation;
    assert_eq!(rec.product, SavingsProduct::TermDeposit1M);
    assert_eq!(rec.days_available, 45);
    assert!((rec.estimated_interest - 110_958.90).abs() < 0.01);
    assert!(rec.message.contains("30.000.000 ₫"));
    assert!(rec.message.contains("110.959 ₫"));
}

#[test]
fn test_optimization_is_deterministic() {
    let tx = Transaction::on(12_500_000.0, d(2025, 7, 4)).unwrap();
    let config = OptimizerConfig::default();
    let a = optimize(&demo_cards(), &tx, &config);
    let b = optimize(&demo_cards(), &tx, &config);
    assert_eq!(a, b);
}

#[test]
fn test_report_json_shape() {
    let tx = Transaction::on(30_000_000.0, d(2025, 3, 21)).unwrap();
    let report = optimize(&demo_cards(), &tx, &OptimizerConfig::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["bestCard"]["cardId"], "1");
    assert_eq!(json["bestCard"]["nextStatementDate"], "2025-04-20");
    assert_eq!(json["bestCard"]["dueDate"], "2025-05-05");
    assert_eq!(json["allOptions"].as_array().unwrap().len(), 3);
    assert_eq!(json["savingsRecommendation"]["type"], "TERM_DEPOSIT_1M");
}

#[test]
fn test_all_inactive_yields_nothing() {
    let cards: Vec<_> = demo_cards().into_iter().map(|c| c.inactive()).collect();
    assert!(rank_cards(&cards, start_of_day(d(2025, 3, 21))).is_empty());

    let tx = Transaction::on(1_000_000.0, d(2025, 3, 21)).unwrap();
    assert!(optimize(&cards, &tx, &OptimizerConfig::default()).is_none());
}
