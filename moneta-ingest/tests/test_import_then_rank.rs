use chrono::NaiveDate;
use moneta_core::calendar::start_of_day;
use moneta_core::rank_cards;
use moneta_ingest::read_cards_csv;

const CARDS: &str = "\
bank_name,card_name,last_four_digits,statement_day,interest_free_days,payment_due_days,credit_limit
VIB,Online Plus,1234,20,55,15,50000000
Techcombank,Cash Back,5678,25,45,15,
HSBC,Platinum,9012,15,50,20,
Shinhan,Broken,99,10,45,15,
";

/// Imported rows rank the same as hand-built profiles.
#[test]
fn test_imported_cards_rank() {
    let report = read_cards_csv(CARDS.as_bytes()).unwrap();
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].line, 5);

    let cards: Vec<_> = report
        .cards
        .into_iter()
        .enumerate()
        .map(|(i, draft)| draft.into_profile(format!("card-{}", i + 1)))
        .collect();
    for c in &cards {
        c.validate().unwrap();
    }

    let at = start_of_day(NaiveDate::from_ymd_opt(2025, 3, 21).unwrap());
    let ranked = rank_cards(&cards, at);
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].card_id, "card-1");
    assert_eq!(ranked[0].interest_free_period, 45);
    assert_eq!(ranked[2].bank_name, "Techcombank");
}
