//! Import credit cards from a CSV export.
//!
//! Expected header (order free, `snake_case` or `camelCase`):
//! bank_name,card_name,last_four_digits,statement_day,interest_free_days,
//! payment_due_days[,credit_limit,notes]
//!
//! Bad rows are reported back with a reason; they never abort the import.

use moneta_core::{CreditCardProfile, MonetaError};
use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::types::{CardDraft, ImportReport, RejectedRow};

const REQUIRED: [&str; 6] = [
    "bank_name",
    "card_name",
    "last_four_digits",
    "statement_day",
    "interest_free_days",
    "payment_due_days",
];

/// Column positions resolved from the header row.
struct Columns {
    required: [usize; 6],
    credit_limit: Option<usize>,
    notes: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |name: &str| {
            let key = normalize_header(name);
            normalized.iter().position(|h| *h == key)
        };

        let mut required = [0usize; 6];
        for (slot, name) in required.iter_mut().zip(REQUIRED) {
            *slot = find(name).ok_or(IngestError::MissingColumn(name))?;
        }
        Ok(Self {
            required,
            credit_limit: find("credit_limit"),
            notes: find("notes"),
        })
    }
}

fn normalize_header(h: &str) -> String {
    h.trim()
        .chars()
        .filter(|c| *c != '_' && *c != ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Field rules shared by every row of an import.
pub struct CardValidator {
    last_four: Regex,
    grouped_amount: Regex,
}

impl CardValidator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            last_four: Regex::new(r"^[0-9]{4}$")?,
            // 50,000,000 / 50.000.000 / 50 000 000
            grouped_amount: Regex::new(r"^\d{1,3}(?:[.,_ ]\d{3})+$")?,
        })
    }

    pub fn check_last_four(&self, s: &str) -> std::result::Result<(), String> {
        if self.last_four.is_match(s) {
            Ok(())
        } else {
            Err(format!("last four digits '{s}' must be exactly 4 digits"))
        }
    }

    /// Full check of a stored card: the core field rules plus the
    /// last-four pattern.
    pub fn check_card(&self, card: &CreditCardProfile) -> moneta_core::Result<()> {
        card.validate()?;
        self.check_last_four(&card.last_four_digits)
            .map_err(|reason| MonetaError::InvalidCard {
                id: card.id.clone(),
                reason,
            })
    }

    /// Parse an amount that may use thousands grouping.
    pub fn parse_amount(&self, s: &str) -> std::result::Result<f64, String> {
        let s = s.trim();
        let value = if self.grouped_amount.is_match(s) {
            s.chars().filter(char::is_ascii_digit).collect::<String>().parse::<f64>()
        } else {
            s.parse::<f64>()
        };
        match value {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
            _ => Err(format!("'{s}' is not a valid non-negative amount")),
        }
    }
}

fn parse_day_count(field: &str, s: &str) -> std::result::Result<u32, String> {
    s.trim()
        .parse::<u32>()
        .map_err(|_| format!("{field} '{s}' is not a whole number"))
}

fn parse_row(
    record: &csv::StringRecord,
    cols: &Columns,
    validator: &CardValidator,
) -> std::result::Result<CardDraft, String> {
    let get = |i: usize| record.get(i).unwrap_or("").trim();
    let [bank, card, last_four, statement, free, due] = cols.required;

    let bank_name = get(bank);
    let card_name = get(card);
    if bank_name.is_empty() {
        return Err("bank name is empty".to_string());
    }
    if card_name.is_empty() {
        return Err("card name is empty".to_string());
    }

    let last_four_digits = get(last_four);
    validator.check_last_four(last_four_digits)?;

    let statement_day = parse_day_count("statement day", get(statement))?;
    if !(1..=31).contains(&statement_day) {
        return Err(format!("statement day {statement_day} is outside 1..=31"));
    }
    let interest_free_days = parse_day_count("interest-free days", get(free))?;
    let payment_due_days = parse_day_count("payment due days", get(due))?;

    let credit_limit = match cols.credit_limit.map(get).filter(|s| !s.is_empty()) {
        Some(s) => Some(validator.parse_amount(s)?),
        None => None,
    };
    let notes = cols
        .notes
        .map(get)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(CardDraft {
        bank_name: bank_name.to_string(),
        card_name: card_name.to_string(),
        last_four_digits: last_four_digits.to_string(),
        statement_day,
        interest_free_days,
        payment_due_days,
        credit_limit,
        notes,
    })
}

/// Parse card rows from any reader.
pub fn read_cards_csv<R: Read>(reader: R) -> Result<ImportReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let cols = Columns::from_headers(rdr.headers()?)?;
    let validator = CardValidator::new()?;
    let mut report = ImportReport::default();

    for result in rdr.records() {
        let record = result?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        match parse_row(&record, &cols, &validator) {
            Ok(draft) => report.cards.push(draft),
            Err(reason) => {
                warn!(line, %reason, "rejected card row");
                report.rejected.push(RejectedRow { line, reason });
            }
        }
    }

    debug!(
        accepted = report.cards.len(),
        rejected = report.rejected.len(),
        "parsed card csv"
    );
    Ok(report)
}

/// Parse a card CSV file.
pub fn parse_cards_csv(path: impl AsRef<Path>) -> Result<ImportReport> {
    let file = File::open(path.as_ref())?;
    read_cards_csv(file)
}
