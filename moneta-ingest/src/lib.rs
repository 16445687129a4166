//! moneta-ingest: card record import (CSV) and field validation.

pub mod card_csv;
pub mod error;
pub mod types;

pub use card_csv::{parse_cards_csv, read_cards_csv, CardValidator};
pub use error::{IngestError, Result};
pub use types::{CardDraft, ImportReport, RejectedRow};
