use anyhow::{bail, Context, Result};
use moneta_core::CreditCardProfile;
use moneta_ingest::CardValidator;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `$MONETA_HOME`, or `~/.moneta`.
pub fn moneta_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("MONETA_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".moneta"))
}

pub fn ensure_moneta_home() -> Result<PathBuf> {
    let dir = moneta_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn cards_path() -> Result<PathBuf> {
    Ok(ensure_moneta_home()?.join("cards.json"))
}

/// The card list persisted as JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardStore {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    cards: Vec<CreditCardProfile>,
}

impl CardStore {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let store: CardStore =
            serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?;

        let validator = CardValidator::new()?;
        for card in &store.cards {
            validator
                .check_card(card)
                .with_context(|| format!("card {} in {}", card.id, path.display()))?;
        }
        debug!(cards = store.cards.len(), path = %path.display(), "loaded card store");
        Ok(store)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn cards(&self) -> &[CreditCardProfile] {
        &self.cards
    }

    pub fn active(&self) -> impl Iterator<Item = &CreditCardProfile> {
        self.cards.iter().filter(|c| c.is_active)
    }

    fn allocate_id(&mut self) -> String {
        // Ids may predate next_id if the file was edited by hand.
        loop {
            self.next_id += 1;
            let id = self.next_id.to_string();
            if !self.cards.iter().any(|c| c.id == id) {
                return id;
            }
        }
    }

    /// Store a card under a fresh id and return that id.
    pub fn add(&mut self, mut card: CreditCardProfile) -> Result<String> {
        card.id = self.allocate_id();
        CardValidator::new()?.check_card(&card)?;
        let id = card.id.clone();
        self.cards.push(card);
        Ok(id)
    }

    pub fn remove(&mut self, id: &str) -> Result<CreditCardProfile> {
        match self.cards.iter().position(|c| c.id == id) {
            Some(i) => Ok(self.cards.remove(i)),
            None => bail!("no card with id {id}"),
        }
    }

    pub fn set_active(&mut self, id: &str, active: bool) -> Result<()> {
        match self.cards.iter_mut().find(|c| c.id == id) {
            Some(card) => {
                card.is_active = active;
                Ok(())
            }
            None => bail!("no card with id {id}"),
        }
    }
}
